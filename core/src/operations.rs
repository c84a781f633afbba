use std::ops::Range;

use rand::RngCore;

use crate::config::Quirks;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, SPRITE_SIZE, STACK_DEPTH};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::State;

/// Everything an instruction may use besides the State itself.
pub struct Context<'a> {
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// Every operation is called after the pc has been moved past its instruction.
pub type Operation = fn(op: &dyn Opcode, state: &mut State, ctx: &mut Context) -> Result<(), Fault>;

/// Address of the instruction being executed
fn current_pc(state: &State) -> u16 {
    state.pc - 0x2
}

/// The `len` bytes of memory starting at I, or a fault if they run past the end of memory
fn memory_at_i(state: &State, len: usize) -> Result<Range<usize>, Fault> {
    let start = state.i as usize;
    let end = start + len;
    if len > 0 && end > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            pc: current_pc(state),
            address: start.max(MEMORY_SIZE),
        });
    }
    Ok(start..end)
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += 0x2;
    }
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow {
            pc: current_pc(state),
        });
    }
    state.sp -= 0x1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Fault::StackOverflow {
            pc: current_pc(state),
        });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 0x1;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let equal = state.v[op.x() as usize] == op.kk();
    skip_if(state, equal);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let different = state.v[op.x() as usize] != op.kk();
    skip_if(state, different);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let equal = state.v[op.x() as usize] == state.v[op.y() as usize];
    skip_if(state, equal);
    Ok(())
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] = op.kk();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] = state.v[op.y() as usize];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
    Ok(())
}

/// Writes an arithmetic result; VF first so that the result wins when x is F.
fn set_with_flag(state: &mut State, x: u8, result: u8, flag: bool) {
    state.v[0xF] = u8::from(flag);
    state.v[x as usize] = result;
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    let (res, carry) = vx.overflowing_add(vy);
    set_with_flag(state, op.x(), res, carry);
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    set_with_flag(state, op.x(), vx.wrapping_sub(vy), vx >= vy);
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let vx = state.v[op.x() as usize];
    set_with_flag(state, op.x(), vx >> 1, vx & 0x1 == 0x1);
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    set_with_flag(state, op.x(), vy.wrapping_sub(vx), vy >= vx);
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let vx = state.v[op.x() as usize];
    set_with_flag(state, op.x(), vx << 1, vx & 0x80 == 0x80);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let different = state.v[op.x() as usize] != state.v[op.y() as usize];
    skip_if(state, different);
    Ok(())
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.pc = op.addr() + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: &dyn Opcode, state: &mut State, ctx: &mut Context) -> Result<(), Fault> {
    let rand_byte = ctx.rng.next_u32() as u8;
    state.v[op.x() as usize] = rand_byte & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
///
/// Every pixel wraps around the edges of the display on its own, so a sprite drawn at the
/// bottom right corner continues at the top left.
/// Sets VF if any pixels are erased.
pub fn draw(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let sprite = memory_at_i(state, op.n() as usize)?;
    let origin_x = state.v[op.x() as usize] as usize;
    let origin_y = state.v[op.y() as usize] as usize;

    // Reset the carry flag (used for collision detection)
    state.v[0xF] = 0x0;

    for (row, address) in sprite.enumerate() {
        let byte = state.memory[address];
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if byte & (0x80 >> bit) == 0 {
                continue;
            }
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[y][x];
            if *pixel == 0x1 {
                state.v[0xF] = 0x1;
            }
            *pixel ^= 0x1;
        }
    }

    state.draw_flag = true;
    Ok(())
}

/// Keys beyond 0xF can't be pressed
fn is_pressed(state: &State, key: u8) -> bool {
    state.keypad.get(key as usize).copied().unwrap_or(false)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let pressed = is_pressed(state, state.v[op.x() as usize]);
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let pressed = is_pressed(state, state.v[op.x() as usize]);
    skip_if(state, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.v[op.x() as usize] = state.delay_timer;
    Ok(())
}

/// Vx = the lowest pressed key
/// Repeats this instruction until some key is pressed.
pub fn keyd(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    match state.keypad.iter().position(|&pressed| pressed) {
        Some(key) => state.v[op.x() as usize] = key as u8,
        None => state.pc -= 0x2,
    }
    Ok(())
}

/// DT = Vx
pub fn loadd(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.delay_timer = state.v[op.x() as usize];
    Ok(())
}

/// ST = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.sound_timer = state.v[op.x() as usize];
    Ok(())
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    state.i = u16::from(state.v[op.x() as usize]) * SPRITE_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &mut State, _ctx: &mut Context) -> Result<(), Fault> {
    let target = memory_at_i(state, 3)?;
    let vx = state.v[op.x() as usize];
    state.memory[target].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(())
}

/// Moves I past the registers just transferred, if the quirk is enabled
fn advance_i(op: &dyn Opcode, state: &mut State, quirks: Quirks) {
    if quirks.index_increment {
        state.i = state.i.wrapping_add(u16::from(op.x()) + 1);
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State, ctx: &mut Context) -> Result<(), Fault> {
    let count = op.x() as usize + 1;
    let target = memory_at_i(state, count)?;
    state.memory[target].copy_from_slice(&state.v[..count]);
    advance_i(op, state, ctx.quirks);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State, ctx: &mut Context) -> Result<(), Fault> {
    let count = op.x() as usize + 1;
    let source = memory_at_i(state, count)?;
    state.v[..count].copy_from_slice(&state.memory[source]);
    advance_i(op, state, ctx.quirks);
    Ok(())
}
