use log::warn;

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Selects the correct Operation for a given Opcode
///
/// Returns None for encodings outside the instruction set.
pub fn from_op(op: &dyn Opcode) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, _, 0xE, 0x0) => clr,
        (0x0, _, 0xE, 0xE) => rts,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, ..) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, ..) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rnd,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loadd,
        (0xF, _, 0x1, 0x8) => loads,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

/// Executes a single instruction word against the state
/// - moves the pc past the instruction
/// - runs its Operation, skipping encodings that have none
/// - puts the pc back on the instruction if it faults
pub fn execute(op: u16, state: &mut State, ctx: &mut Context) -> Result<(), Fault> {
    let pc = state.pc;
    state.pc += 0x2;

    match from_op(&op) {
        Some(operation) => operation(&op, state, ctx).map_err(|fault| {
            state.pc = pc;
            fault
        }),
        None => {
            warn!("skipping unknown opcode {:04X} at {:03X}", op, pc);
            Ok(())
        }
    }
}

/// Renders an Opcode in the usual assembler syntax, e.g. `ADD V1, V2`
pub fn mnemonic(op: &dyn Opcode) -> String {
    let (x, y) = (op.x(), op.y());
    match op.nibbles() {
        (0x0, _, 0xE, 0x0) => "CLS".to_string(),
        (0x0, _, 0xE, 0xE) => "RET".to_string(),
        (0x1, ..) => format!("JP {:03X}", op.addr()),
        (0x2, ..) => format!("CALL {:03X}", op.addr()),
        (0x3, ..) => format!("SE V{:X}, {:02X}", x, op.kk()),
        (0x4, ..) => format!("SNE V{:X}, {:02X}", x, op.kk()),
        (0x5, ..) => format!("SE V{:X}, V{:X}", x, y),
        (0x6, ..) => format!("LD V{:X}, {:02X}", x, op.kk()),
        (0x7, ..) => format!("ADD V{:X}, {:02X}", x, op.kk()),
        (0x8, .., 0x0) => format!("LD V{:X}, V{:X}", x, y),
        (0x8, .., 0x1) => format!("OR V{:X}, V{:X}", x, y),
        (0x8, .., 0x2) => format!("AND V{:X}, V{:X}", x, y),
        (0x8, .., 0x3) => format!("XOR V{:X}, V{:X}", x, y),
        (0x8, .., 0x4) => format!("ADD V{:X}, V{:X}", x, y),
        (0x8, .., 0x5) => format!("SUB V{:X}, V{:X}", x, y),
        (0x8, .., 0x6) => format!("SHR V{:X}", x),
        (0x8, .., 0x7) => format!("SUBN V{:X}, V{:X}", x, y),
        (0x8, .., 0xE) => format!("SHL V{:X}", x),
        (0x9, ..) => format!("SNE V{:X}, V{:X}", x, y),
        (0xA, ..) => format!("LD I, {:03X}", op.addr()),
        (0xB, ..) => format!("JP V0, {:03X}", op.addr()),
        (0xC, ..) => format!("RND V{:X}, {:02X}", x, op.kk()),
        (0xD, ..) => format!("DRW V{:X}, V{:X}, {:X}", x, y, op.n()),
        (0xE, _, 0x9, 0xE) => format!("SKP V{:X}", x),
        (0xE, _, 0xA, 0x1) => format!("SKNP V{:X}", x),
        (0xF, _, 0x0, 0x7) => format!("LD V{:X}, DT", x),
        (0xF, _, 0x0, 0xA) => format!("LD V{:X}, K", x),
        (0xF, _, 0x1, 0x5) => format!("LD DT, V{:X}", x),
        (0xF, _, 0x1, 0x8) => format!("LD ST, V{:X}", x),
        (0xF, _, 0x1, 0xE) => format!("ADD I, V{:X}", x),
        (0xF, _, 0x2, 0x9) => format!("LD F, V{:X}", x),
        (0xF, _, 0x3, 0x3) => format!("LD B, V{:X}", x),
        (0xF, _, 0x5, 0x5) => format!("LD [I], V{:X}", x),
        (0xF, _, 0x6, 0x5) => format!("LD V{:X}, [I]", x),
        _ => format!("DW {:04X}", op.word()),
    }
}
