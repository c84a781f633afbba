use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, STACK_DEPTH};
use chip8_core::{Chip8, Config, Fault, Quirks};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn chip8_running(rom: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_rng(Config::default(), Box::new(StdRng::seed_from_u64(0x8)));
    chip8.load_bytes(rom).unwrap();
    chip8
}

fn steps(chip8: &mut Chip8, count: usize) {
    for _ in 0..count {
        chip8.step().unwrap();
    }
}

/// A main routine that calls a chain of `depth` nested subroutines, then spins at 0x202.
fn nested_calls(depth: usize) -> Vec<u8> {
    let mut rom = vec![0x23, 0x00, 0x12, 0x02];
    rom.resize(0x100, 0x0);
    for level in 1..=depth {
        if level < depth {
            let next = 0x300 + 4 * level as u16;
            rom.extend_from_slice(&[0x20 | (next >> 8) as u8, next as u8]);
        }
        rom.extend_from_slice(&[0x00, 0xEE]);
    }
    rom
}

#[test]
fn adds_registers() {
    let mut chip8 = chip8_running(&[0x6A, 0x05, 0x6B, 0x03, 0x8A, 0xB4]);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().v[0xA], 8);
    assert_eq!(chip8.state().v[0xF], 0);
    assert_eq!(chip8.state().pc, 0x206);
}

#[test]
fn returns_from_every_nesting_depth() {
    for depth in 1..=STACK_DEPTH {
        let mut chip8 = chip8_running(&nested_calls(depth));
        steps(&mut chip8, depth);
        assert_eq!(chip8.state().sp as usize, depth);

        steps(&mut chip8, depth);
        assert_eq!(chip8.state().pc, 0x202, "depth {}", depth);
        assert_eq!(chip8.state().sp, 0);
    }
}

#[test]
fn faults_on_seventeenth_call() {
    // Calls itself forever
    let mut chip8 = chip8_running(&[0x22, 0x00]);
    steps(&mut chip8, STACK_DEPTH);
    let before = chip8.state().clone();

    assert_eq!(chip8.step(), Err(Fault::StackOverflow { pc: 0x200 }));
    assert_eq!(chip8.state().pc, before.pc);
    assert_eq!(chip8.state().sp, before.sp);
    assert_eq!(chip8.state().stack, before.stack);
}

#[test]
fn non_control_flow_instructions_advance_by_two() {
    let ops: [[u8; 2]; 27] = [
        [0x00, 0xE0],
        [0x61, 0x22],
        [0x71, 0x22],
        [0x81, 0x20],
        [0x81, 0x21],
        [0x81, 0x22],
        [0x81, 0x23],
        [0x81, 0x24],
        [0x81, 0x25],
        [0x81, 0x26],
        [0x81, 0x27],
        [0x81, 0x2E],
        [0xA1, 0x23],
        [0xC1, 0xFF],
        [0xD1, 0x25],
        [0xF1, 0x07],
        [0xF1, 0x15],
        [0xF1, 0x18],
        [0xF1, 0x1E],
        [0xF1, 0x29],
        [0xF1, 0x33],
        [0xF3, 0x55],
        [0xF3, 0x65],
        // not skipping
        [0x31, 0x01],
        [0x41, 0x00],
        [0x91, 0x20],
        [0xE1, 0x9E],
    ];
    for op in ops.iter() {
        // Point I somewhere harmless first
        let mut chip8 = chip8_running(&[0xA3, 0x00, op[0], op[1]]);
        steps(&mut chip8, 2);
        assert_eq!(chip8.state().pc, 0x204, "{:02X}{:02X}", op[0], op[1]);
    }
}

#[test]
fn stores_bcd() {
    let mut chip8 = chip8_running(&[0x64, 157, 0xA3, 0x00, 0xF4, 0x33]);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().memory[0x300..0x303], [1, 5, 7]);
}

#[test]
fn round_trips_registers_through_memory() {
    let rom = [
        0x60, 0x0A, 0x61, 0x0B, 0x62, 0x0C, // V0..V2 = A, B, C
        0xA3, 0x00, 0xF2, 0x55, // mem[0x300..0x303] = V0..V2
        0x60, 0x00, 0x61, 0x00, 0x62, 0x00, // clear V0..V2
        0xA3, 0x00, 0xF2, 0x65, // V0..V2 = mem[0x300..0x303]
    ];
    let mut chip8 = chip8_running(&rom);
    steps(&mut chip8, 10);
    assert_eq!(chip8.state().v[0..3], [0x0A, 0x0B, 0x0C]);
    assert_eq!(chip8.state().i, 0x303);
}

#[test]
fn index_stays_put_without_increment_quirk() {
    let config = Config {
        quirks: Quirks {
            index_increment: false,
        },
        ..Config::default()
    };
    let mut chip8 = Chip8::with_config(config);
    chip8.load_bytes(&[0xA3, 0x00, 0xF5, 0x55, 0xF5, 0x65]).unwrap();
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().i, 0x300);
}

#[test]
fn waits_for_a_key() {
    let mut chip8 = chip8_running(&[0xF5, 0x0A, 0x65, 0x01]);
    for _ in 0..10 {
        chip8.step().unwrap();
        assert_eq!(chip8.state().pc, 0x200);
        assert_eq!(chip8.state().v[0x5], 0);
    }

    chip8.key_press(0x9);
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x5], 0x9);
    assert_eq!(chip8.state().pc, 0x202);

    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn counts_down_delay_once_per_frame() {
    // DT = 3, then spin reading DT into V1
    let mut chip8 = chip8_running(&[0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07, 0x12, 0x04]);
    steps(&mut chip8, 2);
    for expected in [3, 2, 1, 0, 0] {
        steps(&mut chip8, 10);
        assert_eq!(chip8.state().v[0x1], expected);
        chip8.advance_timers();
    }
}

#[test]
fn draws_a_glyph_and_erases_it() {
    // I = glyph for V0 (0x0), draw at (V1, V2), draw again
    let mut chip8 = chip8_running(&[0x61, 0x3E, 0x62, 0x1E, 0xF0, 0x29, 0xD1, 0x25, 0xD1, 0x25]);
    steps(&mut chip8, 4);
    assert_eq!(chip8.state().v[0xF], 0);
    let frame = chip8.take_frame().unwrap();
    // Wrapped from x = 62 and y = 30
    assert_eq!(frame[30][62..64], [1, 1]);
    assert_eq!(frame[30][0..2], [1, 1]);
    assert_eq!(frame[1][0..2], [0, 1]);
    assert_eq!(frame[2][0..2], [1, 1]);

    steps(&mut chip8, 1);
    assert_eq!(chip8.state().v[0xF], 1);
    assert!(chip8.redraw_pending());
    let cleared = [[0u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    assert!(chip8.frame().iter().eq(cleared.iter()));
}

#[test]
fn same_seed_same_random_bytes() {
    let rom = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
    let mut first = chip8_running(&rom);
    let mut second = chip8_running(&rom);
    steps(&mut first, 3);
    steps(&mut second, 3);
    assert_eq!(first.state().v, second.state().v);
}

#[test]
fn rewinds_and_replays() {
    let mut chip8 = chip8_running(&[0x61, 0x01, 0x71, 0x01, 0x71, 0x01, 0x12, 0x06]);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 3);

    assert!(chip8.reverse_cpu());
    assert!(chip8.reverse_cpu());
    assert_eq!(chip8.state().v[0x1], 1);
    assert_eq!(chip8.state().pc, 0x202);

    steps(&mut chip8, 2);
    assert_eq!(chip8.state().v[0x1], 3);
}
