//! Canned RV32I programs used by the diagnostics.
//!
//! Each program ends in `jal x0, 0` so the core parks once it is done.

use crate::common::Word;

/// Stores 0xAA at offset 0x200 from the program counter, then spins.
pub const STORE_BYTE: [Word; 4] = [
    0x0AA0_0513, // addi x10, x0, 0xAA
    0x2000_0597, // auipc x11, 0x20000
    0x00A5_8023, // sb x10, 0(x11)
    0x0000_006F, // jal x0, 0
];

/// Counts 0..256, storing each value to consecutive bytes, then spins.
pub const COUNTING_LOOP: [Word; 8] = [
    0x0000_0513, // addi x10, x0, 0
    0x1000_0593, // addi x11, x0, 256
    0x2000_0617, // auipc x12, 0x20000
    0x00A6_0023, // sb x10, 0(x12)
    0x0015_0513, // addi x10, x10, 1
    0x0016_0613, // addi x12, x12, 1
    0xFEB5_4CE3, // blt x10, x11, -8
    0x0000_006F, // jal x0, 0
];

/// Writes a "HELLO" pattern to memory, then spins.
pub const HELLO_WORLD: [Word; 7] = [
    0x4845_4537, // lui x10, 0x48454
    0xC4C5_0513, // addi x10, x10, -948
    0x4F00_0597, // auipc x11, 0x4F000
    0x2000_0617, // auipc x12, 0x20000
    0x00A6_2023, // sw x10, 0(x12)
    0x00B6_2223, // sw x11, 4(x12)
    0x0000_006F, // jal x0, 0
];
