//! Program loader and single-word operations.
//!
//! This module writes instruction words into peer memory. It performs:
//! 1. **Program loading:** Consecutive frame writes from a base address, in order.
//! 2. **Reset:** Fills the first slots with no-ops so the core idles.
//! 3. **Listing parsing:** Reads a program from a text listing, one word per line.
//!
//! Loading fails fast: the first bus error aborts the remaining writes. Words already
//! written stay in peer memory; there is no rollback.

use tracing::{debug, info, warn};

use crate::bus::{Delay, SpiBus, Transport};
use crate::common::constants::{NOP, RESET_LEN};
use crate::common::{BusError, MemAddr, ProgramParseError, Word};

/// Writes `program` into peer memory starting at `base`.
///
/// The word at offset `i` lands at `base + i`, wrapping modulo 256. Each write completes,
/// including its completion delay, before the next begins.
///
/// # Arguments
///
/// * `transport` - Exclusive session to the peer.
/// * `program` - Instruction words in load order.
/// * `base` - Address of the first word.
///
/// # Errors
///
/// Returns the first [`BusError`] unchanged; later words are not written.
pub fn load_program<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
    program: &[Word],
    base: MemAddr,
) -> Result<(), BusError> {
    info!(words = program.len(), base = base.val(), "loading program");
    if base.wraps_with(program.len()) {
        warn!(
            words = program.len(),
            base = base.val(),
            "program crosses address 255 and wraps to 0"
        );
    }

    for (i, &word) in program.iter().enumerate() {
        let addr = base.offset(i);
        transport.write_word(addr, word)?;
        debug!("[{addr}] {word:#010X}");
    }

    info!(base = base.val(), "program loaded");
    Ok(())
}

/// Writes a single word.
///
/// # Errors
///
/// Returns the [`BusError`] of the underlying write.
pub fn write_word<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
    address: MemAddr,
    data: Word,
) -> Result<(), BusError> {
    transport.write_word(address, data)?;
    info!("wrote {data:#010X} to address {}", address.val());
    Ok(())
}

/// Overwrites addresses 0..16 with the `addi x0, x0, 0` no-op.
///
/// # Errors
///
/// Returns the first [`BusError`]; remaining slots keep their old contents.
pub fn reset_core<B: SpiBus, D: Delay>(transport: &mut Transport<B, D>) -> Result<(), BusError> {
    load_program(transport, &[NOP; RESET_LEN], MemAddr::MIN)?;
    info!("core reset ({RESET_LEN} no-ops loaded)");
    Ok(())
}

/// Parses a program listing.
///
/// One word per line, hexadecimal with a `0x` prefix or decimal. Text after `#` or `//`
/// is a comment; blank lines are skipped. Underscores inside numbers are ignored.
///
/// # Errors
///
/// Returns the first line that does not hold a 32-bit number, or
/// [`ProgramParseError::TooLong`] if the listing exceeds the 256-slot address space.
pub fn parse_program(listing: &str) -> Result<Vec<Word>, ProgramParseError> {
    let mut words = Vec::new();
    for (idx, raw) in listing.lines().enumerate() {
        let code = raw
            .split('#')
            .next()
            .and_then(|s| s.split("//").next())
            .unwrap_or_default()
            .trim();
        if code.is_empty() {
            continue;
        }
        let word = parse_word(code).ok_or_else(|| ProgramParseError::InvalidWord {
            line: idx + 1,
            text: code.to_string(),
        })?;
        words.push(word);
    }
    if words.len() > usize::from(u8::MAX) + 1 {
        return Err(ProgramParseError::TooLong(words.len()));
    }
    Ok(words)
}

/// Parses a decimal or `0x`-prefixed hexadecimal 32-bit number.
pub fn parse_word(text: &str) -> Option<Word> {
    let clean: String = text.chars().filter(|&c| c != '_').collect();
    match clean
        .strip_prefix("0x")
        .or_else(|| clean.strip_prefix("0X"))
    {
        Some(hex) => Word::from_str_radix(hex, 16).ok(),
        None => clean.parse().ok(),
    }
}
