//! Program loading.
//!
//! Provides the loader that writes instruction words into peer memory over the transport,
//! the reset sequence, and the canned programs the diagnostics exercise.

pub mod loader;
pub mod programs;

pub use loader::{load_program, parse_program, reset_core, write_word};
