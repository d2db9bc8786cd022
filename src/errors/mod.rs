//! Diagnostics for every compilation stage.
//!
//! This module defines the single error type returned by the lexer, the
//! parser and the analyzer. It includes:
//!
//! - The located `Error` structure
//! - One `ErrorImpl` variant per diagnostic, carrying its message template
//! - Rendering of the `Line N, col M:` prefix in front of the message

pub mod errors;

#[cfg(test)]
mod tests;
