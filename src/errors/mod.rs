//! Error types for the lexer.
//!
//! Malformed input never stops a scan; it is reported inline as error-kind
//! tokens, which this module turns into positioned diagnostics. The only
//! hard failures are internal faults of the pattern recognizer.

pub mod errors;

#[cfg(test)]
mod tests;
