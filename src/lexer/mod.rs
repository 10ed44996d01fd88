//! Lexical analysis for PHP-like source.
//!
//! Two recognizers implement one grammar:
//!
//! - `lexer` - a single combined regex built from the grammar table
//! - `automaton` - a hand-written character-by-character scanner
//!
//! `compare` runs a differential check between their outputs. Both must
//! agree on every input, including malformed ones.

pub mod automaton;
pub mod compare;
pub mod grammar;
pub mod lexer;
pub mod tokens;
