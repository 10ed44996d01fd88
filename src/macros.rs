//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! Both recognizers build every token through it.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The exact source text consumed
/// * `$position` - Position of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Position::start());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $position:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            lexeme: $lexeme,
            position: $position,
        }
    };
}
