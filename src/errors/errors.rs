use std::fmt::Display;

use thiserror::Error;

use crate::{
    lexer::tokens::{escape_lexeme, Token, TokenKind},
    Position,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Diagnostic for an error-kind token, `None` for every other kind.
    /// `ERROR_UNKNOWN_GROUP` never reaches a stream, so it maps to `None`.
    pub fn from_token(token: &Token) -> Option<Self> {
        let error_impl = match token.kind {
            TokenKind::ErrorUnknownChar => ErrorImpl::UnknownCharacter {
                character: token.lexeme.chars().next().unwrap_or_default(),
            },
            TokenKind::ErrorUnterminatedString => ErrorImpl::UnterminatedString {
                quote: token.lexeme.chars().next().unwrap_or_default(),
            },
            TokenKind::ErrorUnterminatedComment => ErrorImpl::UnterminatedComment,
            TokenKind::ErrorUnmatchedText => ErrorImpl::UnmatchedText {
                text: token.lexeme.clone(),
            },
            _ => return None,
        };

        Some(Error::new(error_impl, token.position))
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Internal faults of a recognizer, as opposed to problems in the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnknownGroup { .. } | ErrorImpl::EmptyMatch { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownCharacter { .. } => "UnknownCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnmatchedText { .. } => "UnmatchedText",
            ErrorImpl::UnknownGroup { .. } => "UnknownGroup",
            ErrorImpl::EmptyMatch { .. } => "EmptyMatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnknownCharacter { character } => ErrorTip::Suggestion(format!(
                "`{}` is not part of the language outside strings and comments",
                escape_lexeme(&character.to_string())
            )),
            ErrorImpl::UnterminatedString { quote } => ErrorTip::Suggestion(format!(
                "string is missing its closing {}",
                quote
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("block comment is missing its closing */"))
            }
            ErrorImpl::UnmatchedText { .. }
            | ErrorImpl::UnknownGroup { .. }
            | ErrorImpl::EmptyMatch { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unknown character: {character:?}")]
    UnknownCharacter { character: char },
    #[error("unterminated string opened with {quote:?}")]
    UnterminatedString { quote: char },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("text not covered by the grammar: {text:?}")]
    UnmatchedText { text: String },
    #[error("match maps to no grammar rule: {lexeme:?}")]
    UnknownGroup { lexeme: String },
    #[error("rule {kind} matched empty text")]
    EmptyMatch { kind: TokenKind },
}

/// Diagnostics for every error-kind token, in stream order.
pub fn diagnostics(tokens: &[Token]) -> Vec<Error> {
    tokens.iter().filter_map(Error::from_token).collect()
}
