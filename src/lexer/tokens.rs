use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Position;

lazy_static! {
    /// Reserved spellings that turn an `IDENT` into a `KEYWORD`. Matching is
    /// case-sensitive.
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for keyword in KEYWORDS {
            set.insert(*keyword);
        }
        set
    };
}

pub const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "enddeclare",
    "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "extends", "final",
    "finally", "fn", "for", "foreach", "function", "global", "goto", "if", "implements",
    "include", "include_once", "instanceof", "insteadof", "interface", "isset", "list",
    "match", "namespace", "new", "or", "print", "private", "protected", "public", "require",
    "require_once", "return", "static", "switch", "throw", "trait", "try", "unset", "use",
    "var", "while", "xor", "yield", "true", "false", "null",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Matched by the grammar but never emitted.
    Whitespace,
    PhpTag,
    PhpTagClose,
    Comment,
    String,
    Number,
    Variable,
    Identifier,
    Keyword,
    Operator,
    Punct,

    // Errors
    ErrorUnterminatedString,
    ErrorUnterminatedComment,
    ErrorUnknownChar,
    /// Gap between two pattern matches. Only the pattern recognizer can
    /// produce it, and only if the grammar is not total.
    ErrorUnmatchedText,
    /// A match that maps back to no rule. Reported as a fatal error, never
    /// emitted as a token.
    ErrorUnknownGroup,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::PhpTag => "PHP_TAG",
            TokenKind::PhpTagClose => "PHP_TAG_CLOSE",
            TokenKind::Comment => "COMMENT",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Identifier => "IDENT",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Punct => "PUNCT",
            TokenKind::ErrorUnterminatedString => "ERROR_UNTERMINATED_STRING",
            TokenKind::ErrorUnterminatedComment => "ERROR_UNTERMINATED_COMMENT",
            TokenKind::ErrorUnknownChar => "ERROR_UNKNOWN_CHAR",
            TokenKind::ErrorUnmatchedText => "ERROR_UNMATCHED_TEXT",
            TokenKind::ErrorUnknownGroup => "ERROR_UNKNOWN_GROUP",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TokenKind::ErrorUnterminatedString
                | TokenKind::ErrorUnterminatedComment
                | TokenKind::ErrorUnknownChar
                | TokenKind::ErrorUnmatchedText
                | TokenKind::ErrorUnknownGroup
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keyword reclassification. Anything that is not an identifier passes
/// through untouched.
pub fn reclassify(kind: TokenKind, lexeme: &str) -> TokenKind {
    if kind == TokenKind::Identifier && RESERVED_LOOKUP.contains(lexeme) {
        TokenKind::Keyword
    } else {
        kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}:{}>\t[{}]\t{}",
            self.position.line,
            self.position.column,
            self.kind,
            escape_lexeme(&self.lexeme)
        )
    }
}

impl Token {
    /// Kind and lexeme agree. Positions are ignored.
    pub fn same_shape(&self, other: &Token) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme
    }
}

/// Makes a lexeme printable on one line: `\n`, `\r` and `\t` are escaped and
/// anything outside printable ASCII becomes `?`.
pub fn escape_lexeme(lexeme: &str) -> String {
    let mut result = String::with_capacity(lexeme.len());

    for ch in lexeme.chars() {
        match ch {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            ' '..='~' => result.push(ch),
            _ => result.push('?'),
        }
    }

    result
}
