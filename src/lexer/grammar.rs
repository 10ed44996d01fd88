//! The ordered grammar table.
//!
//! Rules are listed highest priority first. When two rules match at the
//! same position the earlier one wins, which is exactly the leftmost-first
//! alternation semantics of the `regex` crate. The automaton walks the same
//! order by hand.

use lazy_static::lazy_static;
use regex::Regex;

use super::tokens::TokenKind;

/// Operator spellings in match order. Every spelling comes before any
/// shorter spelling that is its prefix (`===` before `==` before `=`), so
/// the first hit is the longest one.
pub const OPERATORS: &[&str] = &[
    // 3
    "?->", "!==", "===", "<=>", "??=", "**=", "<<=", ">>=",
    // 2
    "::", "=>", "->", "==", "!=", "<=", ">=", "??", "&&", "||", "**", "<<", ">>",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", ".=",
    // 1
    "=", "+", "-", "*", "/", "%", "&", "|", "^", "~", "!", "<", ">", "?", ":", ".",
];

pub const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ';', ','];

pub const QUOTES: &[char] = &['\'', '"', '`'];

/// Longest spelling a tag check needs to see: `<?php` plus one character of
/// trailing context.
pub const MAX_LOOKAHEAD: usize = 5;

#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: TokenKind,
    /// Must not contain capture groups.
    pub pattern: String,
    /// Context that has to follow the lexeme but is not part of it.
    pub trailing: Option<&'static str>,
}

impl Rule {
    pub(crate) fn new(kind: TokenKind, pattern: impl Into<String>) -> Self {
        Rule { kind, pattern: pattern.into(), trailing: None }
    }

    fn followed_by(mut self, trailing: &'static str) -> Self {
        self.trailing = Some(trailing);
        self
    }
}

lazy_static! {
    pub static ref RULES: Vec<Rule> = vec![
        Rule::new(TokenKind::Whitespace, r"[ \t\n\r\x0B\x0C]+"),
        Rule::new(TokenKind::PhpTag, r"<\?php").followed_by(r"(?:[^a-zA-Z0-9_]|\z)"),
        Rule::new(TokenKind::PhpTagClose, r"\?>"),
        Rule::new(TokenKind::Comment, r"//[^\n]*|#[^\n]*|/\*(?s:.)*?\*/"),
        Rule::new(TokenKind::ErrorUnterminatedComment, r"/\*(?s:.)*"),
        Rule::new(TokenKind::String, quoted(|q| format!(r"{q}(?:[^{q}\\]|\\(?s:.))*{q}"))),
        Rule::new(
            TokenKind::ErrorUnterminatedString,
            quoted(|q| format!(r"{q}(?:[^{q}\\]|\\(?s:.))*\\?\z")),
        ),
        Rule::new(
            TokenKind::Number,
            concat!(
                r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+",
                r"|(?:[0-9][0-9_]*(?:\.[0-9][0-9_]*)?|\.[0-9][0-9_]*)(?:[eE][+-]?[0-9][0-9_]*)?",
            ),
        ),
        Rule::new(TokenKind::Variable, r"\$[a-zA-Z_][a-zA-Z0-9_]*"),
        Rule::new(TokenKind::Identifier, r"[a-zA-Z_][a-zA-Z0-9_]*"),
        Rule::new(TokenKind::Operator, alternation(OPERATORS)),
        Rule::new(
            TokenKind::Punct,
            format!(
                "[{}]",
                PUNCTUATION.iter().map(|c| regex::escape(&c.to_string())).collect::<String>()
            ),
        ),
        Rule::new(TokenKind::ErrorUnknownChar, r"(?s:.)"),
    ];

    /// Every rule wrapped in its own capture group, joined in priority order.
    /// Group `i + 1` belongs to `RULES[i]`.
    pub static ref COMBINED: Regex = compile(&RULES).expect("grammar table must compile");
}

/// Joins `rules` into one alternation, each rule in its own capture group.
pub(crate) fn compile(rules: &[Rule]) -> Result<Regex, regex::Error> {
    Regex::new(
        &rules
            .iter()
            .map(|rule| format!("({}){}", rule.pattern, rule.trailing.unwrap_or("")))
            .collect::<Vec<String>>()
            .join("|"),
    )
}

fn quoted(pattern: impl Fn(char) -> String) -> String {
    QUOTES.iter().map(|q| pattern(*q)).collect::<Vec<String>>().join("|")
}

fn alternation(spellings: &[&str]) -> String {
    spellings.iter().map(|s| regex::escape(s)).collect::<Vec<String>>().join("|")
}

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_radix_prefix(ch: char) -> bool {
    matches!(ch, 'x' | 'X' | 'b' | 'B' | 'o' | 'O')
}

/// Digits accepted after a `0x`, `0b` or `0o` prefix. Separators included.
pub fn is_radix_digit(prefix: char, ch: char) -> bool {
    match prefix {
        'x' | 'X' => ch.is_ascii_hexdigit() || ch == '_',
        'b' | 'B' => matches!(ch, '0' | '1' | '_'),
        'o' | 'O' => matches!(ch, '0'..='7' | '_'),
        _ => false,
    }
}
