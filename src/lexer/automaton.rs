//! Hand-written recognizer.
//!
//! Scans one character at a time and decides which rule applies from a
//! lookahead window of at most [`MAX_LOOKAHEAD`] characters. The branches
//! run in grammar table order; any change to the table must be mirrored
//! here, and the differential tests will catch a mismatch.

use std::str::Chars;

use crate::{Position, MK_TOKEN};

use super::{
    grammar::{
        is_digit, is_ident_char, is_ident_start, is_radix_digit, is_radix_prefix, is_whitespace,
        MAX_LOOKAHEAD, OPERATORS, PUNCTUATION, QUOTES,
    },
    tokens::{reclassify, Token, TokenKind},
};

#[derive(Clone)]
pub struct Automaton<'src> {
    source: &'src str,
    pos: usize,
    position: Position,
}

impl<'src> Automaton<'src> {
    pub fn new(source: &'src str) -> Self {
        Automaton {
            source,
            pos: 0,
            position: Position::start(),
        }
    }

    fn rest(&self) -> Chars<'src> {
        self.source[self.pos..].chars()
    }

    /// Character `k` places ahead, without consuming anything.
    fn peek(&self, k: usize) -> Option<char> {
        debug_assert!(k <= MAX_LOOKAHEAD);
        self.rest().nth(k)
    }

    fn peek_is(&self, k: usize, predicate: impl Fn(char) -> bool) -> bool {
        self.peek(k).is_some_and(predicate)
    }

    fn starts_with(&self, spelling: &str) -> bool {
        self.source[self.pos..].starts_with(spelling)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.rest().next()?;
        self.pos += ch.len_utf8();
        self.position.advance_char(ch);
        Some(ch)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_is(0, &predicate) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        self.bump_while(is_whitespace);
    }

    /// Scans one token starting at `first`, the current character.
    fn scan(&mut self, first: char) -> TokenKind {
        if self.starts_with("<?php") && !self.peek_is(5, is_ident_char) {
            self.bump_n(5);
            return TokenKind::PhpTag;
        }
        if self.starts_with("?>") {
            self.bump_n(2);
            return TokenKind::PhpTagClose;
        }

        if self.starts_with("//") || first == '#' {
            self.bump_while(|c| c != '\n');
            return TokenKind::Comment;
        }
        if self.starts_with("/*") {
            return self.block_comment();
        }

        if QUOTES.contains(&first) {
            return self.string(first);
        }

        if is_digit(first) || (first == '.' && self.peek_is(1, is_digit)) {
            self.number();
            return TokenKind::Number;
        }

        if first == '$' && self.peek_is(1, is_ident_start) {
            self.bump();
            self.bump_while(is_ident_char);
            return TokenKind::Variable;
        }

        if is_ident_start(first) {
            self.bump_while(is_ident_char);
            return TokenKind::Identifier;
        }

        if let Some(operator) = OPERATORS.iter().find(|op| self.starts_with(op)) {
            self.bump_n(operator.chars().count());
            return TokenKind::Operator;
        }

        self.bump();
        if PUNCTUATION.contains(&first) {
            TokenKind::Punct
        } else {
            TokenKind::ErrorUnknownChar
        }
    }

    fn block_comment(&mut self) -> TokenKind {
        self.bump_n(2);
        while let Some(ch) = self.bump() {
            if ch == '*' && self.peek(0) == Some('/') {
                self.bump();
                return TokenKind::Comment;
            }
        }
        TokenKind::ErrorUnterminatedComment
    }

    /// A backslash always takes the next character with it, whatever it is.
    fn string(&mut self, quote: char) -> TokenKind {
        self.bump();
        while let Some(ch) = self.bump() {
            if ch == '\\' {
                self.bump();
            } else if ch == quote {
                return TokenKind::String;
            }
        }
        TokenKind::ErrorUnterminatedString
    }

    fn number(&mut self) {
        if let (Some('0'), Some(prefix)) = (self.peek(0), self.peek(1)) {
            if is_radix_prefix(prefix) && self.peek_is(2, |c| is_radix_digit(prefix, c)) {
                self.bump_n(2);
                self.bump_while(|c| is_radix_digit(prefix, c));
                return;
            }
        }

        let leading_dot = self.peek(0) == Some('.');
        self.bump();
        self.bump_while(|c| is_digit(c) || c == '_');

        if !leading_dot && self.peek(0) == Some('.') && self.peek_is(1, is_digit) {
            self.bump();
            self.bump_while(|c| is_digit(c) || c == '_');
        }

        if matches!(self.peek(0), Some('e' | 'E')) {
            let digit_at = if matches!(self.peek(1), Some('+' | '-')) { 2 } else { 1 };
            if self.peek_is(digit_at, is_digit) {
                self.bump_n(digit_at);
                self.bump_while(|c| is_digit(c) || c == '_');
            }
        }
    }
}

impl Iterator for Automaton<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let first = self.peek(0)?;

        let start = self.pos;
        let position = self.position;
        let kind = self.scan(first);
        let lexeme = &self.source[start..self.pos];

        Some(MK_TOKEN!(reclassify(kind, lexeme), lexeme.to_string(), position))
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    Automaton::new(source).collect()
}
