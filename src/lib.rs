#![allow(clippy::module_inception)]

use std::{fmt::Display, str::FromStr, sync::Once};

use crate::{
    errors::errors::{Error, ErrorTip},
    lexer::{automaton::Automaton, lexer::Lexer, tokens::Token},
};

pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

/// 1-based line and column of a character. Columns count characters, so a
/// tab is one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance_char(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Replays already consumed text through `advance_char`.
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance_char(ch);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Which recognizer drives tokenization. Both produce the same stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Pattern,
    Automaton,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pattern" => Ok(Strategy::Pattern),
            "automaton" => Ok(Strategy::Automaton),
            other => Err(format!("unknown strategy `{}`", other)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Pattern => write!(f, "pattern"),
            Strategy::Automaton => write!(f, "automaton"),
        }
    }
}

/// Lazy token stream over either recognizer.
pub enum Tokens<'src> {
    Pattern(Lexer<'src>),
    Automaton(Automaton<'src>),
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Tokens::Pattern(lexer) => lexer.next(),
            Tokens::Automaton(automaton) => automaton.next().map(Ok),
        }
    }
}

pub fn tokens(source: &str, strategy: Strategy) -> Tokens<'_> {
    match strategy {
        Strategy::Pattern => Tokens::Pattern(Lexer::new(source)),
        Strategy::Automaton => Tokens::Automaton(Automaton::new(source)),
    }
}

/// Tokenizes `source` in one pass. Malformed input never fails: it shows up
/// as error-kind tokens. `Err` means the recognizer itself is broken.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn tokenize(source: &str, strategy: Strategy) -> Result<Vec<Token>, Error> {
    let tokens = tokens(source, strategy).collect::<Result<Vec<Token>, Error>>()?;
    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

static TRACING_INIT: Once = Once::new();

/// Installs a fmt subscriber when `RUST_LOG` is set. Safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Text of the 1-based `line` of `source`, without its line terminator.
pub fn get_line_at_position(source: &str, line: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)?)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}


/// Renders a caret diagnostic:
///
/// ```text
/// Error: UnknownCharacter (...)
/// -> demo.php
///   |
/// 3 | $bad = "ok" @ "bad";
///   | ------------^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}:{}\n", file, position));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.column.saturating_sub(removed_whitespace).max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (string.chars().skip(start).collect(), start)
}
