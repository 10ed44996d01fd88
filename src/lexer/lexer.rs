use regex::{Captures, Regex};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    grammar::{Rule, COMBINED, RULES},
    tokens::{reclassify, Token, TokenKind},
};

/// Pattern-driven recognizer. Each step runs the combined grammar regex from
/// the current offset and maps the capture group that took part back to its
/// rule.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    regex: &'src Regex,
    rules: &'src [Rule],
    pos: usize,
    position: Position,
    /// Token held back while a gap token in front of it is returned.
    pending: Option<Token>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer::with_grammar(source, &COMBINED, &RULES)
    }

    /// Runs over a custom rule table. Group `i + 1` of `regex` must be the
    /// group of `rules[i]`, which is what `grammar::compile` produces.
    pub(crate) fn with_grammar(
        source: &'src str,
        regex: &'src Regex,
        rules: &'src [Rule],
    ) -> Lexer<'src> {
        Lexer {
            source,
            regex,
            rules,
            pos: 0,
            position: Position::start(),
            pending: None,
            failed: false,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consumes `source[pos..end]` as a single `ERROR_UNMATCHED_TEXT` token.
    fn unmatched(&mut self, end: usize) -> Token {
        let text = &self.source[self.pos..end];
        tracing::warn!(at = %self.position, text, "grammar left text unmatched");

        let token = MK_TOKEN!(TokenKind::ErrorUnmatchedText, text.to_string(), self.position);
        self.position.advance_str(text);
        self.pos = end;
        token
    }

    fn fail(&mut self, error: ErrorImpl) -> Error {
        tracing::error!(at = %self.position, %error, "pattern recognizer invariant broken");
        self.failed = true;
        Error::new(error, self.position)
    }

    fn next_token(&mut self) -> Option<Result<Token, Error>> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }

        loop {
            if self.failed || self.at_eof() {
                return None;
            }

            let Some(captures) = self.regex.captures_at(self.source, self.pos) else {
                return Some(Ok(self.unmatched(self.source.len())));
            };

            let Some((rule, start, end)) = matched_rule(&captures, self.rules) else {
                let lexeme = captures.get(0).map_or("", |m| m.as_str()).to_string();
                return Some(Err(self.fail(ErrorImpl::UnknownGroup { lexeme })));
            };

            if end == start {
                return Some(Err(self.fail(ErrorImpl::EmptyMatch { kind: rule.kind })));
            }

            let gap = (start > self.pos).then(|| self.unmatched(start));

            let lexeme = &self.source[start..end];
            let position = self.position;
            self.position.advance_str(lexeme);
            self.pos = end;

            if rule.kind == TokenKind::Whitespace {
                match gap {
                    Some(gap) => return Some(Ok(gap)),
                    None => continue,
                }
            }

            let token = MK_TOKEN!(reclassify(rule.kind, lexeme), lexeme.to_string(), position);

            return match gap {
                Some(gap) => {
                    self.pending = Some(token);
                    Some(Ok(gap))
                }
                None => Some(Ok(token)),
            };
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// First participating rule group, with the byte range of its lexeme.
/// Trailing context sits outside the group, so the group range is used
/// rather than the whole match.
fn matched_rule<'g>(captures: &Captures, rules: &'g [Rule]) -> Option<(&'g Rule, usize, usize)> {
    let (index, group) = captures
        .iter()
        .skip(1)
        .enumerate()
        .find_map(|(index, group)| group.map(|group| (index, group)))?;

    rules.get(index).map(|rule| (rule, group.start(), group.end()))
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).collect()
}
