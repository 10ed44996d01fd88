use std::fmt::Display;

use super::tokens::{escape_lexeme, Token};

/// One index where the two streams disagree. `None` means that side had
/// already run out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub left: Option<Token>,
    pub right: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub left_name: String,
    pub right_name: String,
    pub left_len: usize,
    pub right_len: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.left_len == self.right_len && self.mismatches.is_empty()
    }

    pub fn first_mismatch(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }
}

/// Walks both streams by index and records every pair whose kind or lexeme
/// differ. Positions are not compared.
pub fn compare(left_name: &str, left: &[Token], right_name: &str, right: &[Token]) -> Comparison {
    let longest = left.len().max(right.len());
    let mismatches = (0..longest)
        .filter_map(|index| {
            let (l, r) = (left.get(index), right.get(index));
            match (l, r) {
                (Some(l), Some(r)) if l.same_shape(r) => None,
                _ => Some(Mismatch {
                    index,
                    left: l.cloned(),
                    right: r.cloned(),
                }),
            }
        })
        .collect::<Vec<Mismatch>>();

    if !mismatches.is_empty() {
        tracing::debug!(
            count = mismatches.len(),
            first = mismatches[0].index,
            "token streams diverge"
        );
    }

    Comparison {
        left_name: left_name.to_string(),
        right_name: right_name.to_string(),
        left_len: left.len(),
        right_len: right.len(),
        mismatches,
    }
}

fn describe(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!("[{}] {}", token.kind, escape_lexeme(&token.lexeme)),
        None => String::from("[absent]"),
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.left_len != self.right_len {
            writeln!(
                f,
                "length mismatch: {} {} vs {} {}",
                self.left_name, self.left_len, self.right_name, self.right_len
            )?;
        }

        let width = self.left_name.len().max(self.right_name.len()) + 1;
        for mismatch in &self.mismatches {
            writeln!(f, "mismatch at token #{}:", mismatch.index)?;
            let left = format!("{}:", self.left_name);
            let right = format!("{}:", self.right_name);
            writeln!(f, "  {:<width$} {}", left, describe(&mismatch.left))?;
            writeln!(f, "  {:<width$} {}", right, describe(&mismatch.right))?;
        }

        if self.is_match() {
            writeln!(f, "ok: both recognizers produced {} identical tokens", self.left_len)?;
        }

        Ok(())
    }
}
