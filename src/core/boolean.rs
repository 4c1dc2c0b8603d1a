//! # Boolean Expressions
//!
//! Parses and evaluates infix Boolean expressions over single-letter
//! variables.
//!
//! ## Notation
//!
//! | Operator | Accepted glyphs | Canonical |
//! |----------|-----------------|-----------|
//! | AND      | `∧` `&`         | `∧`       |
//! | OR       | `∨` `\|`        | `∨`       |
//! | NOT      | `¬` `~`         | `¬`       |
//! | XOR      | `⊕` `^`         | `⊕`       |
//!
//! ## Precedence
//!
//! From loosest to tightest: OR, XOR, AND, prefix NOT. Parentheses group.
//!
//! ```text
//! Or      := Xor ('|' Xor)*
//! Xor     := And ('^' And)*
//! And     := Not ('&' Not)*
//! Not     := '~' Primary | Primary
//! Primary := '(' Or ')' | '0' | '1'
//! ```
//!
//! ## Malformed input
//!
//! [`BoolExpr::evaluate`] never fails: anything the grammar rejects evaluates
//! to `false`. [`BoolExpr::evaluate_strict`] reports the problem instead.

use std::collections::BTreeMap;

use thiserror::Error;

/// Variable name → truth value. Keys are matched case-insensitively.
pub type Assignment = BTreeMap<char, bool>;

/// Multi-letter operator words that are never variables.
pub const RESERVED_WORDS: &[&str] = &["AND", "OR", "NOT", "XOR", "NAND", "NOR", "XNOR"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("expression ends where an operand was expected")]
    UnexpectedEnd,
    #[error("parenthesis opened at position {pos} is never closed")]
    UnclosedParen { pos: usize },
    #[error("unexpected '{ch}' after a complete expression at position {pos}")]
    Trailing { ch: char, pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolExpr {
    source: String,
    normalized: String,
    variables: Vec<char>,
}

impl BoolExpr {
    pub fn new(text: &str) -> Self {
        Self {
            source: text.to_string(),
            normalized: normalize(text),
            variables: extract_variables(text),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Distinct variables, lowercase, ascending.
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    /// Evaluate under `assignment`. Malformed expressions are `false`;
    /// variables missing from the assignment are `false`.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.evaluate_strict(assignment).unwrap_or(false)
    }

    pub fn evaluate_strict(&self, assignment: &Assignment) -> Result<bool, ParseError> {
        let compact = self.substitute(assignment);
        Parser::new(&compact).parse()
    }

    /// Replace every standalone variable with `1`/`0` and map canonical
    /// glyphs to the single-byte operator alphabet the parser reads.
    fn substitute(&self, assignment: &Assignment) -> Vec<char> {
        let mut out = Vec::with_capacity(self.normalized.len());
        for token in word_tokens(&self.normalized) {
            match token {
                Token::Word(word) => {
                    let mut chars = word.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => {
                            let var = c.to_ascii_lowercase();
                            if self.variables.contains(&var) {
                                out.push(if lookup(assignment, var) { '1' } else { '0' });
                            } else {
                                out.push(c);
                            }
                        }
                        _ => out.extend(word.chars()),
                    }
                }
                Token::Other(c) => out.push(match c {
                    '∧' => '&',
                    '∨' => '|',
                    '¬' => '~',
                    '⊕' => '^',
                    other => other,
                }),
            }
        }
        out
    }
}

fn lookup(assignment: &Assignment, var: char) -> bool {
    assignment
        .get(&var)
        .or_else(|| assignment.get(&var.to_ascii_uppercase()))
        .copied()
        .unwrap_or(false)
}

/// Strip whitespace, fold operator glyphs to one canonical symbol each, and
/// uppercase.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '&' => '∧',
            '|' => '∨',
            '~' => '¬',
            '^' => '⊕',
            other => other,
        })
        .flat_map(char::to_uppercase)
        .collect()
}

/// Standalone single Latin letters, case-folded, deduplicated and sorted.
pub fn extract_variables(text: &str) -> Vec<char> {
    let mut vars: Vec<char> = word_tokens(text)
        .filter_map(|token| match token {
            Token::Word(word) if word.len() == 1 => word.chars().next(),
            _ => None,
        })
        .filter(|c| c.is_ascii_alphabetic())
        .filter(|c| {
            let upper = c.to_ascii_uppercase().to_string();
            !RESERVED_WORDS.contains(&upper.as_str())
        })
        .map(|c| c.to_ascii_lowercase())
        .collect();
    vars.sort_unstable();
    vars.dedup();
    vars
}

enum Token<'a> {
    /// Maximal run of `[A-Za-z0-9_]`.
    Word(&'a str),
    Other(char),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word_tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let c = rest.chars().next()?;
        if is_word_char(c) {
            let end = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(end);
            rest = tail;
            Some(Token::Word(word))
        } else {
            rest = &rest[c.len_utf8()..];
            Some(Token::Other(c))
        }
    })
}

/// Recursive-descent parser over the compact alphabet `0 1 & | ^ ~ ( )`.
struct Parser<'a> {
    input: &'a [char],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [char]) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<bool, ParseError> {
        let value = self.parse_or()?;
        match self.peek() {
            None => Ok(value),
            Some(ch) => Err(ParseError::Trailing { ch, pos: self.pos }),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<bool, ParseError> {
        let mut value = self.parse_xor()?;
        while self.eat('|') {
            let rhs = self.parse_xor()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn parse_xor(&mut self) -> Result<bool, ParseError> {
        let mut value = self.parse_and()?;
        while self.eat('^') {
            let rhs = self.parse_and()?;
            value ^= rhs;
        }
        Ok(value)
    }

    fn parse_and(&mut self) -> Result<bool, ParseError> {
        let mut value = self.parse_not()?;
        while self.eat('&') {
            let rhs = self.parse_not()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn parse_not(&mut self) -> Result<bool, ParseError> {
        if self.eat('~') {
            return self.parse_primary().map(|v| !v);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<bool, ParseError> {
        let start = self.pos;
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                let value = self.parse_or()?;
                if self.eat(')') {
                    Ok(value)
                } else {
                    Err(ParseError::UnclosedParen { pos: start })
                }
            }
            Some('0') => {
                self.pos += 1;
                Ok(false)
            }
            Some('1') => {
                self.pos += 1;
                Ok(true)
            }
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: start }),
        }
    }
}
