//! Splits an expression into numbers, identifiers and operators.
//!
//! Numbers and identifiers are replaced by numbered placeholders (`num0`,
//! `id0`, ...) so that a grammar over a finite vocabulary can describe them;
//! [`Lexer::normalize`] turns the placeholders into the bare `num`/`id`
//! terminals the parser expects.

use std::collections::{BTreeMap, BTreeSet};
use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::error::{Error, Result};
use crate::grammar::{ID_STR, NUM_STR};
use crate::Grammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Placeholder for numbers and identifiers, the character itself for
    /// operators.
    pub text: String,
    /// Char offset of the first character in the expression.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    /// Placeholder to source text.
    pub substitutions: BTreeMap<String, String>,
}

pub struct Lexer {
    number_str: String,
    identifier_str: String,
    operators: BTreeSet<char>,
    /// Letter runs spelling one of these are terminals, not identifiers.
    keywords: BTreeSet<String>,
}

impl Lexer {
    pub fn new(
        number_str: &str,
        identifier_str: &str,
        operators: impl IntoIterator<Item = char>,
    ) -> Self {
        Self {
            number_str: number_str.to_string(),
            identifier_str: identifier_str.to_string(),
            operators: operators.into_iter().collect(),
            keywords: BTreeSet::new(),
        }
    }

    pub fn with_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Operators are the single-character terminals of `grammar` and
    /// keywords its alphabetic terminals, so a grammar over `a` reads `a`
    /// as itself. Other numbers and identifiers map to `num` and `id`.
    pub fn for_grammar(grammar: &Grammar) -> Self {
        let operators = grammar.terminal_iter().filter_map(|t| {
            let mut chars = t.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });
        let keywords = grammar.terminal_iter().filter(|t| {
            t.chars().all(|c| c.is_ascii_alphabetic())
                && t.as_str() != NUM_STR
                && t.as_str() != ID_STR
        });
        Self::new(NUM_STR, ID_STR, operators).with_keywords(keywords.cloned())
    }

    pub fn tokenize(&self, expression: &str) -> Result<Tokenized> {
        let mut tokenized = Tokenized::default();
        let mut numbers_count = 0;
        let mut identifiers_count = 0;

        let mut chars = expression.chars().peekable();
        let mut position = 0;
        while let Some(&c) = chars.peek() {
            let start = position;
            if c.is_whitespace() {
                chars.next();
                position += 1;
                continue;
            }

            let (kind, text) = if c.is_ascii_alphabetic() {
                let raw = read_while(&mut chars, |c| c.is_ascii_alphabetic());
                position += raw.chars().count();
                if self.keywords.contains(&raw) {
                    (TokenKind::Operator, raw)
                } else {
                    let placeholder = format!("{}{}", self.identifier_str, identifiers_count);
                    identifiers_count += 1;
                    tokenized.substitutions.insert(placeholder.clone(), raw);
                    (TokenKind::Identifier, placeholder)
                }
            } else if c.is_ascii_digit() {
                let raw = read_while(&mut chars, |c| c.is_ascii_digit());
                let placeholder = format!("{}{}", self.number_str, numbers_count);
                numbers_count += 1;
                position += raw.chars().count();
                tokenized.substitutions.insert(placeholder.clone(), raw);
                (TokenKind::Number, placeholder)
            } else if self.operators.contains(&c) {
                chars.next();
                position += 1;
                (TokenKind::Operator, c.to_string())
            } else {
                debug!("unknown symbol {:?} at {}", c, position);
                return Err(Error::UnrecognizedCharacter {
                    character: c,
                    position,
                });
            };

            tokenized.tokens.push(Token {
                kind,
                text,
                position: start,
            });
        }

        Ok(tokenized)
    }

    /// Collapses placeholders to the generic `num`/`id` terminals.
    pub fn normalize(&self, tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| match token.kind {
                TokenKind::Number => self.number_str.clone(),
                TokenKind::Identifier => self.identifier_str.clone(),
                TokenKind::Operator => token.text.clone(),
            })
            .collect()
    }
}

fn read_while(chars: &mut Peekable<Chars>, accept: impl Fn(char) -> bool) -> String {
    let mut s = String::new();
    while let Some(&c) = chars.peek() {
        if !accept(c) {
            break;
        }
        s.push(c);
        chars.next();
    }
    s
}
