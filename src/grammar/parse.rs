use crate::error::{Malformation, Result};
use crate::Grammar;

use super::is_epsilon;

fn syntax_error(line: usize, message: &str) -> Malformation {
    Malformation::Syntax {
        line,
        message: message.to_string(),
    }
}

impl Grammar {
    /// Reads a grammar written as `A -> x y | z` lines.
    ///
    /// A line starting with `|` continues the previous left side. Symbols
    /// appearing on some left side are non-terminals, every other symbol is
    /// a terminal, and `e`/`ε` is epsilon. The first left side is the start
    /// symbol and rules are numbered from 1 in the order they are written.
    pub fn parse(grammar: &str) -> Result<Self> {
        let mut raw_productions: Vec<(&str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(syntax_error(i + 1, "too many \"->\"").into());
            }
            let (left, rights) = if parts.len() == 2 {
                let left = parts[0].trim();
                if left.is_empty() {
                    return Err(syntax_error(i + 1, "empty left side").into());
                } else if left.split_whitespace().count() != 1 {
                    return Err(syntax_error(i + 1, "left side contains whitespace").into());
                }
                (left, parts[1].trim())
            } else {
                match (previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left, rights.trim()),
                    (None, _) => return Err(syntax_error(i + 1, "cannot find left side").into()),
                    (_, None) => return Err(syntax_error(i + 1, "missing \"->\"").into()),
                }
            };

            previous_left = Some(left);
            raw_productions.push((left, rights));
        }

        let start = match raw_productions.first() {
            Some((left, _)) => *left,
            None => {
                let line = grammar.lines().count().max(1);
                return Err(syntax_error(line, "grammar has no productions").into());
            }
        };

        let mut g = Self::new(start);
        for (left, _) in &raw_productions {
            g.add_non_terminal(left)?;
        }
        for (_, rights) in &raw_productions {
            for name in rights.split('|').flat_map(|r| r.split_whitespace()) {
                if !is_epsilon(name) && g.get_symbol(name).is_none() {
                    g.add_terminal(name)?;
                }
            }
        }

        let mut id = 1;
        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<&str> = right.split_whitespace().collect();
                g.add_production(left, &symbols, id)?;
                id += 1;
            }
        }

        Ok(g)
    }
}
