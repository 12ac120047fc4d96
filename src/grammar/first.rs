use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::error::{Cycle, Result};

use super::{Grammar, Symbol};

/// FIRST sets of every non-terminal of a grammar.
///
/// A set holds terminals and, when some production of the non-terminal
/// (transitively through its first symbol) is an epsilon production,
/// [`Symbol::Epsilon`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FirstSets {
    sets: HashMap<String, BTreeSet<Symbol>>,
}

impl FirstSets {
    pub fn get(&self, non_terminal: &str) -> Option<&BTreeSet<Symbol>> {
        self.sets.get(non_terminal)
    }

    pub fn contains(&self, non_terminal: &str, symbol: &Symbol) -> bool {
        self.sets
            .get(non_terminal)
            .map_or(false, |first| first.contains(symbol))
    }
}

struct FirstSetBuilder<'g> {
    grammar: &'g Grammar,
    done: HashMap<String, BTreeSet<Symbol>>,
    in_progress: Vec<String>,
}

impl FirstSetBuilder<'_> {
    fn first_of(&mut self, non_terminal: &str) -> Result<BTreeSet<Symbol>> {
        if let Some(first) = self.done.get(non_terminal) {
            return Ok(first.clone());
        }
        if let Some(pos) = self.in_progress.iter().position(|n| n == non_terminal) {
            let mut path = self.in_progress[pos..].to_vec();
            path.push(non_terminal.to_string());
            return Err(Cycle::FirstSet { path }.into());
        }

        trace!("computing FIRST({})", non_terminal);
        self.in_progress.push(non_terminal.to_string());
        let grammar = self.grammar;
        let mut first = BTreeSet::new();
        for production in grammar.productions(non_terminal) {
            match production.head() {
                Some(Symbol::NonTerminal(next)) => first.extend(self.first_of(next)?),
                Some(symbol) => {
                    first.insert(symbol.clone());
                }
                None => {}
            }
        }
        self.in_progress.pop();

        self.done.insert(non_terminal.to_string(), first.clone());
        Ok(first)
    }
}

impl Grammar {
    /// Computes FIRST for every declared non-terminal, looking only at the
    /// first symbol of each right-hand side.
    ///
    /// A non-terminal whose FIRST set recurses into itself (left recursion,
    /// direct or not) yields [`Cycle::FirstSet`].
    pub fn first_sets(&self) -> Result<FirstSets> {
        self.validate()?;

        let mut builder = FirstSetBuilder {
            grammar: self,
            done: HashMap::new(),
            in_progress: Vec::new(),
        };
        for non_terminal in self.non_terminal_iter() {
            builder.first_of(non_terminal)?;
        }

        Ok(FirstSets {
            sets: builder.done,
        })
    }
}
