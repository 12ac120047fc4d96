use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{Error, Malformation, Result};

use super::{is_epsilon, END_MARK, EPSILON};

pub type RuleId = usize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Epsilon,
    EndMarker,
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
            Symbol::Epsilon => EPSILON,
            Symbol::EndMarker => END_MARK,
        }
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One alternative of a non-terminal. `right` is never empty; an epsilon
/// production is `[Symbol::Epsilon]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub id: RuleId,
    pub left: String,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn head(&self) -> Option<&Symbol> {
        self.right.first()
    }

    pub fn is_epsilon(&self) -> bool {
        self.right == [Symbol::Epsilon]
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let right = self
            .right
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} -> {}", self.left, right)
    }
}

/// A context-free grammar over a fixed vocabulary.
///
/// Terminals and non-terminals keep their declaration order, and so do the
/// productions of each non-terminal: when several productions could start
/// with the same terminal, the first one declared wins.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: Vec<String>,
    non_terminals: Vec<String>,
    symbol_table: HashMap<String, Symbol>,
    rules: HashMap<String, Vec<Production>>,
    rule_ids: HashSet<RuleId>,
    start_symbol: String,
}

impl Grammar {
    pub fn new(start_symbol: &str) -> Self {
        Self {
            terminals: Vec::new(),
            non_terminals: Vec::new(),
            symbol_table: HashMap::new(),
            rules: HashMap::new(),
            rule_ids: HashSet::new(),
            start_symbol: start_symbol.to_string(),
        }
    }

    pub fn add_terminal(&mut self, name: &str) -> Result<Symbol> {
        match self.declare(name)? {
            Some(symbol @ Symbol::Terminal(_)) => Ok(symbol),
            Some(_) => Err(Malformation::VocabularyOverlap(name.to_string()).into()),
            None => {
                let symbol = Symbol::Terminal(name.to_string());
                self.terminals.push(name.to_string());
                self.symbol_table.insert(name.to_string(), symbol.clone());
                Ok(symbol)
            }
        }
    }

    pub fn add_non_terminal(&mut self, name: &str) -> Result<Symbol> {
        match self.declare(name)? {
            Some(symbol @ Symbol::NonTerminal(_)) => Ok(symbol),
            Some(_) => Err(Malformation::VocabularyOverlap(name.to_string()).into()),
            None => {
                let symbol = Symbol::NonTerminal(name.to_string());
                self.non_terminals.push(name.to_string());
                self.symbol_table.insert(name.to_string(), symbol.clone());
                Ok(symbol)
            }
        }
    }

    pub fn add_terminals<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.add_terminal(name)?;
        }
        Ok(())
    }

    pub fn add_non_terminals<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        for name in names {
            self.add_non_terminal(name)?;
        }
        Ok(())
    }

    /// Returns the already declared symbol for `name`, if any.
    fn declare(&self, name: &str) -> Result<Option<Symbol>> {
        if is_epsilon(name) || name == END_MARK {
            return Err(Malformation::ReservedSymbol(name.to_string()).into());
        }
        Ok(self.symbol_table.get(name).cloned())
    }

    /// Appends a production `left -> right` with rule identifier `id`.
    ///
    /// Every name on the right-hand side must already be declared, except
    /// the epsilon spellings `ε` and `e`, which must stand alone.
    pub fn add_production(&mut self, left: &str, right: &[&str], id: RuleId) -> Result<()> {
        if self.symbol_table.get(left).map_or(true, |s| !s.is_non_terminal()) {
            return Err(Malformation::UndeclaredNonTerminal(left.to_string()).into());
        }
        if right.is_empty() {
            return Err(Malformation::EmptyProduction(id).into());
        }
        if self.rule_ids.contains(&id) {
            return Err(Malformation::DuplicateRuleId(id).into());
        }

        let right = right
            .iter()
            .map(|name| {
                if is_epsilon(name) {
                    Ok(Symbol::Epsilon)
                } else {
                    self.symbol_table.get(*name).cloned().ok_or_else(|| {
                        Error::from(Malformation::UndeclaredSymbol(name.to_string()))
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        if right.len() > 1 && right.contains(&Symbol::Epsilon) {
            return Err(Malformation::MisplacedEpsilon(id).into());
        }

        self.rule_ids.insert(id);
        self.rules
            .entry(left.to_string())
            .or_default()
            .push(Production {
                id,
                left: left.to_string(),
                right,
            });
        Ok(())
    }

    /// Checks the whole-grammar invariants: the start symbol and every
    /// non-terminal used on a right-hand side must have productions.
    pub fn validate(&self) -> Result<()> {
        match self.symbol_table.get(&self.start_symbol) {
            Some(Symbol::NonTerminal(_)) => {}
            _ => {
                return Err(
                    Malformation::UndeclaredNonTerminal(self.start_symbol.clone()).into(),
                )
            }
        }

        let referenced = std::iter::once(self.start_symbol.as_str()).chain(
            self.production_iter()
                .flat_map(|p| p.right.iter())
                .filter_map(|s| s.non_terminal()),
        );
        for name in referenced {
            if self.productions(name).is_empty() {
                return Err(Malformation::NoProductions(name.to_string()).into());
            }
        }
        Ok(())
    }

    pub fn start_symbol(&self) -> Symbol {
        Symbol::NonTerminal(self.start_symbol.clone())
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.non_terminals.iter()
    }

    pub fn productions(&self, non_terminal: &str) -> &[Production] {
        self.rules
            .get(non_terminal)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// All productions, grouped by non-terminal in declaration order.
    pub fn production_iter(&self) -> impl Iterator<Item = &Production> {
        self.non_terminals
            .iter()
            .flat_map(move |nt| self.productions(nt).iter())
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbol_table.get(name)
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        matches!(self.symbol_table.get(name), Some(Symbol::Terminal(_)))
    }
}
