use std::collections::HashMap;

use log::debug;

use crate::error::{Malformation, Result};

use super::{FirstSets, Grammar, Production, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The terminal on top of the stack equals the lookahead; consume both.
    Match,
    Accept,
    Error,
    /// Replace the non-terminal on top of the stack with this right-hand side.
    Apply(Production),
}

/// Predictive parsing table, indexed by (stack symbol, lookahead).
///
/// Rows are the non-terminals, the terminals, epsilon and the end marker.
/// Columns are the terminals plus epsilon, which stands for "no real
/// lookahead left".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    rows: Vec<Symbol>,
    lookaheads: Vec<Symbol>,
    actions: HashMap<(Symbol, Symbol), Action>,
    first: FirstSets,
}

impl ParseTable {
    pub fn new(grammar: &Grammar) -> Result<Self> {
        let first = grammar.first_sets()?;

        let mut lookaheads: Vec<Symbol> = grammar
            .terminal_iter()
            .map(|t| Symbol::Terminal(t.clone()))
            .collect();
        lookaheads.push(Symbol::Epsilon);

        let rows: Vec<Symbol> = grammar
            .non_terminal_iter()
            .map(|nt| Symbol::NonTerminal(nt.clone()))
            .chain(lookaheads.iter().cloned())
            .chain(std::iter::once(Symbol::EndMarker))
            .collect();

        let mut actions = HashMap::new();
        for row in &rows {
            for lookahead in &lookaheads {
                let action = match row {
                    Symbol::NonTerminal(nt) if first.contains(nt, lookahead) => {
                        let production = grammar
                            .find_translation(&first, nt, lookahead)
                            .and_then(|chain| chain.into_iter().next())
                            .ok_or_else(|| Malformation::MissingTranslation {
                                non_terminal: nt.clone(),
                                terminal: lookahead.to_string(),
                            })?;
                        Action::Apply(production.clone())
                    }
                    Symbol::NonTerminal(_) => Action::Error,
                    Symbol::EndMarker if *lookahead == Symbol::Epsilon => Action::Accept,
                    Symbol::EndMarker => Action::Error,
                    _ if row == lookahead => Action::Match,
                    _ => Action::Error,
                };
                actions.insert((row.clone(), lookahead.clone()), action);
            }
        }
        debug!(
            "built LL(1) table: {} rows x {} lookaheads",
            rows.len(),
            lookaheads.len()
        );

        Ok(Self {
            rows,
            lookaheads,
            actions,
            first,
        })
    }

    /// `None` when `lookahead` is not a column of the table.
    pub fn action(&self, top: &Symbol, lookahead: &Symbol) -> Option<&Action> {
        self.actions.get(&(top.clone(), lookahead.clone()))
    }

    pub fn has_lookahead(&self, symbol: &Symbol) -> bool {
        self.lookaheads.contains(symbol)
    }

    pub fn rows(&self) -> &[Symbol] {
        &self.rows
    }

    pub fn lookaheads(&self) -> &[Symbol] {
        &self.lookaheads
    }

    pub fn first_sets(&self) -> &FirstSets {
        &self.first
    }
}

impl Grammar {
    /// Finds the chain of productions that takes `non_terminal` to a
    /// sentential form starting with `terminal`, following first symbols only.
    ///
    /// Productions are tried in declaration order and the first chain found
    /// wins. `None` if `terminal` is not in FIRST(`non_terminal`).
    pub fn find_translation(
        &self,
        first: &FirstSets,
        non_terminal: &str,
        terminal: &Symbol,
    ) -> Option<Vec<&Production>> {
        if !first.contains(non_terminal, terminal) {
            return None;
        }

        for production in self.productions(non_terminal) {
            match production.head() {
                Some(Symbol::NonTerminal(next)) => {
                    if let Some(mut chain) = self.find_translation(first, next, terminal) {
                        chain.insert(0, production);
                        return Some(chain);
                    }
                }
                Some(head) if head == terminal => return Some(vec![production]),
                _ => continue,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{samples, Action, ParseTable, Symbol};

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(name.to_string())
    }

    fn nt(name: &str) -> Symbol {
        Symbol::NonTerminal(name.to_string())
    }

    #[test]
    fn end_marker_row_accepts_only_epsilon() {
        let table = ParseTable::new(&samples::expression_grammar()).unwrap();
        for lookahead in table.lookaheads() {
            let expected = if *lookahead == Symbol::Epsilon {
                Action::Accept
            } else {
                Action::Error
            };
            assert_eq!(table.action(&Symbol::EndMarker, lookahead), Some(&expected));
        }
    }

    #[test]
    fn error_iff_not_in_first() {
        let g = samples::expression_grammar();
        let table = ParseTable::new(&g).unwrap();
        for name in g.non_terminal_iter() {
            for lookahead in table.lookaheads() {
                let is_error = table.action(&nt(name), lookahead) == Some(&Action::Error);
                assert_eq!(
                    is_error,
                    !table.first_sets().contains(name, lookahead),
                    "{} / {}",
                    name,
                    lookahead
                );
            }
        }
    }

    #[test]
    fn terminal_rows_match_themselves() {
        let table = ParseTable::new(&samples::expression_grammar()).unwrap();
        assert_eq!(table.action(&t("+"), &t("+")), Some(&Action::Match));
        assert_eq!(table.action(&t("+"), &t("-")), Some(&Action::Error));
        assert_eq!(
            table.action(&Symbol::Epsilon, &Symbol::Epsilon),
            Some(&Action::Match)
        );
        assert_eq!(table.action(&t("a"), &t("num")), None);
    }

    #[test]
    fn apply_uses_head_of_translation_chain() {
        let table = ParseTable::new(&samples::expression_grammar()).unwrap();
        match table.action(&nt("E"), &t("(")) {
            Some(Action::Apply(p)) => assert_eq!(p.id, 1),
            other => panic!("unexpected action {:?}", other),
        }
        match table.action(&nt("T'"), &Symbol::Epsilon) {
            Some(Action::Apply(p)) => assert_eq!(p.id, 8),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn translation_chain() {
        let g = samples::expression_grammar();
        let first = g.first_sets().unwrap();
        let chain: Vec<usize> = g
            .find_translation(&first, "E", &t("("))
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(chain, vec![1, 5, 9]);
        assert!(g.find_translation(&first, "E", &t("+")).is_none());
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let g = samples::assignment_grammar();
        assert_eq!(ParseTable::new(&g).unwrap(), ParseTable::new(&g).unwrap());
    }
}
