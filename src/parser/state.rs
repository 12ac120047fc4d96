use std::collections::VecDeque;
use std::fmt;

use log::debug;

use crate::grammar::{Action, ParseTable, RuleId, Symbol};

/// Configuration of one translation between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    /// Remaining tokens, front is the lookahead.
    pub input: VecDeque<Symbol>,
    /// Expected symbols, the last element is the top.
    pub stack: Vec<Symbol>,
    pub rules: Vec<RuleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The table holds no action for the stack top and the lookahead, not
    /// even through an epsilon production.
    NoAction,
    /// The lookahead is not a terminal of the grammar.
    UnknownToken(String),
    /// The stack or the input is empty. Only a hand-built state gets here:
    /// [`ParseState::new`] and [`ParseState::step`] keep both non-empty.
    Exhausted,
}

/// Where and why a translation stopped without accepting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub stack_top: Symbol,
    pub lookahead: Symbol,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::NoAction => write!(
                f,
                "no rule translates `{}` to `{}`",
                self.stack_top, self.lookahead
            ),
            RejectReason::UnknownToken(token) => {
                write!(f, "`{}` is not a terminal of the grammar", token)
            }
            RejectReason::Exhausted => f.write_str("parser state exhausted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(ParseState),
    Accepted(Vec<RuleId>),
    Rejected(Rejection),
}

fn is_error(action: Option<&Action>) -> bool {
    matches!(action, None | Some(Action::Error))
}

impl ParseState {
    pub fn new(start_symbol: Symbol, tokens: Vec<Symbol>) -> Self {
        let mut state = Self {
            input: tokens.into(),
            stack: vec![Symbol::EndMarker, start_symbol],
            rules: Vec::new(),
        };
        state.refill();
        state
    }

    pub fn stack_top(&self) -> Option<&Symbol> {
        self.stack.last()
    }

    pub fn lookahead(&self) -> Option<&Symbol> {
        self.input.front()
    }

    /// Once the real input is used up, epsilon stands in as the lookahead
    /// so that epsilon productions left on the stack can still fire.
    fn refill(&mut self) {
        if self.input.is_empty() && !self.stack.is_empty() {
            self.input.push_front(Symbol::Epsilon);
        }
    }

    /// Performs one table lookup and the transition it selects.
    pub fn step(mut self, table: &ParseTable) -> Step {
        let (top, lookahead) = match (self.stack.last(), self.input.front()) {
            (Some(top), Some(lookahead)) => (top.clone(), lookahead.clone()),
            (top, lookahead) => {
                return Step::Rejected(Rejection {
                    stack_top: top.cloned().unwrap_or(Symbol::EndMarker),
                    lookahead: lookahead.cloned().unwrap_or(Symbol::Epsilon),
                    reason: RejectReason::Exhausted,
                })
            }
        };

        let mut action = table.action(&top, &lookahead);
        if is_error(action) && top.is_non_terminal() {
            let retry = table.action(&top, &Symbol::Epsilon);
            if !is_error(retry) {
                debug!("`{}` has no rule for `{}`, deriving epsilon", top, lookahead);
                self.input.push_front(Symbol::Epsilon);
                action = retry;
            }
        }

        match action {
            None | Some(Action::Error) => {
                let reason = if table.has_lookahead(&lookahead) {
                    RejectReason::NoAction
                } else {
                    RejectReason::UnknownToken(lookahead.to_string())
                };
                Step::Rejected(Rejection {
                    stack_top: top,
                    lookahead,
                    reason,
                })
            }
            Some(Action::Accept) => Step::Accepted(self.rules),
            Some(Action::Match) => {
                self.stack.pop();
                self.input.pop_front();
                self.refill();
                Step::Continue(self)
            }
            Some(Action::Apply(production)) => {
                debug!("apply rule {}: {}", production.id, production);
                self.stack.pop();
                self.stack.extend(production.right.iter().rev().cloned());
                self.rules.push(production.id);
                self.refill();
                Step::Continue(self)
            }
        }
    }
}
