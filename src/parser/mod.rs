//! Table-driven predictive parser.
//!
//! [`Parser::translate`] runs a token sequence against the LL(1) table of a
//! grammar and reports the rules applied, in order, or where the input was
//! rejected.

pub mod config;
pub mod state;

pub use config::ParserConfig;
pub use state::{ParseState, RejectReason, Rejection, Step};

use log::{debug, warn};

use crate::error::{Cycle, Result};
use crate::grammar::{Grammar, ParseTable, RuleId, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Accepted(Vec<RuleId>),
    Rejected(Rejection),
}

impl Translation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Translation::Accepted(_))
    }

    pub fn rules(&self) -> Option<&[RuleId]> {
        match self {
            Translation::Accepted(rules) => Some(rules),
            Translation::Rejected(_) => None,
        }
    }
}

/// Every intermediate configuration of one translation, the initial one
/// first, followed by how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub states: Vec<ParseState>,
    pub outcome: Translation,
}

pub struct Parser {
    grammar: Grammar,
    table: ParseTable,
    config: ParserConfig,
}

impl Parser {
    pub fn new(grammar: Grammar) -> Result<Self> {
        Self::with_config(grammar, ParserConfig::default())
    }

    /// Builds the parse table once; it is shared by every translation.
    pub fn with_config(grammar: Grammar, config: ParserConfig) -> Result<Self> {
        let table = ParseTable::new(&grammar)?;
        Ok(Self {
            grammar,
            table,
            config,
        })
    }

    /// Translates normalized tokens (`id`, `num`, operators) into the list
    /// of rules a leftmost derivation applies.
    ///
    /// Tokens that are not terminals of the grammar end in a rejection once
    /// they become the lookahead. Only a run that exceeds the step ceiling
    /// is an error.
    pub fn translate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Translation> {
        self.run(tokens, |_| {})
    }

    pub fn trace<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Trace> {
        let mut states = Vec::new();
        let outcome = self.run(tokens, |state| states.push(state.clone()))?;
        Ok(Trace { states, outcome })
    }

    fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        mut observe: impl FnMut(&ParseState),
    ) -> Result<Translation> {
        let input: Vec<Symbol> = tokens.iter().map(|t| self.token_symbol(t.as_ref())).collect();
        debug!("translating {:?}", tokens.iter().map(|t| t.as_ref()).collect::<Vec<_>>());

        let limit = self.config.step_limit(input.len());
        let mut state = ParseState::new(self.grammar.start_symbol(), input);
        for _ in 0..limit {
            observe(&state);
            match state.step(&self.table) {
                Step::Continue(next) => state = next,
                Step::Accepted(rules) => {
                    debug!("accepted with rules {:?}", rules);
                    return Ok(Translation::Accepted(rules));
                }
                Step::Rejected(rejection) => {
                    warn!("rejected: {}", rejection);
                    return Ok(Translation::Rejected(rejection));
                }
            }
        }
        Err(Cycle::Parse { steps: limit }.into())
    }

    fn token_symbol(&self, token: &str) -> Symbol {
        match self.grammar.get_symbol(token) {
            Some(symbol @ Symbol::Terminal(_)) => symbol.clone(),
            _ => Symbol::Terminal(token.to_string()),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grammar::samples;

    fn chars(expression: &str) -> Vec<String> {
        expression.chars().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parenthesized_sum() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        assert_eq!(
            parser.translate(&chars("(a+a)")).unwrap(),
            Translation::Accepted(vec![1, 5, 9, 1, 5, 10, 8, 2, 5, 10, 8, 4, 8, 4])
        );
    }

    #[test]
    fn nested_expression() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        assert_eq!(
            parser.translate(&chars("(a*(a-a/a)+a)/a")).unwrap(),
            Translation::Accepted(vec![
                1, 5, 9, 1, 5, 10, 6, 9, 1, 5, 10, 8, 3, 5, 10, 7, 10, 8, 4, 8, 2, 5, 10, 8, 4,
                7, 10, 8, 4
            ])
        );
    }

    #[test]
    fn precedence() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        assert_eq!(
            parser.translate(&chars("a+a*a")).unwrap(),
            Translation::Accepted(vec![1, 5, 10, 8, 2, 5, 10, 6, 10, 8, 4])
        );
    }

    #[test]
    fn unbalanced_parenthesis() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        assert_eq!(
            parser.translate(&chars("(a*a")).unwrap(),
            Translation::Rejected(Rejection {
                stack_top: Symbol::Terminal(")".to_string()),
                lookahead: Symbol::Epsilon,
                reason: RejectReason::NoAction,
            })
        );
    }

    #[test]
    fn trailing_operators() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let translation = parser.translate(&chars("(a*a+++++++")).unwrap();
        assert_eq!(
            translation,
            Translation::Rejected(Rejection {
                stack_top: Symbol::NonTerminal("T".to_string()),
                lookahead: Symbol::Terminal("+".to_string()),
                reason: RejectReason::NoAction,
            })
        );
        assert_eq!(translation.rules(), None);
    }

    #[test]
    fn unknown_token() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        match parser.translate(&["a", "+", "b"]).unwrap() {
            Translation::Rejected(rejection) => {
                assert_eq!(rejection.reason, RejectReason::UnknownToken("b".to_string()))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn extra_input_after_expression() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        match parser.translate(&chars("a)")).unwrap() {
            Translation::Rejected(rejection) => {
                assert_eq!(rejection.stack_top, Symbol::EndMarker);
                assert_eq!(rejection.lookahead, Symbol::Terminal(")".to_string()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn translate_is_deterministic() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let tokens = chars("a/(a-a)");
        assert_eq!(
            parser.translate(&tokens).unwrap(),
            parser.translate(&tokens).unwrap()
        );
    }

    /// Empty input is read as a lone epsilon lookahead, so the start
    /// symbol's epsilon rule is applied and reported. The accepted rule
    /// list is `[2]`, not empty.
    #[test]
    fn empty_input_reports_start_epsilon_rule() {
        let parser = Parser::new(samples::assignment_grammar()).unwrap();
        let empty: [&str; 0] = [];
        assert_eq!(
            parser.translate(&empty).unwrap(),
            Translation::Accepted(vec![2])
        );
    }

    #[test]
    fn empty_input_without_epsilon_start() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let empty: [&str; 0] = [];
        assert!(!parser.translate(&empty).unwrap().is_accepted());
    }

    #[test]
    fn assignment_statement() {
        let parser = Parser::new(samples::assignment_grammar()).unwrap();
        assert_eq!(
            parser
                .translate(&["id", "=", "id", "+", "num", ";"])
                .unwrap(),
            Translation::Accepted(vec![1, 3, 14, 6, 14, 8, 10, 5, 15, 9, 2])
        );
    }

    #[test]
    fn epsilon_cycle_hits_step_ceiling() {
        let g = Grammar::parse("P -> Q P | e\nQ -> e").unwrap();
        let parser = Parser::with_config(
            g,
            ParserConfig {
                max_steps_per_token: 64,
            },
        )
        .unwrap();
        let empty: [&str; 0] = [];
        assert_eq!(
            parser.translate(&empty),
            Err(Error::GrammarCycle(Cycle::Parse { steps: 64 }))
        );
    }

    #[test]
    fn trace_records_every_state() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let trace = parser.trace(&["a"]).unwrap();
        assert_eq!(trace.outcome, Translation::Accepted(vec![1, 5, 10, 8, 4]));
        let first = &trace.states[0];
        assert_eq!(
            first.stack,
            vec![Symbol::EndMarker, Symbol::NonTerminal("E".to_string())]
        );
        assert_eq!(first.rules, Vec::<RuleId>::new());
        assert_eq!(trace.states.last().and_then(|s| s.stack_top()), Some(&Symbol::EndMarker));
    }

    #[test]
    fn hand_built_empty_stack_is_exhausted() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let state = ParseState {
            input: vec![Symbol::Epsilon].into(),
            stack: Vec::new(),
            rules: Vec::new(),
        };
        match state.step(parser.table()) {
            Step::Rejected(rejection) => {
                assert_eq!(rejection.reason, RejectReason::Exhausted);
                assert_eq!(rejection.lookahead, Symbol::Epsilon);
            }
            other => panic!("unexpected step {:?}", other),
        }
    }
}
