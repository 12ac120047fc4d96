extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;

pub use error::{Error, Result};
pub use grammar::{Grammar, ParseTable};
pub use lexer::Lexer;
pub use parser::{Parser, Translation};

use grammar::pretty_print::TranslationOutput;

fn error_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn first_sets_to_json(grammar: &str) -> String {
    let table = Grammar::parse(grammar).and_then(|g| Ok((ParseTable::new(&g)?, g)));
    match table {
        Ok((table, g)) => match table.to_first_set_output_vec(&g).to_json() {
            Ok(json) => json,
            Err(e) => error_json(e),
        },
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn parse_table_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar).and_then(|g| ParseTable::new(&g)) {
        Ok(table) => serde_json::to_string(&table.to_output()).unwrap_or_else(error_json),
        Err(e) => error_json(e),
    }
}

/// Tokenizes `expression`, normalizes it and translates it with `grammar`.
#[wasm_bindgen]
pub fn translate_to_json(grammar: &str, expression: &str) -> String {
    let translate = || -> Result<Translation> {
        let parser = Parser::new(Grammar::parse(grammar)?)?;
        let lexer = Lexer::for_grammar(parser.grammar());
        let tokens = lexer.tokenize(expression)?;
        parser.translate(&lexer.normalize(&tokens.tokens))
    };
    match translate() {
        Ok(translation) => TranslationOutput::from(&translation)
            .to_json()
            .unwrap_or_else(error_json),
        Err(e) => error_json(e),
    }
}

#[cfg(test)]
mod parse_tests {
    use crate::error::{Error, Malformation};
    use crate::grammar::Symbol;

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("S -> a").unwrap();

        assert_eq!(g.start_symbol(), Symbol::NonTerminal("S".to_string()));
        assert!(g.is_terminal("a"));
        assert_eq!(g.productions("S")[0].right, vec![Symbol::Terminal("a".to_string())]);
        assert_eq!(g.productions("S")[0].id, 1);
    }

    #[test]
    fn simple_parse_with_space_and_newline() {
        let g = crate::Grammar::parse("  S -> a \n | b c").unwrap();

        let ids: Vec<usize> = g.productions("S").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(g.productions("S")[1].to_string(), "S -> b c");
    }

    #[test]
    fn epsilon_spellings() {
        let g = crate::Grammar::parse("S -> a S | ε\nT -> e").unwrap();
        assert!(g.productions("S")[1].is_epsilon());
        assert!(g.productions("T")[0].is_epsilon());
        assert!(!g.is_terminal("e"));
    }

    #[test]
    fn empty_parse() {
        assert!(matches!(
            crate::Grammar::parse("  \n  "),
            Err(Error::MalformedGrammar(Malformation::Syntax { .. }))
        ));
    }

    #[test]
    #[should_panic]
    fn two_rightarrows_parse() {
        let _g = crate::Grammar::parse("S -> a -> b").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_left_parse() {
        let _g = crate::Grammar::parse("-> a").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_previous_left_parse() {
        let _g = crate::Grammar::parse("| a b\n S -> a").unwrap();
    }

    #[test]
    #[should_panic]
    fn left_contain_space() {
        let _g = crate::Grammar::parse("S a S -> x").unwrap();
    }

    #[test]
    fn empty_alternative() {
        assert_eq!(
            crate::Grammar::parse("S -> a |").unwrap_err(),
            Error::MalformedGrammar(Malformation::EmptyProduction(2))
        );
    }

    #[test]
    fn epsilon_must_stand_alone() {
        assert_eq!(
            crate::Grammar::parse("S -> a e").unwrap_err(),
            Error::MalformedGrammar(Malformation::MisplacedEpsilon(1))
        );
    }
}
