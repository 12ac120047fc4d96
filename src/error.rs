use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a grammar, its parse table, or while
/// tokenizing and translating an expression.
///
/// A parse that simply does not accept its input is not an error, see
/// [`crate::parser::Translation::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed grammar: {0}")]
    MalformedGrammar(#[from] Malformation),

    #[error("grammar cycle: {0}")]
    GrammarCycle(#[from] Cycle),

    #[error("unrecognized character {character:?} at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("`{0}` is a reserved symbol")]
    ReservedSymbol(String),

    #[error("`{0}` is declared both as a terminal and as a non-terminal")]
    VocabularyOverlap(String),

    #[error("`{0}` is not a declared non-terminal")]
    UndeclaredNonTerminal(String),

    #[error("`{0}` is neither a declared terminal nor a declared non-terminal")]
    UndeclaredSymbol(String),

    #[error("rule {0} is declared more than once")]
    DuplicateRuleId(usize),

    #[error("rule {0} has an empty right-hand side")]
    EmptyProduction(usize),

    #[error("rule {0} uses epsilon next to other symbols")]
    MisplacedEpsilon(usize),

    #[error("non-terminal `{0}` has no productions")]
    NoProductions(String),

    /// FIRST(`non_terminal`) holds `terminal` but no chain of first symbols
    /// reaches it. Unreachable while FIRST sets are built from the same
    /// productions.
    #[error("no production chain derives `{terminal}` from `{non_terminal}`")]
    MissingTranslation {
        non_terminal: String,
        terminal: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cycle {
    #[error("FIRST set depends on itself: {}", .path.join(" -> "))]
    FirstSet { path: Vec<String> },

    #[error("parse did not terminate within {steps} steps")]
    Parse { steps: usize },
}
