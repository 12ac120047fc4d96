pub mod first;
pub mod grammar;
pub mod ll1_parsing_table;
pub mod parse;
pub mod pretty_print;
pub mod samples;

pub use first::FirstSets;
pub use grammar::{Grammar, Production, RuleId, Symbol};
pub use ll1_parsing_table::{Action, ParseTable};

pub const EPSILON: &str = "ε";
/// ASCII spelling of [`EPSILON`] accepted wherever a grammar is written by hand.
pub const EPSILON_ASCII: &str = "e";
pub const END_MARK: &str = "$";
/// Terminal every number token normalizes to.
pub const NUM_STR: &str = "num";
/// Terminal every identifier token normalizes to.
pub const ID_STR: &str = "id";

pub(crate) fn is_epsilon(name: &str) -> bool {
    name == EPSILON || name == EPSILON_ASCII
}
