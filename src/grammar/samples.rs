//! Grammars shipped with the crate.

use super::{Grammar, ID_STR, NUM_STR};
use crate::error::Result;

/// `E -> T E'`, `E' -> + T E' | - T E' | e`, `T -> F T'`,
/// `T' -> * F T' | / F T' | e`, `F -> ( E ) | a`, rules 1 to 10.
pub const EXPRESSION_GRAMMAR: &str = "
E  -> T E'
E' -> + T E' | - T E' | e
T  -> F T'
T' -> * F T' | / F T' | e
F  -> ( E ) | a
";

/// Assignment statements separated by `;`, e.g. `x=y + 7; y=2+2; w=x+y;`.
pub fn try_assignment_grammar() -> Result<Grammar> {
    let mut g = Grammar::new("P");
    g.add_non_terminals(["P", "O", "I", "E", "E'", "N", "A"])?;
    g.add_terminals(["+", "-", "*", "/", "(", ")", "=", ";", ID_STR, NUM_STR])?;

    g.add_production("P", &["O", ";", "P"], 1)?;
    g.add_production("P", &["e"], 2)?;
    // `O -> E` would need two tokens of lookahead, so rule 4 is left out.
    g.add_production("O", &["I", "=", "E"], 3)?;
    g.add_production("E", &["N", "E'"], 5)?;
    g.add_production("E", &["I", "E'"], 6)?;
    g.add_production("E", &["(", "E", ")", "E'"], 7)?;
    g.add_production("E'", &["A", "E"], 8)?;
    g.add_production("E'", &["e"], 9)?;
    g.add_production("A", &["+"], 10)?;
    g.add_production("A", &["-"], 11)?;
    g.add_production("A", &["*"], 12)?;
    g.add_production("A", &["/"], 13)?;
    g.add_production("I", &[ID_STR], 14)?;
    g.add_production("N", &[NUM_STR], 15)?;
    Ok(g)
}

pub fn try_expression_grammar() -> Result<Grammar> {
    Grammar::parse(EXPRESSION_GRAMMAR)
}

#[cfg(test)]
pub(crate) fn assignment_grammar() -> Grammar {
    try_assignment_grammar().unwrap()
}

#[cfg(test)]
pub(crate) fn expression_grammar() -> Grammar {
    try_expression_grammar().unwrap()
}
