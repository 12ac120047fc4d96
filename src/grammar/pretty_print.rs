use crowbook_text_processing::escape;
use serde::Serialize;

use crate::parser::{ParseState, RejectReason, Trace, Translation};

use super::{Action, Grammar, ParseTable, RuleId, Symbol, EPSILON};

fn tex(s: &str) -> String {
    escape::tex(s).replace(EPSILON, "$\\epsilon$")
}

/// Right-aligns every column and joins cells with ` | `.
fn align_columns(output: &[Vec<String>]) -> String {
    let columns = output.first().map_or(0, |header| header.len());
    let width: Vec<usize> = (0..columns)
        .map(|j| {
            output
                .iter()
                .map(|line| line[j].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    output
        .iter()
        .map(|line| {
            line.iter()
                .enumerate()
                .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<(RuleId, Vec<&'a str>)>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .enumerate()
            .map(|(i, (id, right))| {
                let left = if i == 0 { self.left } else { "" };
                let arrow = if i == 0 { "->" } else { " |" };
                format!(
                    "({:>2}) {:>width$} {} {}",
                    id,
                    left,
                    arrow,
                    right.join(" "),
                    width = left_width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        self.rights
            .iter()
            .map(|(id, right)| {
                format!(
                    "({}) & {} & \\rightarrow & {}",
                    id,
                    tex(self.left),
                    right.iter().map(|s| tex(s)).collect::<Vec<_>>().join(" \\ ")
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{rcll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.as_str(),
                rights: self
                    .productions(nt)
                    .iter()
                    .map(|p| (p.id, p.right.iter().map(|s| s.name()).collect()))
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[derive(Debug, Clone, Serialize)]
struct FirstSetOutput<'a> {
    name: &'a str,
    first: Vec<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstSetOutputVec<'a> {
    data: Vec<FirstSetOutput<'a>>,
}

impl FirstSetOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| format!("{} | {}", s.name, s.first.join(", ")))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|s| {
                format!(
                    "{} & {}",
                    tex(s.name),
                    s.first.iter().map(|t| tex(t)).collect::<Vec<_>>().join(r"\ ")
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c}\n".to_string()
            + "Symbol & First\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl ParseTable {
    /// FIRST sets in declaration order of `grammar`'s non-terminals, epsilon
    /// listed last.
    pub fn to_first_set_output_vec<'a>(&'a self, grammar: &'a Grammar) -> FirstSetOutputVec<'a> {
        let data = grammar
            .non_terminal_iter()
            .map(|nt| {
                let mut first: Vec<&str> = Vec::new();
                let mut nullable = false;
                for symbol in self.first_sets().get(nt).into_iter().flatten() {
                    match symbol {
                        Symbol::Epsilon => nullable = true,
                        s => first.push(s.name()),
                    }
                }
                first.sort();
                if nullable {
                    first.push(EPSILON);
                }
                FirstSetOutput {
                    name: nt.as_str(),
                    first,
                }
            })
            .collect();
        FirstSetOutputVec { data }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LL1ParsingTableOutput<'a> {
    lookaheads: Vec<&'a str>,
    rows: Vec<(&'a str, Vec<String>)>,
}

impl Action {
    pub fn to_plaintext(&self) -> String {
        match self {
            Action::Match => "pop".to_string(),
            Action::Accept => "acc".to_string(),
            Action::Error => String::new(),
            Action::Apply(p) => format!("({}) {}", p.id, p),
        }
    }
}

impl LL1ParsingTableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.lookaheads.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(row.iter().cloned());
            output.push(line);
        }
        align_columns(&output)
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.lookaheads.len()),
        )];
        header.extend(
            self.lookaheads
                .iter()
                .map(|&t| format!("\\text{{{}}}", tex(t))),
        );
        let header = header.join(" & ");

        let output = self
            .rows
            .iter()
            .map(|(left, row)| {
                std::iter::once(tex(left))
                    .chain(row.iter().map(|cell| tex(cell)))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }
}

impl ParseTable {
    pub fn to_output(&self) -> LL1ParsingTableOutput<'_> {
        let rows = self
            .rows()
            .iter()
            .map(|row| {
                let cells = self
                    .lookaheads()
                    .iter()
                    .map(|lookahead| {
                        self.action(row, lookahead)
                            .map(|a| a.to_plaintext())
                            .unwrap_or_default()
                    })
                    .collect();
                (row.name(), cells)
            })
            .collect();

        LL1ParsingTableOutput {
            lookaheads: self.lookaheads().iter().map(|s| s.name()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ParseStateOutput {
    stack: Vec<String>,
    input: Vec<String>,
    rules: Vec<RuleId>,
}

impl From<&ParseState> for ParseStateOutput {
    fn from(state: &ParseState) -> Self {
        Self {
            // top of the stack first
            stack: state.stack.iter().rev().map(|s| s.to_string()).collect(),
            input: state.input.iter().map(|s| s.to_string()).collect(),
            rules: state.rules.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutput {
    Accepted {
        rules: Vec<RuleId>,
    },
    Rejected {
        stack_top: String,
        lookahead: String,
        reason: String,
    },
}

impl From<&Translation> for TranslationOutput {
    fn from(translation: &Translation) -> Self {
        match translation {
            Translation::Accepted(rules) => TranslationOutput::Accepted {
                rules: rules.clone(),
            },
            Translation::Rejected(rejection) => TranslationOutput::Rejected {
                stack_top: rejection.stack_top.to_string(),
                lookahead: rejection.lookahead.to_string(),
                reason: match &rejection.reason {
                    RejectReason::NoAction => "no_action".to_string(),
                    RejectReason::UnknownToken(_) => "unknown_token".to_string(),
                    RejectReason::Exhausted => "exhausted".to_string(),
                },
            },
        }
    }
}

impl TranslationOutput {
    pub fn to_plaintext(&self) -> String {
        match self {
            TranslationOutput::Accepted { rules } => format!(
                "Expression accepted\nFor translation used rules: {}",
                rules
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TranslationOutput::Rejected {
                stack_top,
                lookahead,
                ..
            } => format!(
                "Expression not accepted\nNo rule translates {} to {}",
                stack_top, lookahead
            ),
        }
    }

    pub fn to_latex(&self) -> String {
        match self {
            TranslationOutput::Accepted { rules } => format!(
                "Expression accepted\\\\\nRules: ${}$",
                rules
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TranslationOutput::Rejected {
                stack_top,
                lookahead,
                ..
            } => format!(
                "Expression not accepted\\\\\nNo rule translates {} to {}",
                tex(stack_top),
                tex(lookahead)
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceOutput {
    steps: Vec<ParseStateOutput>,
    outcome: TranslationOutput,
}

impl From<&Trace> for TraceOutput {
    fn from(trace: &Trace) -> Self {
        Self {
            steps: trace.states.iter().map(ParseStateOutput::from).collect(),
            outcome: TranslationOutput::from(&trace.outcome),
        }
    }
}

impl TraceOutput {
    fn cells(&self) -> Vec<Vec<String>> {
        let header = ["step", "stack", "input", "rules"].map(String::from).to_vec();
        std::iter::once(header)
            .chain(self.steps.iter().enumerate().map(|(i, s)| {
                vec![
                    i.to_string(),
                    s.stack.join(" "),
                    s.input.join(" "),
                    s.rules
                        .iter()
                        .map(|r| r.to_string())
                        .collect::<Vec<_>>()
                        .join(","),
                ]
            }))
            .collect()
    }

    pub fn to_plaintext(&self) -> String {
        align_columns(&self.cells()) + "\n" + &self.outcome.to_plaintext()
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .cells()
            .iter()
            .map(|line| {
                line.iter()
                    .map(|cell| tex(cell))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        "\\begin{tabular}{r|l|l|l}\n".to_string() + &content + "\\\\\n\\end{tabular}"
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{samples, ParseTable};
    use crate::parser::Parser;

    #[test]
    fn productions_plaintext() {
        let g = samples::expression_grammar();
        let text = g.to_production_output_vec().to_plaintext();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "( 1)  E -> T E'");
        assert_eq!(lines[1], "( 2) E' -> + T E'");
        assert_eq!(lines[3], "( 4)     | ε");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn first_sets_plaintext() {
        let g = samples::expression_grammar();
        let table = ParseTable::new(&g).unwrap();
        assert_eq!(
            table.to_first_set_output_vec(&g).to_plaintext(),
            "E | (, a\nE' | +, -, ε\nT | (, a\nT' | *, /, ε\nF | (, a"
        );
    }

    #[test]
    fn table_cells() {
        let g = samples::expression_grammar();
        let table = ParseTable::new(&g).unwrap();
        let text = table.to_output().to_plaintext();
        assert!(text.contains("(9) F -> ( E )"));
        assert!(text.contains("acc"));
    }

    #[test]
    fn rejected_json() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let translation = parser.translate(&["(", "a"]).unwrap();
        assert_eq!(
            super::TranslationOutput::from(&translation).to_json().unwrap(),
            r#"{"status":"rejected","stack_top":")","lookahead":"ε","reason":"no_action"}"#
        );
    }

    #[test]
    fn trace_plaintext_ends_with_outcome() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let trace = parser.trace(&["a"]).unwrap();
        let text = super::TraceOutput::from(&trace).to_plaintext();
        assert!(text.ends_with("For translation used rules: 1, 5, 10, 8, 4"));
        assert!(text.starts_with("step"));
    }

    #[test]
    fn translation_latex() {
        let parser = Parser::new(samples::expression_grammar()).unwrap();
        let accepted = parser.translate(&["a"]).unwrap();
        assert_eq!(
            super::TranslationOutput::from(&accepted).to_latex(),
            "Expression accepted\\\\\nRules: $1, 5, 10, 8, 4$"
        );
        let rejected = parser.translate(&["(", "a"]).unwrap();
        assert!(super::TranslationOutput::from(&rejected)
            .to_latex()
            .ends_with("No rule translates ) to $\\epsilon$"));
    }
}
