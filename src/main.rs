use std::{fs, io::BufRead, process};

use ll1_translator::grammar::pretty_print::{TraceOutput, TranslationOutput};
use ll1_translator::grammar::samples;
use ll1_translator::{Grammar, Lexer, Parser};

fn print_help() {
    println!("Usage: ll1-translator outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  first: First sets");
    println!("  ll1: LL(1) parsing table");
    println!("  parse: Translate expressions read from stdin, one per line");
    println!("  trace: Like parse, printing every parser step");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("Without a grammar file the built-in assignment grammar is used,");
    println!("accepting expressions like 'x=y + 7; y=2+2; w=x+y;'.");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn to_json<T: serde::Serialize>(t: &T) -> String {
    serde_json::to_string(t).unwrap_or_else(|e| fail(e))
}

fn main() {
    env_logger::init();

    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    let known_outputs = ["prod", "first", "ll1", "parse", "trace"];
    while i < args.len() && known_outputs.contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let grammar = if i == args.len() {
        samples::try_assignment_grammar()
    } else {
        let text = fs::read_to_string(args[i].as_str()).unwrap_or_else(|e| fail(e));
        Grammar::parse(&text)
    };
    let parser = grammar
        .and_then(Parser::new)
        .unwrap_or_else(|e| fail(e));
    let lexer = Lexer::for_grammar(parser.grammar());

    for output in outputs {
        match output {
            "prod" => {
                let t = parser.grammar().to_production_output_vec();
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => to_json(&t),
                    }
                );
            }
            "first" => {
                let t = parser.table().to_first_set_output_vec(parser.grammar());
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => to_json(&t),
                    }
                );
            }
            "ll1" => {
                let t = parser.table().to_output();
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => to_json(&t),
                    }
                );
            }
            "parse" | "trace" => {
                for line in std::io::stdin().lock().lines() {
                    let expression = line.unwrap_or_else(|e| fail(e));
                    let tokenized = match lexer.tokenize(&expression) {
                        Ok(tokenized) => tokenized,
                        Err(e) => {
                            eprintln!("{}", e);
                            continue;
                        }
                    };
                    if let OutputFormat::Plain = output_format {
                        let tokens: Vec<&str> =
                            tokenized.tokens.iter().map(|t| t.text.as_str()).collect();
                        println!("Found tokens: {:?}", tokens);
                        println!("Made substitutions: {:?}", tokenized.substitutions);
                    }

                    let tokens = lexer.normalize(&tokenized.tokens);
                    let text = if output == "trace" {
                        let trace = parser.trace(&tokens).unwrap_or_else(|e| fail(e));
                        let t = TraceOutput::from(&trace);
                        match output_format {
                            OutputFormat::Plain => t.to_plaintext(),
                            OutputFormat::LaTeX => t.to_latex(),
                            OutputFormat::JSON => to_json(&t),
                        }
                    } else {
                        let t = TranslationOutput::from(
                            &parser.translate(&tokens).unwrap_or_else(|e| fail(e)),
                        );
                        match output_format {
                            OutputFormat::Plain => t.to_plaintext(),
                            OutputFormat::LaTeX => t.to_latex(),
                            OutputFormat::JSON => to_json(&t),
                        }
                    };
                    println!("{}\n", text);
                }
            }
            _ => unreachable!(),
        }
    }
}
