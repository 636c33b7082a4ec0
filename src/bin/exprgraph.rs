//! expr-graph - Command Line Interface
//!
//! Evaluates boolean expressions against a set of named facts supplied on
//! the command line.

use clap::Parser;
use expr_graph::Engine;
use std::collections::HashMap;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "exprgraph")]
#[command(about = "Evaluate boolean expressions over named facts", long_about = None)]
#[command(version)]
struct Args {
    /// Expressions to evaluate
    #[arg(value_name = "EXPR", required = true)]
    expressions: Vec<String>,

    /// Define a fact as NAME=true|false (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=BOOL")]
    facts: Vec<String>,

    /// Print the canonical form of each expression before its value
    #[arg(short = 'c', long = "canonical")]
    canonical: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut facts: HashMap<String, bool> = HashMap::new();
    for definition in &args.facts {
        let Some((name, value)) = definition.split_once('=') else {
            eprintln!("Invalid fact definition '{}': expected NAME=BOOL", definition);
            process::exit(2);
        };
        let Ok(value) = value.trim().parse::<bool>() else {
            eprintln!(
                "Invalid fact value in '{}': expected true or false",
                definition
            );
            process::exit(2);
        };
        facts.insert(name.trim().to_string(), value);
    }

    let engine = Engine::new();
    let mut failed = false;
    for expression in &args.expressions {
        if args.canonical {
            match engine.canonicalize(expression) {
                Ok(canonical) => print!("{} => ", canonical),
                Err(e) => {
                    eprintln!("Error in '{}': {}", expression, e);
                    failed = true;
                    continue;
                }
            }
        } else {
            print!("{} => ", expression);
        }
        match engine.evaluate(expression, &facts) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                println!("error");
                eprintln!("Error evaluating '{}': {}", expression, e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
