//! Interactive calculator session
//!
//! Lines are either a calculation (`add 2 3`, `square_root 16`) or one of the
//! history commands listed by `help`.

use anyhow::{bail, Context, Result};
use calc_core::{format_result, parse_operand, Calculator, Number, Operation, DEFAULT_TOLERANCE};
use colored::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use crate::commands::describe;

const COMMANDS: [&str; 10] = [
    "history", "stats", "last", "filter", "search", "clear", "export", "ops", "help", "quit",
];

/// REPL helper completing operation and command names
struct CalcHelper;

impl Helper for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcHelper {}

impl Validator for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Only the first word is completed
        if line.contains(' ') {
            return Ok((pos, vec![]));
        }

        Ok((0, complete_word(line)))
    }
}

fn complete_word(prefix: &str) -> Vec<Pair> {
    let prefix = prefix.to_lowercase();
    Operation::ALL
        .iter()
        .map(|op| op.name())
        .chain(COMMANDS)
        .filter(|name| name.starts_with(&prefix))
        .map(|name| Pair {
            display: name.to_string(),
            replacement: format!("{} ", name),
        })
        .collect()
}

/// Interactive REPL loop
pub fn run_repl(calc: &mut Calculator) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(CalcHelper));

    println!("{}", "Calculator REPL".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        let line = match rl.readline("calc> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        match execute_line(calc, line) {
            Ok(true) => {},
            Ok(false) => break,
            Err(e) => report(&e),
        }
    }

    println!("Bye!");
    Ok(())
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<calc_core::CalcError>() {
        Some(calc_err) => eprintln!("{} {}", "Error:".red(), describe(calc_err)),
        None => eprintln!("{} {:#}", "Error:".red(), e),
    }
}

/// Execute a single REPL line
/// Returns Ok(true) to continue, Ok(false) to quit
fn execute_line(calc: &mut Calculator, input: &str) -> Result<bool> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((&cmd, args)) = parts.split_first() else {
        return Ok(true);
    };
    let cmd = cmd.to_lowercase();

    match cmd.as_str() {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "ops" => crate::commands::ops_command(),
        "history" => println!("{}", calc.history().export_as_string()),
        "stats" => {
            let stats = calc.history().get_statistics();
            println!("Total: {}", stats.total);
            for (op, count) in &stats.operations {
                println!("  {:<14} {}", op, count);
            }
        },
        "last" => {
            let n = match args.first() {
                Some(n) => n.parse::<usize>().context("Usage: last [n]")?,
                None => 1,
            };
            print_entries(&calc.history().get_last(n));
        },
        "filter" => {
            let Some(op) = args.first() else {
                bail!("Usage: filter <operation>");
            };
            print_entries(&calc.history().filter_by_operation(op));
        },
        "search" => {
            let Some(value) = args.first() else {
                bail!("Usage: search <value> [tolerance]");
            };
            let value = parse_operand(value)?;
            let tolerance = match args.get(1) {
                Some(t) => t.parse::<f64>().context("Invalid tolerance")?,
                None => DEFAULT_TOLERANCE,
            };
            print_entries(&calc.history().search_by_result(value, tolerance));
        },
        "clear" => {
            calc.history_mut().clear();
            println!("History cleared");
        },
        "export" => match args.first().copied() {
            Some("json") => println!("{}", calc.history().export_json()?),
            _ => println!("{}", calc.history().export_as_string()),
        },
        _ => {
            let result = evaluate(calc, &cmd, args)?;
            println!(
                "{}",
                format_result(result, calc.config().display_precision)
            );
        },
    }

    Ok(true)
}

/// Treat the line as `<operation> <a> [b]`
fn evaluate(calc: &mut Calculator, operation: &str, args: &[&str]) -> Result<Number> {
    let (a, b) = match args {
        [a] => (parse_operand(a)?, None),
        [a, b] => (parse_operand(a)?, Some(parse_operand(b)?)),
        _ => bail!("Usage: <operation> <a> [b]  (type 'ops' to list operations)"),
    };
    Ok(calc.calculate(operation, a, b)?)
}

fn print_entries(entries: &[calc_core::HistoryEntry]) {
    if entries.is_empty() {
        println!("(none)");
        return;
    }
    for entry in entries {
        println!("  {}", entry);
    }
}

fn print_help() {
    println!("{}", "Calculations:".bright_cyan());
    println!("  <operation> <a> [b]      e.g. add 2 3, square_root 16");
    println!("{}", "History:".bright_cyan());
    println!("  history                  Show the full history report");
    println!("  last [n]                 Show the n most recent entries (default 1)");
    println!("  filter <operation>       Show entries for one operation");
    println!("  search <value> [tol]     Show entries whose result matches");
    println!("  stats                    Count entries per operation");
    println!("  export [json]            Print history as text or JSON");
    println!("  clear                    Empty the history");
    println!("{}", "Other:".bright_cyan());
    println!("  ops                      List supported operations");
    println!("  help                     Show this help");
    println!("  quit                     Leave the REPL");
}
