//! Subcommand implementations

use anyhow::{Context, Result};
use calc_core::{
    format_result, parse_batch, parse_operand, Arity, CalcError, Calculator, ChainStep, Number,
    Operation,
};
use colored::*;
use std::path::Path;
use tracing::debug;

/// Run a single calculation and print the rounded result
pub fn eval_command(
    calc: &mut Calculator,
    operation: &str,
    a: &str,
    b: Option<&str>,
    precision: Option<u32>,
) -> Result<()> {
    let a = parse_operand(a).context("Invalid first operand")?;
    let b = b
        .map(parse_operand)
        .transpose()
        .context("Invalid second operand")?;

    let result = calc.calculate(operation, a, b)?;
    let precision = precision.unwrap_or(calc.config().display_precision);
    println!("{}", format_result(result, precision));
    Ok(())
}

/// Run every item of a JSON batch file, then print the history
pub fn batch_command(calc: &mut Calculator, file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read batch file {}", file.display()))?;
    let items = parse_batch(&content)
        .with_context(|| format!("Failed to parse batch file {}", file.display()))?;
    debug!(items = items.len(), "running batch");

    let precision = calc.config().display_precision;
    let results = calc.calculate_batch(&items);

    let mut failures = 0usize;
    for (item, result) in items.iter().zip(&results) {
        let operands = item
            .operands
            .iter()
            .map(Number::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match result {
            Ok(value) => println!(
                "  {} {}({}) = {}",
                "OK".green(),
                item.operation.bright_cyan(),
                operands,
                format_result(*value, precision)
            ),
            Err(e) => {
                failures += 1;
                println!(
                    "  {} {}({}): {}",
                    "ERROR".red(),
                    item.operation.bright_cyan(),
                    operands,
                    e
                );
            },
        }
    }

    println!();
    if json {
        println!("{}", calc.history().export_json()?);
    } else {
        println!("{}", calc.history().export_as_string());
    }

    if failures > 0 {
        println!(
            "\n{} {} of {} calculations failed",
            "WARNING".yellow(),
            failures,
            results.len()
        );
    }
    Ok(())
}

/// Pipe `initial` through each `op[:operand]` step
pub fn chain_command(calc: &mut Calculator, initial: &str, steps: &[String]) -> Result<()> {
    let initial = parse_operand(initial).context("Invalid initial value")?;
    let steps = steps
        .iter()
        .map(|s| ChainStep::parse(s).with_context(|| format!("Invalid chain step '{}'", s)))
        .collect::<Result<Vec<_>>>()?;

    let result = calc.calculate_chain(initial, &steps)?;
    println!(
        "{}",
        format_result(result, calc.config().display_precision)
    );
    Ok(())
}

pub fn ops_command() {
    println!("{}", "Supported operations".bright_cyan());
    for op in Operation::ALL {
        let usage = match op.arity() {
            Arity::Unary => format!("{} <a>", op),
            Arity::Binary => format!("{} <a> <b>", op),
        };
        println!("  {:<14} {}", op.name().bright_yellow(), usage);
    }
}

/// Scripted walkthrough of the calculator
pub fn demo_command(calc: &mut Calculator) -> Result<()> {
    let precision = calc.config().display_precision;
    println!("{}", "Calculator Demo".bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_blue());

    println!("\n{}", "Basic Operations:".bright_cyan());
    let basics: [(&str, &str, i64, i64); 6] = [
        ("add", "+", 5, 3),
        ("subtract", "-", 10, 4),
        ("multiply", "*", 6, 7),
        ("divide", "/", 15, 3),
        ("power", "^", 2, 8),
        ("modulo", "%", 17, 5),
    ];
    for (op, symbol, a, b) in basics {
        let result = calc.calculate(op, Number::Int(a), Some(Number::Int(b)))?;
        println!("  {} {} {} = {}", a, symbol, b, format_result(result, precision));
    }

    println!("\n{}", "Single-operand Operations:".bright_cyan());
    let unary: [(&str, Number); 3] = [
        ("square_root", Number::Int(16)),
        ("absolute", Number::Float(-3.5)),
        ("factorial", Number::Int(10)),
    ];
    for (op, a) in unary {
        let result = calc.calculate(op, a, None)?;
        println!("  {}({}) = {}", op, a, format_result(result, precision));
    }

    println!("\n{}", "Error Handling:".bright_cyan());
    let failing: [(&str, Number, Option<Number>); 4] = [
        ("divide", Number::Int(10), Some(Number::Int(0))),
        ("invalid", Number::Int(1), Some(Number::Int(2))),
        ("add", Number::Int(1), None),
        ("factorial", Number::Float(3.5), None),
    ];
    for (op, a, b) in failing {
        match calc.calculate(op, a, b) {
            Ok(result) => println!("  {} unexpected result {}", "WARNING".yellow(), result),
            Err(e) => println!("  {} {}", "Error caught:".red(), describe(&e)),
        }
    }

    println!("\n{}", calc.history().export_as_string());

    let stats = calc.history().get_statistics();
    println!("\n{} {} calculations", "Total:".bright_cyan(), stats.total);
    for (op, count) in &stats.operations {
        println!("  {:<14} {}", op, count);
    }

    println!("\n{}", "=".repeat(50).bright_blue());
    println!("{}", "Demo complete!".green());
    Ok(())
}

/// Error text prefixed with its category
pub fn describe(e: &CalcError) -> String {
    let kind = match e {
        CalcError::Domain(_) => "domain",
        CalcError::UnknownOperation(_) => "unknown operation",
        CalcError::MissingOperand(_) | CalcError::UnexpectedOperand(_) => "arity",
        CalcError::TypeMismatch(_) => "type",
        CalcError::Overflow(_) => "overflow",
        CalcError::InvalidConfig(_) => "config",
    };
    format!("[{}] {}", kind, e)
}
