//! calc - command-line front end for calc-core
//!
//! Single calculations, JSON batches, chains, an interactive REPL and a
//! scripted demo, all going through the same `Calculator`.

mod commands;
mod repl;

use anyhow::{bail, Result};
use calc_core::{CalcConfig, Calculator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Arithmetic calculator with calculation history")]
#[command(long_about = "Arithmetic calculator with calculation history

Commands:
  eval        Run a single calculation
  batch       Run every calculation in a JSON batch file
  chain       Pipe a value through a sequence of operations
  repl        Interactive session with history commands
  demo        Walk through the supported operations
  ops         List supported operations

Examples:
  calc eval add 2 3                      # 5
  calc eval square_root 16               # 4.0
  calc chain 2 power:10 subtract:24      # 1000
  calc batch ops.json                    # [[\"add\", 1, 2], [\"factorial\", 5]]

Configuration is read from --config (TOML/YAML/JSON) and CALC_* environment variables.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single calculation
    Eval {
        /// Operation name, e.g. add or square_root
        operation: String,

        /// First operand
        #[arg(allow_hyphen_values = true)]
        a: String,

        /// Second operand (binary operations only)
        #[arg(allow_hyphen_values = true)]
        b: Option<String>,

        /// Decimal places to display (default from config)
        #[arg(short, long)]
        precision: Option<u32>,
    },

    /// Run every calculation in a JSON batch file
    Batch {
        /// JSON array of [op, a, b?] tuples or {operation, operands} objects
        file: PathBuf,

        /// Print the history as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Pipe a value through a sequence of operations
    Chain {
        /// Starting value
        #[arg(allow_hyphen_values = true)]
        initial: String,

        /// Steps as op or op:operand, e.g. multiply:3 square_root
        #[arg(required = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },

    /// Interactive session with history commands
    Repl,

    /// Walk through the supported operations
    Demo,

    /// List supported operations
    Ops,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.config.as_deref() {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let config = CalcConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "starting calc");
    let mut calc = Calculator::new(config)?;

    match cli.command {
        Commands::Eval {
            operation,
            a,
            b,
            precision,
        } => commands::eval_command(&mut calc, &operation, &a, b.as_deref(), precision)?,
        Commands::Batch { file, json } => commands::batch_command(&mut calc, &file, json)?,
        Commands::Chain { initial, steps } => {
            commands::chain_command(&mut calc, &initial, &steps)?
        },
        Commands::Repl => repl::run_repl(&mut calc)?,
        Commands::Demo => commands::demo_command(&mut calc)?,
        Commands::Ops => commands::ops_command(),
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is not set
fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), "debug");
        assert_eq!(log_level(false), "info");
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["calc", "-v", "eval", "add", "2", "3"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Eval { ref operation, .. } if operation == "add"));
    }
}
