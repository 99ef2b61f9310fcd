//! # fidl-json
//!
//! Command-line front end that reads a resolved library in its JSON
//! interchange form and writes the canonical JSON IR.
//!
//! ## Commands
//!
//! - `fidl-json generate <INPUT> [-o OUTPUT] [--strict]` - Write the JSON IR
//! - `fidl-json check <INPUT>` - Summarize a library and check name uniqueness
//!
//! See `fidl-json --help` for the full command reference.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "fidl-json")]
#[command(about = "Emit the canonical JSON IR for a resolved FIDL library", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logs on stderr)
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the JSON IR for a resolved library
    Generate {
        /// Resolved library in JSON interchange form
        input: PathBuf,

        /// Output file (writes to stdout if not specified)
        #[arg(short, long, env = "FIDL_JSON_OUTPUT")]
        output: Option<PathBuf>,

        /// Fail instead of emitting when two declarations share a name
        #[arg(long)]
        strict: bool,
    },

    /// Summarize a resolved library and check that declaration names are unique
    Check {
        /// Resolved library in JSON interchange form
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            strict,
        } => commands::generate::generate(&input, output.as_deref(), strict),
        Commands::Check { input } => commands::check::check(&input),
    }
}
