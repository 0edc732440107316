//! tbforge CLI, the command-line interface for the tbforge testbench
//! generator.
//!
//! Provides `tbforge gen` for generating driver and harness artifacts from
//! a Verilog module interface, and `tbforge inspect` for printing the
//! extracted interface as a summary or JSON.

#![warn(missing_docs)]

mod gen;
mod inspect;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Testbench generation from Verilog module interfaces.
#[derive(Parser, Debug)]
#[command(name = "tbforge", version, about = "tbforge testbench generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate driver and harness artifacts for a module.
    Gen(GenArgs),
    /// Print the extracted port interface of a module.
    Inspect(InspectArgs),
}

/// Arguments for the `tbforge gen` subcommand.
#[derive(Parser, Debug)]
pub struct GenArgs {
    /// Name of the module to generate artifacts for.
    pub module: String,

    /// Verilog source file containing the module.
    pub file: String,

    /// Directory the artifacts are written to.
    #[arg(short, long, default_value = "gen")]
    pub out_dir: String,
}

/// Arguments for the `tbforge inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Name of the module to inspect.
    pub module: String,

    /// Verilog source file containing the module.
    pub file: String,

    /// Output format for the interface report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Interface report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary text.
    Text,
    /// Machine-readable JSON port table.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print per-port detail during extraction.
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Command::Gen(ref args) => gen::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
