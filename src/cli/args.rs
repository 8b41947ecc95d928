//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::calc::CalcArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::interactive::InteractiveArgs;
use crate::cli::commands::new::NewArgs;
use crate::cli::commands::validate::ValidateArgs;

/// pricecalc - allocate fixed cost by sales volume and price for a target margin
#[derive(Parser, Debug)]
#[command(name = "pricecalc")]
#[command(version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Currency label appended to money amounts (display only)
    #[arg(long, global = true, env = "PRICECALC_CURRENCY")]
    pub currency: Option<String>,

    /// Suppress hints and decorations
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the pricing table from a worksheet, CSV rows or inline products
    Calc(CalcArgs),

    /// Write a new worksheet template
    New(NewArgs),

    /// Validate worksheet files
    Validate(ValidateArgs),

    /// Enter settings and products at prompts, then compute
    Interactive(InteractiveArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Output format for computed results
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pick based on context (table for results)
    #[default]
    Auto,
    /// Human-readable table with headline and hint
    Table,
    /// Full report as JSON
    Json,
    /// Full report as YAML
    Yaml,
    /// Product rows as CSV
    Csv,
    /// Product rows as tab-separated values
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}
