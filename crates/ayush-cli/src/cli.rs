//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ayush-lookup",
    version,
    about = "Resolve disease names to Siddha and Unani codes",
    long_about = "Resolve free-text disease names to NAMC (Siddha) and NUMC (Unani) codes.\n\n\
                  Matching is exact, then by substring, then fuzzy. Confirmed matches are\n\
                  cross-referenced against the merged code table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API.
    Serve(ServeArgs),

    /// Resolve one disease name and print the result.
    Lookup(LookupArgs),

    /// Show how the source tables loaded.
    Tables(DataArgs),
}

/// Where the tables come from.
#[derive(Args)]
pub struct DataArgs {
    /// TOML configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the Siddha, Unani and merged CSV files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// How to treat a table missing its code or text column.
    #[arg(long = "schema-policy", value_enum)]
    pub schema_policy: Option<SchemaPolicyArg>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Address to bind.
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Port to listen on.
    #[arg(long = "port")]
    pub port: Option<u16>,

    /// Persist users and saved lookups to this JSON file.
    #[arg(long = "history-file", value_name = "PATH")]
    pub history_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Disease name to resolve.
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Maximum fuzzy suggestions.
    #[arg(long = "top-k")]
    pub top_k: Option<usize>,

    /// Minimum fuzzy score, 0 to 100.
    #[arg(long = "threshold")]
    pub threshold: Option<f64>,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaPolicyArg {
    Strict,
    Degrade,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
