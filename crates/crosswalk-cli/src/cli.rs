//! CLI argument definitions for the crosswalk tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crosswalk",
    version,
    about = "Map EnableNSW assistive technology categories to NDIS support items",
    long_about = "Map EnableNSW assistive technology categories to NDIS support items.\n\n\
                  Reads an EnableNSW category list and an NDIS code guide (CSV, spreadsheet\n\
                  or word-processor tables), matches entries by keyword rules and fuzzy\n\
                  similarity, and writes a crosswalk report."
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
    /// Run the crosswalk and write the report.
    Run(RunArgs),

    /// List the effective mapping rules.
    Rules(RulesArgs),

    /// Show how a source file's columns resolve.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// EnableNSW category list (csv, xlsx, xls, ods or docx).
    #[arg(long = "enablensw", value_name = "FILE")]
    pub enablensw: PathBuf,

    /// NDIS assistive technology code guide (csv, xlsx, xls, ods or docx).
    #[arg(long = "ndis", value_name = "FILE")]
    pub ndis: PathBuf,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// TOML rule set replacing the configured rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Minimum fuzzy similarity score (60-95).
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<u8>,

    /// Link repair and maintenance codes to matched items.
    #[arg(long = "repair-codes")]
    pub repair_codes: bool,

    /// Directory for report files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "crosswalk-output")]
    pub output_dir: PathBuf,

    /// Report files to write.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// TOML rule set to show instead of the built-in rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Source file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Which schema to resolve the file against.
    #[arg(long = "kind", value_enum)]
    pub kind: SourceKindArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Csv,
    Json,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceKindArg {
    Ndis,
    Enablensw,
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
