//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ftab",
    version,
    about = "Extract tables from messy spreadsheets by fuzzy header matching",
    long_about = "Extract tables from CSV, TSV and workbook files.\n\n\
                  Finds the header row (fixed or by seeking), binds each requested\n\
                  field to the best matching column and prints the data below it."
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

    /// Log output format.
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
    /// Print the records of a table.
    Extract(ExtractArgs),

    /// Print the resolved header row and field bindings.
    Headers(HeadersArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Print at most this many records.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Output format (csv is not available here).
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

/// Source and matching flags shared by every subcommand.
#[derive(Args)]
pub struct TableArgs {
    /// CSV, TSV or workbook file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Workbook sheet (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Field to extract; repeat for several. Without any, every header
    /// column is extracted under its own name.
    #[arg(long = "field", short = 'f', value_name = "NAME")]
    pub fields: Vec<String>,

    /// TOML file with `[table]` settings and `[[field]]` entries.
    #[arg(long = "fields-file", value_name = "FILE")]
    pub fields_file: Option<PathBuf>,

    /// Fixed header row (1-indexed).
    #[arg(long = "header-row", value_name = "N")]
    pub header_row: Option<i64>,

    /// Search the first N rows for the header (20 without a value).
    #[arg(
        long = "seek",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub seek: Option<String>,

    /// Default matching mode for fields.
    #[arg(long = "mode", value_name = "MODE")]
    pub mode: Option<String>,

    /// Default similarity threshold for approx matching, in (0, 1].
    #[arg(long = "min-ratio", value_name = "RATIO")]
    pub min_ratio: Option<f64>,

    /// Ignore case when comparing headers.
    #[arg(long = "case-insensitive")]
    pub case_insensitive: bool,

    /// Fail when a requested field has no matching column.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Leave out the synthetic `row` column.
    #[arg(long = "no-row-num")]
    pub no_row_num: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Csv,
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
