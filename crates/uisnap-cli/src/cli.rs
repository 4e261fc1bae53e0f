//! CLI argument definitions for the uisnap tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use uisnap_model::Condition;

#[derive(Parser)]
#[command(
    name = "uisnap",
    version,
    about = "Query Appium UI snapshots by element attributes",
    long_about = "Parse an Appium/XCUITest page-source XML dump and query its\n\
                  element hierarchy with attribute conditions.\n\n\
                  Matching elements are reported as flat attribute maps, with\n\
                  every ancestor listed before its own descendants."
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
    /// Find elements whose attributes satisfy every given condition.
    Query(QueryArgs),

    /// Show element counts and structure figures for a snapshot.
    Summary(SummaryArgs),
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Path to the page-source XML file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Attribute condition as KEY=VALUE; repeatable, all keys must match.
    ///
    /// A comma-separated value (`type=A,B`) accepts either value, and
    /// repeating a key (`--where type=A --where type=B`) does the same.
    #[arg(long = "where", value_name = "KEY=VALUE")]
    pub conditions: Vec<Condition>,

    /// Output format for matches.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Path to the page-source XML file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// CLI output format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
