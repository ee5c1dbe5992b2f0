//! Command-line argument definitions for the AVWX processor
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the AVWX bulletin processor
///
/// Converts raw fixed-format aviation weather bulletins (METAR and TAF)
/// into structured records for inspection or downstream tooling.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "avwx-processor",
    version,
    about = "Parse METAR and TAF aviation weather bulletins into structured records",
    long_about = "Parses raw fixed-format aviation weather bulletins into structured, \
                  queryable records: METAR bodies become single observation records and \
                  TAF bodies become ordered sequences of time-bounded forecast segments \
                  with resolved validity windows."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the AVWX processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse bulletin files (or stdin) into structured records
    Parse(ParseArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Bulletin files to parse, one bulletin per file
    ///
    /// When no files are given, a single bulletin is read from stdin.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report kind to parse bulletins as
    ///
    /// `auto` treats a bulletin as TAF when it carries a ddHH/ddHH validity
    /// group or a change-group marker, and as METAR otherwise.
    #[arg(
        short = 'k',
        long = "kind",
        value_enum,
        default_value = "auto",
        help = "Report kind: metar, taf, or auto-detect"
    )]
    pub kind: ReportKind,

    /// Reference timestamp for resolving day/hour codes (RFC 3339)
    ///
    /// The wire format carries no year or month; this timestamp supplies
    /// them. Defaults to the current time.
    #[arg(
        short = 'r',
        long = "reference-time",
        value_name = "RFC3339",
        help = "Reference timestamp for day/hour resolution (defaults to now)"
    )]
    pub reference_time: Option<String>,

    /// Output format for parsed records
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for parsed records"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Report kinds accepted by the parse command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// METAR observation report
    Metar,
    /// TAF forecast report
    Taf,
    /// Detect from the bulletin body
    Auto,
}

/// Output format options for parsed records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON format for scripting
    Json,
}

impl ParseArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
