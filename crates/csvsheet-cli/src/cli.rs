//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvsheet: import CSV files as typed spreadsheet sheets
#[derive(Parser)]
#[command(name = "csvsheet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import one or more files, one sheet per file
    Import {
        /// Files to import, in sheet order
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output path (workbook file for json, directory for csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// JSON importer configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Fallback text encoding when no BOM is present (e.g. "windows-1252")
        #[arg(long, value_name = "LABEL")]
        encoding: Option<String>,

        /// Skip files containing malformed byte sequences
        #[arg(long)]
        strict: bool,
    },

    /// Show how a single file would be imported
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// JSON importer configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Fallback text encoding when no BOM is present
        #[arg(long, value_name = "LABEL")]
        encoding: Option<String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// One CSV file per sheet in a directory
    Csv,
    /// Whole workbook as one JSON document
    #[default]
    Json,
}

impl OutputFormat {
    /// Output location used when `--output` is not given.
    pub fn default_output(&self) -> PathBuf {
        match self {
            OutputFormat::Csv => PathBuf::from("sheets"),
            OutputFormat::Json => PathBuf::from("workbook.json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
