//! CLI argument definitions using clap.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tabview::ExportFormat;

/// Tabview: search, sort, page through and export tabular data
#[derive(Parser)]
#[command(name = "tabview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preferences file (default: <data dir>/.tabview/preferences.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub prefs: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of a data file
    Show {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the matching rows as JSON or CSV
    Export {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output path (default: <name>_export.<ext>, "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only the current page
        #[arg(long)]
        page_only: bool,
    },

    /// List, show, hide or move columns (saved per file)
    Columns {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Toggle visibility of a column (repeatable)
        #[arg(short, long, value_name = "COLUMN")]
        toggle: Vec<String>,

        /// Show every column
        #[arg(long, conflicts_with = "hide_all")]
        show_all: bool,

        /// Hide every column
        #[arg(long, conflicts_with = "show_all")]
        hide_all: bool,

        /// Move the column at FROM to position TO (0-based)
        #[arg(long = "move", num_args = 2, value_names = ["FROM", "TO"])]
        move_to: Option<Vec<usize>>,
    },

    /// Serve the viewer over HTTP
    Serve {
        /// Data file to load on startup
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

/// Search, sort and paging flags shared by `show` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict the search to one column
    #[arg(long, value_name = "COLUMN")]
    pub scope: Option<String>,

    /// Sort by a column
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Put every row on one page
    #[arg(long)]
    pub all: bool,

    /// Field delimiter (default: auto-detect)
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use json or csv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}
