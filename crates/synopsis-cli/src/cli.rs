//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Synopsis: descriptive statistics for tabular datasets
#[derive(Parser)]
#[command(name = "synopsis")]
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
    /// Render the dashboard panels for a data file
    Show {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Indicator column to summarize (default: first numeric column)
        #[arg(short, long)]
        indicator: Option<String>,

        /// Keep only rows with this grouping value (repeatable)
        #[arg(short, long = "group", value_name = "VALUE")]
        groups: Vec<String>,

        /// Histogram bin count when the table has no grouping column
        #[arg(long, default_value = "10")]
        bins: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the inferred column classification
    Schema {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
