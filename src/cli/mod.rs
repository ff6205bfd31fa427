//! Command-line parsing for the synthetic marketing panel tools.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! generator and the statistics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_OUTPUT, InspectConfig};
use crate::inspect::DEFAULT_BINS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mmm", version, about = "Synthetic marketing-mix panel generator and distribution inspector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the weekly region panel and write it to CSV.
    Generate(GenerateArgs),
    /// Plot column distributions of a CSV and test them for normality.
    Inspect(InspectArgs),
    /// Fit the response function back onto a panel and compare with the
    /// coefficients that generated it.
    Recover(RecoverArgs),
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Random seed; the same seed always produces the same file.
    #[arg(long, env = "MMM_SEED", default_value_t = crate::data::DEFAULT_SEED)]
    pub seed: u64,

    /// Output CSV path.
    #[arg(short, long, env = "MMM_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of rows to preview on stdout.
    #[arg(long, default_value_t = 5)]
    pub preview: usize,
}

#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    /// CSV file to inspect.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Columns to inspect (comma separated). Defaults to every numeric column.
    #[arg(long = "cols", value_delimiter = ',')]
    pub cols: Option<Vec<String>>,

    /// Skip the Shapiro-Wilk test.
    #[arg(long)]
    pub no_shapiro: bool,

    /// Histogram bins.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Also write one SVG chart per column into this directory.
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Browse the charts in an interactive terminal UI.
    #[arg(long)]
    pub tui: bool,

    /// Export the normality table (`.json` for JSON, anything else CSV).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl InspectArgs {
    pub fn to_config(&self) -> InspectConfig {
        InspectConfig {
            input: self.input.clone(),
            columns: self.cols.clone(),
            shapiro: !self.no_shapiro,
            bins: self.bins,
            plot: !self.no_plot,
            plot_width: self.width,
            plot_height: self.height,
            svg_dir: self.svg_dir.clone(),
            tui: self.tui,
            export: self.export.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct RecoverArgs {
    /// Read the panel from this CSV instead of generating it.
    #[arg(short, long, value_name = "CSV", conflicts_with = "seed")]
    pub input: Option<PathBuf>,

    /// Seed for the regenerated panel (defaults to the generator's seed).
    #[arg(long)]
    pub seed: Option<u64>,
}
