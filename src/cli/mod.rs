//! Command-line parsing for the salary fairness analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/modeling code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fairpay",
    version,
    about = "Salary fairness analyzer (OLS fit + residual classification)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis: clean, split, fit, classify, report, plot.
    Analyze(AnalyzeArgs),
    /// Generate a synthetic salary CSV with a known generating formula.
    Sample(SampleArgs),
}

/// Options for the analysis run.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Path to the salary CSV (columns: Salary, Years of Experience,
    /// Job Title, Education Level; extra columns ignored).
    pub csv: PathBuf,

    /// Random seed for the train/test split.
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Fraction of cleaned rows used for training.
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Minimum training-set frequency for a job title to stay in the model.
    #[arg(long, default_value_t = 30)]
    pub min_title_count: usize,

    /// Sample rows printed per fairness class.
    #[arg(long, default_value_t = 5)]
    pub samples: usize,

    /// Write chart artifacts (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable chart artifacts.
    #[arg(long)]
    pub no_plot: bool,

    /// Directory for chart artifacts.
    #[arg(long, default_value = "plots")]
    pub plot_dir: PathBuf,

    /// Export per-employee classification results to this CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model (coefficients + levels + fit quality) as JSON.
    #[arg(long)]
    pub export_model: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    pub out: PathBuf,

    /// Number of rows to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed for generation.
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Standard deviation of the Gaussian salary noise.
    #[arg(long, default_value_t = 5_000.0)]
    pub noise_sd: f64,
}
