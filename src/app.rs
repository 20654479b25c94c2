//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints reports
//! - writes plots and optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::data::sample::{SampleConfig, generate_sample, write_sample_csv};
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fairpay` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fairpay salaries.csv` to behave like `fairpay analyze
    // salaries.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the convenient UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.clean, &config)
    );
    println!("{}", crate::report::format_group_summary(&run.groups));
    println!(
        "{}",
        crate::report::format_title_frequencies(&run.split, config.min_title_count)
    );
    println!(
        "{}",
        crate::report::format_model_summary(&run.model, &run.fairness)
    );
    println!(
        "{}",
        crate::report::format_fairness_summary(&run.fairness, config.samples_per_class)
    );

    if config.plot {
        let written = crate::plot::render_all(&config.plot_dir, &run.groups, &run.fairness)?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.fairness)?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &config.export_model {
        crate::io::export::write_model_json(path, &run.model, &run.fairness, config.seed)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let rows = generate_sample(&SampleConfig {
        count: args.count,
        seed: args.seed,
        noise_sd: args.noise_sd,
    })?;
    write_sample_csv(&args.out, &rows)?;
    println!(
        "Wrote {} synthetic rows to {} (seed={}, noise sd={:.0})",
        rows.len(),
        args.out.display(),
        args.seed,
        args.noise_sd
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        csv_path: args.csv.clone(),
        seed: args.seed,
        train_fraction: args.train_fraction,
        min_title_count: args.min_title_count,
        samples_per_class: args.samples,
        plot: args.plot && !args.no_plot,
        plot_dir: args.plot_dir.clone(),
        export_results: args.export.clone(),
        export_model: args.export_model.clone(),
    }
}

/// Rewrite argv so a bare CSV path means `analyze`.
///
/// Rules:
/// - `fairpay salaries.csv ...`    -> `fairpay analyze salaries.csv ...`
/// - `fairpay --help/--version`    -> unchanged (top-level help/version)
/// - explicit subcommands          -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "sample");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}
