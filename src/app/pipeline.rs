//! The analysis pipeline, shared by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> clean -> group summary -> split/filter -> fit -> classify
//!
//! Each stage consumes the previous stage's output by value; there is no
//! shared mutable state, so the call sequence is the only ordering that
//! matters.

use log::{debug, info};

use crate::data::clean::{CleanSummary, CleanedData, clean_rows};
use crate::data::group::group_salary_summary;
use crate::data::split::{SplitData, filter_by_title_support, split_records};
use crate::domain::{AnalysisConfig, GroupSummary};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_salary_csv};
use crate::model::{EncodingScheme, SalaryModel};
use crate::report::fairness::{FairnessReport, classify_test_split};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub clean: CleanSummary,
    pub groups: Vec<GroupSummary>,
    pub split: SplitData,
    pub model: SalaryModel,
    pub fairness: FairnessReport,
}

/// Execute the full pipeline from a CSV path.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let ingest = load_salary_csv(&config.csv_path)?;
    run_analysis_with_rows(ingest, config)
}

/// Execute the pipeline on already-ingested rows.
///
/// This is the entry point tests use: synthetic rows go in, the whole
/// clean/split/fit/classify chain runs unchanged.
pub fn run_analysis_with_rows(
    ingest: IngestedData,
    config: &AnalysisConfig,
) -> Result<RunOutput, AppError> {
    info!(
        "ingested {} rows ({} row diagnostics)",
        ingest.rows_read,
        ingest.row_errors.len()
    );

    let CleanedData { records, summary } = clean_rows(&ingest.rows);
    if records.is_empty() {
        return Err(AppError::data("No usable rows after cleaning."));
    }
    debug!(
        "cleaning kept {} of {} rows (missing={}, invalid={})",
        summary.rows_out, summary.rows_in, summary.dropped_missing, summary.dropped_invalid
    );

    let groups = group_salary_summary(&records);

    let (train, test) = split_records(&records, config.seed, config.train_fraction)?;
    debug!("split: train={} test={}", train.len(), test.len());

    let split = filter_by_title_support(train, test, config.min_title_count)?;
    info!(
        "title filter kept {} titles (dropped {} train rows, {} test rows)",
        split.valid_titles.len(),
        split.dropped_train,
        split.dropped_test
    );

    let encoding = EncodingScheme::learn(&split.train)?;
    let model = SalaryModel::fit(&split.train, encoding)?;
    let fairness = classify_test_split(&model, &split.test)?;
    info!(
        "classified {} test rows, RMSE={:.2}",
        fairness.quality.n, fairness.quality.rmse
    );

    Ok(RunOutput {
        ingest,
        clean: summary,
        groups,
        split,
        model,
        fairness,
    })
}
