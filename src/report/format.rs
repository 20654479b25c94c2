//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline/model code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::data::clean::CleanSummary;
use crate::data::split::SplitData;
use crate::domain::{AnalysisConfig, GroupSummary};
use crate::io::ingest::IngestedData;
use crate::model::SalaryModel;
use crate::report::fairness::FairnessReport;

/// Format the run header: ingest + cleaning summary.
pub fn format_run_summary(
    ingest: &IngestedData,
    clean: &CleanSummary,
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== fairpay - Salary Fairness Analysis ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Seed: {} | train fraction: {:.2} | min title count: {}\n",
        config.seed, config.train_fraction, config.min_title_count
    ));
    out.push_str(&format!(
        "Rows: read={} | cleaned={} | dropped: missing={} invalid={}\n",
        ingest.rows_read, clean.rows_out, clean.dropped_missing, clean.dropped_invalid
    ));
    out.push_str(&format!(
        "Education labels rewritten to canonical spelling: {}\n",
        clean.education_relabelled
    ));
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Row diagnostics: {} (first: line {}: {})\n",
            ingest.row_errors.len(),
            ingest.row_errors[0].line,
            ingest.row_errors[0].message
        ));
    }

    out
}

/// Format the per-experience-group salary table.
pub fn format_group_summary(groups: &[GroupSummary]) -> String {
    let mut out = String::new();

    out.push_str("Average salary by experience group:\n");
    out.push_str(&format!("{:<8} {:>6} {:>14}\n", "group", "n", "mean salary"));
    out.push_str(&format!("{:-<8} {:-<6} {:-<14}\n", "", "", ""));
    for summary in groups {
        out.push_str(&format!(
            "{:<8} {:>6} {:>14.2}\n",
            summary.group.display_name(),
            summary.count,
            summary.mean_salary
        ));
    }

    out
}

/// Format the job-title frequency tables (descending, plus an ascending
/// appendix) and what the support filter did.
pub fn format_title_frequencies(split: &SplitData, min_title_count: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Job-title frequency in training split (minimum kept: {min_title_count}):\n"
    ));
    out.push_str(&format!("{:<28} {:>6}  {}\n", "job title", "n", "kept"));
    out.push_str(&format!("{:-<28} {:-<6}  {:-<4}\n", "", "", ""));
    for (title, count) in &split.title_counts {
        let kept = if split.valid_titles.contains(title) { "yes" } else { "no" };
        out.push_str(&format!("{title:<28} {count:>6}  {kept}\n"));
    }

    out.push_str("\nAscending appendix (rarest first):\n");
    for (title, count) in split.title_counts.iter().rev() {
        out.push_str(&format!("{title:<28} {count:>6}\n"));
    }

    out.push_str(&format!(
        "\nRows dropped by title filter: train={} test={}\n",
        split.dropped_train, split.dropped_test
    ));
    out.push_str(&format!(
        "Rows after filter: train={} test={}\n",
        split.train.len(),
        split.test.len()
    ));

    out
}

/// Format the fitted coefficients and test-set fit quality.
pub fn format_model_summary(model: &SalaryModel, report: &FairnessReport) -> String {
    let mut out = String::new();

    out.push_str("Model: salary ~ years_experience + job_title + education_level\n");
    out.push_str(&format!(
        "Reference levels: job_title={} | education_level={}\n",
        model.encoding().job_levels()[0],
        model.encoding().education_levels()[0]
    ));
    out.push_str(&format!("{:<40} {:>14}\n", "coefficient", "estimate"));
    out.push_str(&format!("{:-<40} {:-<14}\n", "", ""));
    for coefficient in model.coefficients() {
        out.push_str(&format!(
            "{:<40} {:>14.2}\n",
            coefficient.name, coefficient.value
        ));
    }

    out.push_str(&format!(
        "\nTest-set fit: n={} | SSE={:.2} | RMSE={:.2}\n",
        report.quality.n, report.quality.sse, report.quality.rmse
    ));

    out
}

/// Format the fairness classification: counts plus sample rows per class.
pub fn format_fairness_summary(report: &FairnessReport, samples_per_class: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Fairness classification (threshold: ±RMSE = ±{:.2}):\n",
        report.quality.rmse
    ));
    out.push_str(&format!("{:<12} {:>6}\n", "status", "n"));
    out.push_str(&format!("{:-<12} {:-<6}\n", "", ""));
    for (status, count) in report.status_counts() {
        out.push_str(&format!("{:<12} {count:>6}\n", status.display_name()));
    }

    for (status, rows) in report.samples_per_status(samples_per_class) {
        if rows.is_empty() {
            continue;
        }
        out.push_str(&format!("\nSample rows — {}:\n", status.display_name()));
        out.push_str(&format!(
            "{:<28} {:<14} {:>6} {:>12} {:>12} {:>12}\n",
            "job title", "education", "years", "salary", "predicted", "difference"
        ));
        out.push_str(&format!(
            "{:-<28} {:-<14} {:-<6} {:-<12} {:-<12} {:-<12}\n",
            "", "", "", "", "", ""
        ));
        for row in rows {
            out.push_str(&format!(
                "{:<28} {:<14} {:>6.1} {:>12.2} {:>12.2} {:>12.2}\n",
                row.record.job_title,
                row.record.education_level,
                row.record.years_experience,
                row.record.salary,
                row.predicted_salary,
                row.salary_difference
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::split::filter_by_title_support;
    use crate::domain::{EmployeeRecord, ExperienceGroup};

    fn record(title: &str) -> EmployeeRecord {
        EmployeeRecord {
            salary: 50_000.0,
            years_experience: 5.0,
            job_title: title.to_string(),
            education_level: "PhD".to_string(),
        }
    }

    #[test]
    fn group_table_lists_all_groups() {
        let groups = vec![
            GroupSummary {
                group: ExperienceGroup::Years0To2,
                mean_salary: 48_000.0,
                count: 12,
            },
            GroupSummary {
                group: ExperienceGroup::Years20Plus,
                mean_salary: 110_000.0,
                count: 3,
            },
        ];
        let text = format_group_summary(&groups);
        assert!(text.contains("0–2"));
        assert!(text.contains("20+"));
        assert!(text.contains("48000.00"));
    }

    #[test]
    fn frequency_table_marks_dropped_titles() {
        let train = vec![record("Engineer"), record("Engineer"), record("Rare")];
        let test = vec![record("Engineer")];
        let split = filter_by_title_support(train, test, 2).unwrap();

        let text = format_title_frequencies(&split, 2);
        assert!(text.contains("Engineer"));
        assert!(text.contains("Rare"));
        assert!(text.contains("Ascending appendix"));
        // Descending table lists Engineer before Rare; appendix reverses.
        let desc = text.find("Engineer").unwrap();
        let rare = text.find("Rare").unwrap();
        assert!(desc < rare);
    }
}
