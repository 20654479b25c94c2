//! Row cleaning and education-label normalization.
//!
//! The contract here mirrors the ingest stage's tolerance: ingest never drops a
//! row, cleaning is the single place that decides what is usable. A row
//! survives iff all four fields are present, `salary > 0`, and
//! `years_experience >= 0`. Dropped rows are counted, not reported as errors.

use crate::domain::EmployeeRecord;
use crate::io::ingest::RawRow;

/// What happened during cleaning (for the run summary).
#[derive(Debug, Clone, Default)]
pub struct CleanSummary {
    pub rows_in: usize,
    /// Rows dropped because at least one required field was missing.
    pub dropped_missing: usize,
    /// Rows dropped for `salary <= 0` or `years_experience < 0`.
    pub dropped_invalid: usize,
    /// Rows whose education label was rewritten to a canonical spelling.
    pub education_relabelled: usize,
    pub rows_out: usize,
}

/// Cleaned rows plus the cleaning summary.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub records: Vec<EmployeeRecord>,
    pub summary: CleanSummary,
}

/// Apply the cleaning contract to raw rows.
pub fn clean_rows(rows: &[RawRow]) -> CleanedData {
    let mut summary = CleanSummary {
        rows_in: rows.len(),
        ..CleanSummary::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let (Some(salary), Some(years), Some(title), Some(education)) = (
            row.salary,
            row.years_experience,
            row.job_title.as_deref(),
            row.education_level.as_deref(),
        ) else {
            summary.dropped_missing += 1;
            continue;
        };

        if salary <= 0.0 || years < 0.0 {
            summary.dropped_invalid += 1;
            continue;
        }

        let normalized = normalize_education(education);
        if normalized != education {
            summary.education_relabelled += 1;
        }

        records.push(EmployeeRecord {
            salary,
            years_experience: years,
            job_title: title.to_string(),
            education_level: normalized,
        });
    }

    summary.rows_out = records.len();
    CleanedData { records, summary }
}

/// Collapse known education-label aliases to canonical spellings.
///
/// Unrecognized labels pass through unchanged, so non-canonical values can
/// still reach the model as their own category levels.
pub fn normalize_education(raw: &str) -> String {
    match raw {
        "High School" | "high school" => "High School".to_string(),
        "Bachelor's" | "Bachelor's Degree" => "Bachelor's".to_string(),
        "Master's" | "Master's Degree" => "Master's".to_string(),
        "PhD" | "phD" | "PHD" => "PhD".to_string(),
        other => other.to_string(),
    }
}
