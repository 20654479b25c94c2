//! CSV ingest and header resolution.
//!
//! This module is responsible for turning a heterogeneous salary-survey CSV
//! into raw rows that are safe to hand to the cleaning stage.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level tolerance**: a malformed cell becomes a missing value plus a
//!   diagnostic, so one bad row never aborts the run
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no cleaning or modeling logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// One row as read from the file, before cleaning.
///
/// Fields are optional because cleaning (not ingest) decides what to drop:
/// a blank or unparseable cell surfaces here as `None`.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// 1-based line number in the source file (for diagnostics).
    pub line: usize,
    pub salary: Option<f64>,
    pub years_experience: Option<f64>,
    pub job_title: Option<String>,
    pub education_level: Option<String>,
}

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: raw rows + diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub rows: Vec<RawRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Column indices for the four required fields.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    salary: usize,
    years_experience: usize,
    job_title: usize,
    education_level: usize,
}

/// Load the salary CSV into raw rows.
///
/// Extra columns are ignored; the four required columns are matched
/// case-insensitively and tolerate `_`/space spelling differences
/// (`Years of Experience`, `years_experience`, ...).
pub fn load_salary_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let columns = resolve_columns(&headers)?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable CSV record: {e}"),
                });
                continue;
            }
        };

        rows.push(parse_row(&record, columns, line, &mut row_errors));
    }

    Ok(IngestedData {
        rows,
        row_errors,
        rows_read,
    })
}

/// Resolve required column positions from the header row.
fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndices, AppError> {
    let mut map: HashMap<String, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins when a header is duplicated.
        map.entry(canonical_header(name)).or_insert(idx);
    }

    let lookup = |names: &[&str], label: &str| -> Result<usize, AppError> {
        names
            .iter()
            .find_map(|n| map.get(*n).copied())
            .ok_or_else(|| AppError::input(format!("CSV is missing required column '{label}'")))
    };

    Ok(ColumnIndices {
        salary: lookup(&["salary"], "Salary")?,
        years_experience: lookup(
            &["yearsofexperience", "yearsexperience", "experienceyears"],
            "Years of Experience",
        )?,
        job_title: lookup(&["jobtitle", "title"], "Job Title")?,
        education_level: lookup(&["educationlevel", "education"], "Education Level")?,
    })
}

/// Lowercase a header and strip separators so `Job Title`, `job_title`, and
/// `JobTitle` all compare equal.
fn canonical_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn parse_row(
    record: &StringRecord,
    columns: ColumnIndices,
    line: usize,
    row_errors: &mut Vec<RowError>,
) -> RawRow {
    let mut row = RawRow {
        line,
        ..RawRow::default()
    };

    row.salary = parse_numeric_cell(record, columns.salary, line, "salary", row_errors);
    row.years_experience = parse_numeric_cell(
        record,
        columns.years_experience,
        line,
        "years of experience",
        row_errors,
    );
    row.job_title = text_cell(record, columns.job_title);
    row.education_level = text_cell(record, columns.education_level);

    row
}

/// Parse a numeric cell, turning parse failures into a diagnostic + `None`.
fn parse_numeric_cell(
    record: &StringRecord,
    idx: usize,
    line: usize,
    label: &str,
    row_errors: &mut Vec<RowError>,
) -> Option<f64> {
    let raw = record.get(idx)?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("null") {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => {
            row_errors.push(RowError {
                line,
                message: format!("Non-finite {label} value '{raw}'"),
            });
            None
        }
        Err(_) => {
            row_errors.push(RowError {
                line,
                message: format!("Unparseable {label} value '{raw}'"),
            });
            None
        }
    }
}

fn text_cell(record: &StringRecord, idx: usize) -> Option<String> {
    let raw = record.get(idx)?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn header_matching_ignores_case_and_separators() {
        let headers = record(&["salary", "years_of_experience", "JOB TITLE", "Education-Level"]);
        let cols = resolve_columns(&headers).unwrap();
        assert_eq!(cols.salary, 0);
        assert_eq!(cols.years_experience, 1);
        assert_eq!(cols.job_title, 2);
        assert_eq!(cols.education_level, 3);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let headers = record(&["Employee ID", "Salary", "Age", "Years of Experience", "Job Title", "Education Level"]);
        let cols = resolve_columns(&headers).unwrap();
        assert_eq!(cols.salary, 1);
        assert_eq!(cols.years_experience, 3);
    }

    #[test]
    fn missing_required_column_is_an_input_error() {
        let headers = record(&["Salary", "Job Title", "Education Level"]);
        let err = resolve_columns(&headers).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Years of Experience"));
    }

    #[test]
    fn unparseable_numeric_cell_becomes_missing_with_diagnostic() {
        let columns = ColumnIndices {
            salary: 0,
            years_experience: 1,
            job_title: 2,
            education_level: 3,
        };
        let mut errs = Vec::new();
        let row = parse_row(&record(&["abc", "3", "Engineer", "PhD"]), columns, 2, &mut errs);
        assert!(row.salary.is_none());
        assert_eq!(row.years_experience, Some(3.0));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].line, 2);
    }

    #[test]
    fn blank_cells_are_missing_without_diagnostic() {
        let columns = ColumnIndices {
            salary: 0,
            years_experience: 1,
            job_title: 2,
            education_level: 3,
        };
        let mut errs = Vec::new();
        let row = parse_row(&record(&["", "NA", "", "Master's"]), columns, 5, &mut errs);
        assert!(row.salary.is_none());
        assert!(row.years_experience.is_none());
        assert!(row.job_title.is_none());
        assert_eq!(row.education_level.as_deref(), Some("Master's"));
        assert!(errs.is_empty());
    }
}
