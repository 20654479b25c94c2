//! Export classified results to CSV and the fitted model to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON is the "portable" representation of a fitted run
//! (`domain::ModelFile`).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ModelFile;
use crate::error::AppError;
use crate::model::SalaryModel;
use crate::report::fairness::FairnessReport;

/// Write per-employee classification results to a CSV file.
pub fn write_results_csv(path: &Path, report: &FairnessReport) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "job_title,education_level,years_experience,salary,predicted_salary,salary_difference,fairness_status"
    )
    .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for row in &report.records {
        writeln!(
            file,
            "{},{},{:.1},{:.2},{:.2},{:.2},{}",
            csv_field(&row.record.job_title),
            csv_field(&row.record.education_level),
            row.record.years_experience,
            row.record.salary,
            row.predicted_salary,
            row.salary_difference,
            row.status.display_name(),
        )
        .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the fitted model as JSON.
pub fn write_model_json(
    path: &Path,
    model: &SalaryModel,
    report: &FairnessReport,
    seed: u64,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create model JSON '{}': {e}", path.display()))
    })?;

    let model_file = ModelFile {
        tool: "fairpay".to_string(),
        seed,
        coefficients: model.coefficients(),
        job_levels: model.encoding().job_levels().to_vec(),
        education_levels: model.encoding().education_levels().to_vec(),
        quality: report.quality.clone(),
    };

    serde_json::to_writer_pretty(file, &model_file)
        .map_err(|e| AppError::input(format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file back (for comparisons between runs).
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open model JSON '{}': {e}", path.display()))
    })?;
    let model_file: ModelFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid model JSON: {e}")))?;
    Ok(model_file)
}

/// Quote a free-text field if it would break the CSV shape.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeRecord, FitQuality};
    use crate::model::EncodingScheme;
    use crate::report::fairness::classify_test_split;

    #[test]
    fn plain_fields_are_unquoted() {
        assert_eq!(csv_field("Software Engineer"), "Software Engineer");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("Sales, Regional"), "\"Sales, Regional\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn model_json_round_trips() {
        let record = |salary: f64, years: f64| EmployeeRecord {
            salary,
            years_experience: years,
            job_title: "Engineer".to_string(),
            education_level: "PhD".to_string(),
        };
        let train: Vec<EmployeeRecord> =
            (1..=6).map(|y| record(1_000.0 * y as f64, y as f64)).collect();
        let encoding = EncodingScheme::learn(&train).unwrap();
        let model = SalaryModel::fit(&train, encoding).unwrap();
        let report = classify_test_split(&model, &[record(3_500.0, 3.0)]).unwrap();

        let path = std::env::temp_dir().join("fairpay_model_roundtrip.json");
        write_model_json(&path, &model, &report, 123).unwrap();
        let loaded = read_model_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.tool, "fairpay");
        assert_eq!(loaded.seed, 123);
        assert_eq!(loaded.job_levels, vec!["Engineer".to_string()]);
        assert_eq!(loaded.coefficients.len(), model.coefficients().len());
        let FitQuality { rmse, n, .. } = loaded.quality;
        assert_eq!(n, 1);
        assert!((rmse - 500.0).abs() < 1e-6);
    }
}
