//! Residual-based fairness classification of the test split.
//!
//! The threshold is one number for the whole run: the RMSE of the test-set
//! predictions. A row whose actual salary falls more than one RMSE below its
//! prediction is Underpaid, more than one RMSE above is Overpaid, everything
//! in between (boundaries included) is Fairly Paid.

use crate::domain::{EmployeeRecord, FairnessRecord, FairnessStatus, FitQuality};
use crate::error::AppError;
use crate::model::SalaryModel;

/// Classified test split + the fit quality that drove the thresholds.
#[derive(Debug, Clone)]
pub struct FairnessReport {
    pub records: Vec<FairnessRecord>,
    pub quality: FitQuality,
}

impl FairnessReport {
    /// Row counts per status, in report order.
    pub fn status_counts(&self) -> Vec<(FairnessStatus, usize)> {
        FairnessStatus::ALL
            .iter()
            .map(|status| {
                let count = self.records.iter().filter(|r| r.status == *status).count();
                (*status, count)
            })
            .collect()
    }

    /// Up to `per_class` sample rows for each status, in report order.
    pub fn samples_per_status(&self, per_class: usize) -> Vec<(FairnessStatus, Vec<&FairnessRecord>)> {
        FairnessStatus::ALL
            .iter()
            .map(|status| {
                let rows: Vec<&FairnessRecord> = self
                    .records
                    .iter()
                    .filter(|r| r.status == *status)
                    .take(per_class)
                    .collect();
                (*status, rows)
            })
            .collect()
    }
}

/// Predict every test row, compute RMSE, and classify.
pub fn classify_test_split(
    model: &SalaryModel,
    test: &[EmployeeRecord],
) -> Result<FairnessReport, AppError> {
    if test.is_empty() {
        return Err(AppError::data("Test split is empty; nothing to classify."));
    }

    let mut predictions = Vec::with_capacity(test.len());
    let mut sse = 0.0;
    for record in test {
        let predicted = model.predict(record)?;
        let difference = record.salary - predicted;
        sse += difference * difference;
        predictions.push((record, predicted, difference));
    }

    let n = test.len();
    let rmse = (sse / n as f64).sqrt();

    let records = predictions
        .into_iter()
        .map(|(record, predicted, difference)| FairnessRecord {
            record: record.clone(),
            predicted_salary: predicted,
            salary_difference: difference,
            status: FairnessStatus::from_difference(difference, rmse),
        })
        .collect();

    Ok(FairnessReport {
        records,
        quality: FitQuality { sse, rmse, n },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EncodingScheme;

    fn record(salary: f64, years: f64) -> EmployeeRecord {
        EmployeeRecord {
            salary,
            years_experience: years,
            job_title: "Engineer".to_string(),
            education_level: "PhD".to_string(),
        }
    }

    /// A model trained on noise-free `salary = 1000 * years` data, so test-set
    /// residuals are fully controlled by the test salaries we choose.
    fn linear_model() -> SalaryModel {
        let train: Vec<EmployeeRecord> =
            (1..=10).map(|y| record(1_000.0 * y as f64, y as f64)).collect();
        let encoding = EncodingScheme::learn(&train).unwrap();
        SalaryModel::fit(&train, encoding).unwrap()
    }

    #[test]
    fn rmse_is_zero_on_exact_predictions() {
        let model = linear_model();
        let test = vec![record(3_000.0, 3.0), record(7_000.0, 7.0)];
        let report = classify_test_split(&model, &test).unwrap();

        assert!(report.quality.rmse.abs() < 1e-6);
        assert_eq!(report.quality.n, 2);
    }

    #[test]
    fn statuses_partition_the_test_split() {
        let model = linear_model();
        // Residuals: +2000, -2000, 0, 0 → RMSE = sqrt(2e6) ≈ 1414.
        let test = vec![
            record(7_000.0, 5.0),
            record(3_000.0, 5.0),
            record(5_000.0, 5.0),
            record(5_000.0, 5.0),
        ];
        let report = classify_test_split(&model, &test).unwrap();

        assert_eq!(report.records[0].status, FairnessStatus::Overpaid);
        assert_eq!(report.records[1].status, FairnessStatus::Underpaid);
        assert_eq!(report.records[2].status, FairnessStatus::FairlyPaid);

        let counts = report.status_counts();
        assert_eq!(counts[0], (FairnessStatus::Underpaid, 1));
        assert_eq!(counts[1], (FairnessStatus::FairlyPaid, 2));
        assert_eq!(counts[2], (FairnessStatus::Overpaid, 1));

        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, report.records.len());
    }

    #[test]
    fn difference_is_actual_minus_predicted() {
        let model = linear_model();
        let report = classify_test_split(&model, &[record(6_500.0, 5.0)]).unwrap();
        assert!((report.records[0].predicted_salary - 5_000.0).abs() < 1e-6);
        assert!((report.records[0].salary_difference - 1_500.0).abs() < 1e-6);
    }

    #[test]
    fn empty_test_split_is_a_data_error() {
        let model = linear_model();
        assert_eq!(classify_test_split(&model, &[]).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn samples_are_capped_per_class() {
        let model = linear_model();
        let test: Vec<EmployeeRecord> = (0..10).map(|_| record(5_000.0, 5.0)).collect();
        let report = classify_test_split(&model, &test).unwrap();

        let samples = report.samples_per_status(3);
        let fairly = &samples[1];
        assert_eq!(fairly.0, FairnessStatus::FairlyPaid);
        assert_eq!(fairly.1.len(), 3);
    }
}
