//! The fitted salary model.
//!
//! `SalaryModel` owns the encoding scheme it was trained with, so prediction
//! can never silently use a different level layout than the fit did.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Coefficient, EmployeeRecord};
use crate::error::AppError;
use crate::model::encoding::EncodingScheme;
use crate::model::ols::solve_least_squares;

#[derive(Debug, Clone)]
pub struct SalaryModel {
    encoding: EncodingScheme,
    coefficients: Vec<f64>,
}

impl SalaryModel {
    /// Fit `salary ~ years_experience + job_title + education_level` on the
    /// training split.
    pub fn fit(train: &[EmployeeRecord], encoding: EncodingScheme) -> Result<SalaryModel, AppError> {
        let n = train.len();
        let p = encoding.design_width();
        if n < p {
            return Err(AppError::data(format!(
                "Training split has {n} rows but the model needs at least {p} \
                 (one per coefficient)."
            )));
        }

        let mut design = DMatrix::zeros(n, p);
        let mut row = vec![0.0; p];
        for (i, record) in train.iter().enumerate() {
            encoding.fill_design_row(record, &mut row)?;
            for (j, v) in row.iter().enumerate() {
                design[(i, j)] = *v;
            }
        }

        let salaries = DVector::from_iterator(n, train.iter().map(|r| r.salary));

        let beta = solve_least_squares(&design, &salaries).ok_or_else(|| {
            AppError::model(
                "Design matrix is too ill-conditioned to fit; \
                 a category level is probably constant or duplicated.",
            )
        })?;

        Ok(SalaryModel {
            encoding,
            coefficients: beta.iter().copied().collect(),
        })
    }

    /// Predict a salary for one record.
    ///
    /// Fails if the record carries a category level outside the trained
    /// encoding.
    pub fn predict(&self, record: &EmployeeRecord) -> Result<f64, AppError> {
        let mut row = vec![0.0; self.encoding.design_width()];
        self.encoding.fill_design_row(record, &mut row)?;

        let prediction: f64 = row
            .iter()
            .zip(&self.coefficients)
            .map(|(x, beta)| x * beta)
            .sum();

        if !prediction.is_finite() {
            return Err(AppError::model("Non-finite salary prediction."));
        }
        Ok(prediction)
    }

    pub fn encoding(&self) -> &EncodingScheme {
        &self.encoding
    }

    /// Named coefficients in design-column order.
    pub fn coefficients(&self) -> Vec<Coefficient> {
        self.encoding
            .column_names()
            .into_iter()
            .zip(&self.coefficients)
            .map(|(name, value)| Coefficient {
                name,
                value: *value,
            })
            .collect()
    }
}
