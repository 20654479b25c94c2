//! Reference-level dummy encoding for the categorical predictors.
//!
//! The level sets are learned from the TRAINING split only and then applied to
//! every row that needs encoding, train or test. A level outside the scheme is
//! an explicit error at encoding time, never a silent fallback: the split
//! stage's title filter makes unseen job titles impossible in practice, so
//! hitting this error means a pipeline invariant was broken upstream.
//!
//! Design-row layout (the model's coefficient order):
//!
//! ```text
//! [ intercept | years_experience | job dummies (levels[1..]) | education dummies (levels[1..]) ]
//! ```
//!
//! The first (alphabetically lowest) level of each categorical is the
//! reference and is absorbed into the intercept.

use std::collections::BTreeSet;

use crate::domain::EmployeeRecord;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct EncodingScheme {
    job_levels: Vec<String>,
    education_levels: Vec<String>,
}

impl EncodingScheme {
    /// Learn the level sets from the training split.
    pub fn learn(train: &[EmployeeRecord]) -> Result<EncodingScheme, AppError> {
        if train.is_empty() {
            return Err(AppError::data("Cannot learn an encoding from an empty training split."));
        }

        let job_levels: BTreeSet<&str> = train.iter().map(|r| r.job_title.as_str()).collect();
        let education_levels: BTreeSet<&str> =
            train.iter().map(|r| r.education_level.as_str()).collect();

        Ok(EncodingScheme {
            job_levels: job_levels.into_iter().map(str::to_string).collect(),
            education_levels: education_levels.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn job_levels(&self) -> &[String] {
        &self.job_levels
    }

    pub fn education_levels(&self) -> &[String] {
        &self.education_levels
    }

    /// Number of columns in a design row.
    pub fn design_width(&self) -> usize {
        2 + (self.job_levels.len() - 1) + (self.education_levels.len() - 1)
    }

    /// Names for each design column, in coefficient order.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.design_width());
        names.push("intercept".to_string());
        names.push("years_experience".to_string());
        for level in &self.job_levels[1..] {
            names.push(format!("job_title={level}"));
        }
        for level in &self.education_levels[1..] {
            names.push(format!("education_level={level}"));
        }
        names
    }

    /// Fill `out` with the design row for `record`.
    ///
    /// `out` must have length `design_width()`. Fails if the record carries a
    /// category level the scheme was not trained on.
    pub fn fill_design_row(&self, record: &EmployeeRecord, out: &mut [f64]) -> Result<(), AppError> {
        debug_assert_eq!(out.len(), self.design_width());
        out.fill(0.0);
        out[0] = 1.0;
        out[1] = record.years_experience;

        let job_idx = self.level_index(&self.job_levels, &record.job_title, "job title")?;
        if job_idx > 0 {
            out[1 + job_idx] = 1.0;
        }

        let edu_idx = self.level_index(
            &self.education_levels,
            &record.education_level,
            "education level",
        )?;
        if edu_idx > 0 {
            out[1 + (self.job_levels.len() - 1) + edu_idx] = 1.0;
        }

        Ok(())
    }

    fn level_index(&self, levels: &[String], value: &str, label: &str) -> Result<usize, AppError> {
        levels
            .binary_search_by(|l| l.as_str().cmp(value))
            .map_err(|_| {
                AppError::model(format!(
                    "Cannot encode {label} '{value}': not present in the trained level set."
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, education: &str, years: f64) -> EmployeeRecord {
        EmployeeRecord {
            salary: 50_000.0,
            years_experience: years,
            job_title: title.to_string(),
            education_level: education.to_string(),
        }
    }

    fn scheme() -> EncodingScheme {
        EncodingScheme::learn(&[
            record("Analyst", "Bachelor's", 1.0),
            record("Engineer", "PhD", 2.0),
            record("Manager", "Master's", 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn levels_are_sorted_and_first_is_reference() {
        let scheme = scheme();
        assert_eq!(scheme.job_levels(), ["Analyst", "Engineer", "Manager"]);
        assert_eq!(scheme.education_levels(), ["Bachelor's", "Master's", "PhD"]);
        // 2 base columns + 2 job dummies + 2 education dummies.
        assert_eq!(scheme.design_width(), 6);

        let names = scheme.column_names();
        assert_eq!(names[0], "intercept");
        assert_eq!(names[1], "years_experience");
        assert_eq!(names[2], "job_title=Engineer");
        assert_eq!(names[5], "education_level=PhD");
    }

    #[test]
    fn reference_levels_encode_to_zero_dummies() {
        let scheme = scheme();
        let mut row = vec![0.0; scheme.design_width()];
        scheme
            .fill_design_row(&record("Analyst", "Bachelor's", 4.0), &mut row)
            .unwrap();
        assert_eq!(row, vec![1.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_reference_levels_set_their_dummy() {
        let scheme = scheme();
        let mut row = vec![0.0; scheme.design_width()];
        scheme
            .fill_design_row(&record("Manager", "PhD", 7.5), &mut row)
            .unwrap();
        assert_eq!(row, vec![1.0, 7.5, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn unseen_level_is_an_explicit_error() {
        let scheme = scheme();
        let mut row = vec![0.0; scheme.design_width()];
        let err = scheme
            .fill_design_row(&record("Astronaut", "PhD", 1.0), &mut row)
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("Astronaut"));
    }

    #[test]
    fn empty_training_split_is_a_data_error() {
        assert_eq!(EncodingScheme::learn(&[]).unwrap_err().exit_code(), 3);
    }
}
