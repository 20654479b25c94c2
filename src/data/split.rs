//! Seeded train/test splitting and job-title support filtering.
//!
//! The split is the only random step in the pipeline, so determinism matters:
//! the same seed and input rows always produce the same partition, and from
//! there the whole run (fit, RMSE, classifications) is reproducible.
//!
//! Job titles with too few training observations cannot support a reliable
//! coefficient, so both splits are filtered by the same `valid_titles` set,
//! which is computed from the TRAIN split only. That asymmetry is load-bearing:
//! it guarantees no title survives in test without surviving in train, which is
//! what makes prediction on the test split total. Education levels are
//! deliberately not filtered the same way (four canonical levels, sparsity is
//! not a practical risk).

use std::collections::{BTreeSet, HashMap};

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::EmployeeRecord;
use crate::error::AppError;

/// The filtered train/test partition plus the diagnostics that explain it.
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train: Vec<EmployeeRecord>,
    pub test: Vec<EmployeeRecord>,

    /// Training-set frequency per job title, descending by count then name
    /// (computed before filtering, so dropped titles still show up).
    pub title_counts: Vec<(String, usize)>,
    /// Titles whose training count reaches the minimum.
    pub valid_titles: BTreeSet<String>,

    /// Rows removed from each split by the title filter.
    pub dropped_train: usize,
    pub dropped_test: usize,
}

/// Partition cleaned rows into train/test by uniform sampling without
/// replacement.
///
/// `train_fraction` of the rows (floor) form the training split; the rest form
/// the test split. Original row order is preserved within each split.
pub fn split_records(
    records: &[EmployeeRecord],
    seed: u64,
    train_fraction: f64,
) -> Result<(Vec<EmployeeRecord>, Vec<EmployeeRecord>), AppError> {
    if records.is_empty() {
        return Err(AppError::data("No cleaned rows to split."));
    }
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(AppError::input(format!(
            "Train fraction must be in (0, 1), got {train_fraction}."
        )));
    }

    let n = records.len();
    let train_len = ((n as f64) * train_fraction).floor() as usize;
    if train_len == 0 || train_len == n {
        return Err(AppError::data(format!(
            "Split of {n} rows at fraction {train_fraction} leaves an empty side."
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let mut in_train = vec![false; n];
    for &idx in &indices[..train_len] {
        in_train[idx] = true;
    }

    let mut train = Vec::with_capacity(train_len);
    let mut test = Vec::with_capacity(n - train_len);
    for (idx, record) in records.iter().enumerate() {
        if in_train[idx] {
            train.push(record.clone());
        } else {
            test.push(record.clone());
        }
    }

    Ok((train, test))
}

/// Filter both splits down to job titles with enough training support.
pub fn filter_by_title_support(
    train: Vec<EmployeeRecord>,
    test: Vec<EmployeeRecord>,
    min_title_count: usize,
) -> Result<SplitData, AppError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &train {
        *counts.entry(record.job_title.as_str()).or_insert(0) += 1;
    }

    let mut title_counts: Vec<(String, usize)> = counts
        .iter()
        .map(|(title, count)| (title.to_string(), *count))
        .collect();
    title_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let valid_titles: BTreeSet<String> = title_counts
        .iter()
        .filter(|(_, count)| *count >= min_title_count)
        .map(|(title, _)| title.clone())
        .collect();

    if valid_titles.is_empty() {
        return Err(AppError::data(format!(
            "No job title reaches the minimum training count of {min_title_count}."
        )));
    }

    let before_train = train.len();
    let before_test = test.len();

    let keep = |r: &EmployeeRecord| valid_titles.contains(&r.job_title);
    let train: Vec<EmployeeRecord> = train.into_iter().filter(|r| keep(r)).collect();
    let test: Vec<EmployeeRecord> = test.into_iter().filter(|r| keep(r)).collect();

    if test.is_empty() {
        return Err(AppError::data(
            "Test split is empty after job-title filtering.",
        ));
    }

    Ok(SplitData {
        dropped_train: before_train - train.len(),
        dropped_test: before_test - test.len(),
        train,
        test,
        title_counts,
        valid_titles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, salary: f64) -> EmployeeRecord {
        EmployeeRecord {
            salary,
            years_experience: 5.0,
            job_title: title.to_string(),
            education_level: "Bachelor's".to_string(),
        }
    }

    fn roster(n: usize) -> Vec<EmployeeRecord> {
        (0..n).map(|i| record("Engineer", 1000.0 + i as f64)).collect()
    }

    #[test]
    fn split_is_disjoint_and_covering() {
        let records = roster(50);
        let (train, test) = split_records(&records, 123, 0.8).unwrap();

        assert_eq!(train.len(), 40);
        assert_eq!(test.len(), 10);

        // Salaries are unique, so they identify rows.
        let mut all: Vec<f64> = train.iter().chain(test.iter()).map(|r| r.salary).collect();
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..50).map(|i| 1000.0 + i as f64).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn split_is_deterministic_per_seed() {
        let records = roster(40);
        let (train_a, _) = split_records(&records, 7, 0.8).unwrap();
        let (train_b, _) = split_records(&records, 7, 0.8).unwrap();
        let (train_c, _) = split_records(&records, 8, 0.8).unwrap();

        let ids = |rows: &[EmployeeRecord]| rows.iter().map(|r| r.salary).collect::<Vec<_>>();
        assert_eq!(ids(&train_a), ids(&train_b));
        assert_ne!(ids(&train_a), ids(&train_c));
    }

    #[test]
    fn split_preserves_original_order_within_sides() {
        let records = roster(30);
        let (train, test) = split_records(&records, 123, 0.8).unwrap();
        for side in [&train, &test] {
            let salaries: Vec<f64> = side.iter().map(|r| r.salary).collect();
            let mut sorted = salaries.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(salaries, sorted);
        }
    }

    #[test]
    fn split_rejects_degenerate_inputs() {
        assert_eq!(split_records(&[], 1, 0.8).unwrap_err().exit_code(), 3);
        assert_eq!(
            split_records(&roster(10), 1, 1.5).unwrap_err().exit_code(),
            2
        );
        // 1 row cannot be split into two non-empty sides.
        assert_eq!(split_records(&roster(1), 1, 0.8).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn title_filter_uses_train_counts_only() {
        let mut train: Vec<EmployeeRecord> = Vec::new();
        for _ in 0..5 {
            train.push(record("Engineer", 1.0));
        }
        train.push(record("Rare Title", 1.0));

        // "Test Only Title" has plenty of TEST rows but no train support, so it
        // must not survive.
        let mut test = vec![record("Engineer", 1.0)];
        for _ in 0..10 {
            test.push(record("Test Only Title", 1.0));
        }

        let split = filter_by_title_support(train, test, 3).unwrap();

        assert_eq!(split.valid_titles.len(), 1);
        assert!(split.valid_titles.contains("Engineer"));
        assert_eq!(split.dropped_train, 1);
        assert_eq!(split.dropped_test, 10);

        for row in split.train.iter().chain(split.test.iter()) {
            assert!(split.valid_titles.contains(&row.job_title));
        }
    }

    #[test]
    fn title_counts_are_sorted_descending_then_by_name() {
        let train = vec![
            record("B Title", 1.0),
            record("A Title", 1.0),
            record("C Title", 1.0),
            record("C Title", 1.0),
        ];
        let split = filter_by_title_support(train, vec![record("C Title", 1.0)], 1).unwrap();
        let names: Vec<&str> = split.title_counts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["C Title", "A Title", "B Title"]);
    }

    #[test]
    fn no_valid_titles_is_a_data_error() {
        let train = vec![record("Engineer", 1.0)];
        let test = vec![record("Engineer", 1.0)];
        let err = filter_by_title_support(train, test, 30).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
