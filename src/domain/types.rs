//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the analysis pipeline
//! - exported to JSON/CSV
//! - reloaded later for comparisons between runs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One employee observation after cleaning.
///
/// Invariants (enforced by `data::clean`):
/// - `salary > 0`
/// - `years_experience >= 0`
/// - `job_title` and `education_level` are non-empty
/// - `education_level` is normalized (canonical spellings collapse aliases)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub salary: f64,
    pub years_experience: f64,
    pub job_title: String,
    pub education_level: String,
}

/// Experience bucket derived from `years_experience`.
///
/// Breakpoints are {0, 2, 5, 10, 20} with the lowest bound inclusive, so each
/// boundary value falls into the lower-labelled bucket (5 years → "3–5").
/// Values above 20 all land in the open-ended top bucket, which makes the
/// mapping total on `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceGroup {
    Years0To2,
    Years3To5,
    Years6To10,
    Years11To20,
    Years20Plus,
}

impl ExperienceGroup {
    /// All groups in ascending experience order (stable report/plot ordering).
    pub const ALL: [ExperienceGroup; 5] = [
        ExperienceGroup::Years0To2,
        ExperienceGroup::Years3To5,
        ExperienceGroup::Years6To10,
        ExperienceGroup::Years11To20,
        ExperienceGroup::Years20Plus,
    ];

    /// Bucket a non-negative experience value.
    pub fn from_years(years: f64) -> ExperienceGroup {
        if years <= 2.0 {
            ExperienceGroup::Years0To2
        } else if years <= 5.0 {
            ExperienceGroup::Years3To5
        } else if years <= 10.0 {
            ExperienceGroup::Years6To10
        } else if years <= 20.0 {
            ExperienceGroup::Years11To20
        } else {
            ExperienceGroup::Years20Plus
        }
    }

    /// Human-readable label for terminal output and plot axes.
    pub fn display_name(self) -> &'static str {
        match self {
            ExperienceGroup::Years0To2 => "0–2",
            ExperienceGroup::Years3To5 => "3–5",
            ExperienceGroup::Years6To10 => "6–10",
            ExperienceGroup::Years11To20 => "11–20",
            ExperienceGroup::Years20Plus => "20+",
        }
    }
}

/// Mean salary and headcount for one experience group.
///
/// Computed over the full cleaned dataset before splitting; feeds the group
/// bar chart only, never the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: ExperienceGroup,
    pub mean_salary: f64,
    pub count: usize,
}

/// Three-way pay classification of a test-set employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FairnessStatus {
    Underpaid,
    FairlyPaid,
    Overpaid,
}

impl FairnessStatus {
    /// All statuses in report order.
    pub const ALL: [FairnessStatus; 3] = [
        FairnessStatus::Underpaid,
        FairnessStatus::FairlyPaid,
        FairnessStatus::Overpaid,
    ];

    /// Classify an actual-minus-predicted salary difference against ±`rmse`.
    ///
    /// The boundary is non-strict: a difference of exactly ±rmse counts as
    /// fairly paid.
    pub fn from_difference(difference: f64, rmse: f64) -> FairnessStatus {
        if difference < -rmse {
            FairnessStatus::Underpaid
        } else if difference > rmse {
            FairnessStatus::Overpaid
        } else {
            FairnessStatus::FairlyPaid
        }
    }

    /// Human-readable label for terminal output and plot legends.
    pub fn display_name(self) -> &'static str {
        match self {
            FairnessStatus::Underpaid => "Underpaid",
            FairnessStatus::FairlyPaid => "Fairly Paid",
            FairnessStatus::Overpaid => "Overpaid",
        }
    }
}

/// A classified test-set row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessRecord {
    pub record: EmployeeRecord,
    pub predicted_salary: f64,
    /// `actual − predicted`.
    pub salary_difference: f64,
    pub status: FairnessStatus,
}

/// Fit quality diagnostics over the test set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// A named regression coefficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,

    /// Seed for the train/test split.
    pub seed: u64,
    /// Fraction of cleaned rows assigned to the training split.
    pub train_fraction: f64,
    /// Minimum training-set frequency for a job title to stay in the model.
    pub min_title_count: usize,

    /// Sample rows printed per fairness class.
    pub samples_per_class: usize,

    pub plot: bool,
    pub plot_dir: PathBuf,

    pub export_results: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
}

/// A saved model file (JSON).
///
/// The portable representation of a fitted run: coefficients, the category
/// levels they were encoded against, and test-set fit quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub seed: u64,
    pub coefficients: Vec<Coefficient>,
    pub job_levels: Vec<String>,
    pub education_levels: Vec<String>,
    pub quality: FitQuality,
}
