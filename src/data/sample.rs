//! Synthetic salary dataset generation.
//!
//! The generator draws employees from a fixed roster of job titles and
//! education levels, prices them with a known linear formula, and adds
//! Gaussian noise. Because the formula is linear in exactly the predictors the
//! model uses, a fit on generated data should recover the roster premiums (up
//! to reference-level shifts) and an RMSE close to `noise_sd`.
//!
//! Two deliberate wrinkles keep generated files honest as pipeline input:
//!
//! - one roster title is rare, so the minimum-support filter has work to do
//! - education levels are written with their raw alias spellings, so the
//!   cleaner's normalization has work to do

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Intercept of the generating formula (salary of a zero-experience,
/// reference-title, reference-education employee).
pub const BASE_SALARY: f64 = 42_000.0;

/// Salary gain per year of experience in the generating formula.
pub const YEARS_COEFFICIENT: f64 = 2_150.0;

/// Roster of job titles: (title, salary premium, sampling weight).
///
/// "Chief Economist" is deliberately rare so that default-sized samples leave
/// it under the minimum-support threshold.
pub const TITLE_ROSTER: [(&str, f64, u32); 5] = [
    ("Software Engineer", 28_000.0, 30),
    ("Data Analyst", 12_000.0, 28),
    ("Project Manager", 20_000.0, 25),
    ("Sales Associate", 0.0, 15),
    ("Chief Economist", 55_000.0, 2),
];

/// Education levels: (canonical label, raw spellings to emit, premium, weight).
pub const EDUCATION_ROSTER: [(&str, &[&str], f64, u32); 4] = [
    ("High School", &["High School", "high school"], 0.0, 20),
    ("Bachelor's", &["Bachelor's", "Bachelor's Degree"], 8_000.0, 40),
    ("Master's", &["Master's", "Master's Degree"], 15_000.0, 28),
    ("PhD", &["PhD", "phD", "PHD"], 24_000.0, 12),
];

/// Generator settings.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    /// Standard deviation of the Gaussian salary noise.
    pub noise_sd: f64,
}

/// One generated employee, education kept in its raw (un-normalized) spelling.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub salary: f64,
    pub years_experience: f64,
    pub job_title: String,
    pub education_level: String,
}

/// Generate `config.count` synthetic employees.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<SampleRow>, AppError> {
    if config.count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(AppError::input("Noise standard deviation must be >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::model(format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let (title, title_premium) = pick_title(&mut rng);
        let (education_raw, education_premium) = pick_education(&mut rng);

        // One decimal place, like survey exports tend to have.
        let years: f64 = (rng.gen_range(0.0f64..=30.0) * 10.0).round() / 10.0;

        let salary = BASE_SALARY
            + YEARS_COEFFICIENT * years
            + title_premium
            + education_premium
            + noise.sample(&mut rng);

        rows.push(SampleRow {
            salary: (salary * 100.0).round() / 100.0,
            years_experience: years,
            job_title: title.to_string(),
            education_level: education_raw.to_string(),
        });
    }

    Ok(rows)
}

/// Write generated rows as a CSV the analyzer accepts.
pub fn write_sample_csv(path: &Path, rows: &[SampleRow]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create sample CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "Salary,Years of Experience,Job Title,Education Level")
        .map_err(|e| AppError::input(format!("Failed to write sample CSV header: {e}")))?;

    for row in rows {
        writeln!(
            file,
            "{:.2},{:.1},{},{}",
            row.salary, row.years_experience, row.job_title, row.education_level
        )
        .map_err(|e| AppError::input(format!("Failed to write sample CSV row: {e}")))?;
    }

    Ok(())
}

fn pick_title(rng: &mut StdRng) -> (&'static str, f64) {
    let total: u32 = TITLE_ROSTER.iter().map(|(_, _, w)| w).sum();
    let mut draw = rng.gen_range(0..total);
    for (title, premium, weight) in TITLE_ROSTER {
        if draw < weight {
            return (title, premium);
        }
        draw -= weight;
    }
    // Unreachable: draw < total by construction.
    let (title, premium, _) = TITLE_ROSTER[0];
    (title, premium)
}

fn pick_education(rng: &mut StdRng) -> (&'static str, f64) {
    let total: u32 = EDUCATION_ROSTER.iter().map(|(_, _, _, w)| w).sum();
    let mut draw = rng.gen_range(0..total);
    for (_, spellings, premium, weight) in EDUCATION_ROSTER {
        if draw < weight {
            let spelling = spellings[rng.gen_range(0..spellings.len())];
            return (spelling, premium);
        }
        draw -= weight;
    }
    let (_, spellings, premium, _) = EDUCATION_ROSTER[0];
    (spellings[0], premium)
}
