//! SVG chart rendering with Plotters.
//!
//! Four artifacts per run:
//!
//! - `salary_by_experience.svg` — bar chart of mean salary per experience group
//! - `difference_by_experience.svg` — box plots of salary difference per group
//! - `difference_by_education.svg` — box plots of salary difference per level
//! - `difference_histogram.svg` — salary-difference histogram colored by status
//!
//! Every difference chart carries reference lines at 0 and ±RMSE so the
//! classification thresholds are visible in the picture.
//!
//! Categorical axes are drawn over a numeric coordinate (one unit per
//! category) with a tick formatter that maps positions back to labels; this
//! keeps the chart code on plain cartesian ranges.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::domain::{ExperienceGroup, FairnessStatus, GroupSummary};
use crate::error::AppError;
use crate::report::fairness::FairnessReport;

const CHART_SIZE: (u32, u32) = (900, 600);

/// Render all chart artifacts into `dir`, returning the files written.
pub fn render_all(
    dir: &Path,
    groups: &[GroupSummary],
    report: &FairnessReport,
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::input(format!("Failed to create plot dir '{}': {e}", dir.display()))
    })?;

    let mut written = Vec::new();

    let path = dir.join("salary_by_experience.svg");
    plot_group_salaries(&path, groups)?;
    written.push(path);

    let path = dir.join("difference_by_experience.svg");
    plot_difference_boxplot(
        &path,
        "Salary difference by experience group",
        &differences_by_experience(report),
        report.quality.rmse,
    )?;
    written.push(path);

    let path = dir.join("difference_by_education.svg");
    plot_difference_boxplot(
        &path,
        "Salary difference by education level",
        &differences_by_education(report),
        report.quality.rmse,
    )?;
    written.push(path);

    let path = dir.join("difference_histogram.svg");
    plot_difference_histogram(&path, report)?;
    written.push(path);

    Ok(written)
}

/// Bar chart of mean salary per experience group.
pub fn plot_group_salaries(path: &Path, groups: &[GroupSummary]) -> Result<(), AppError> {
    draw_group_salaries(path, groups).map_err(|e| render_error(path, e))
}

/// Box plots of salary difference per category, with 0 and ±RMSE lines.
pub fn plot_difference_boxplot(
    path: &Path,
    title: &str,
    categories: &[(String, Vec<f64>)],
    rmse: f64,
) -> Result<(), AppError> {
    draw_difference_boxplot(path, title, categories, rmse).map_err(|e| render_error(path, e))
}

/// Histogram of salary difference colored by fairness status, ±RMSE lines.
pub fn plot_difference_histogram(path: &Path, report: &FairnessReport) -> Result<(), AppError> {
    draw_difference_histogram(path, report).map_err(|e| render_error(path, e))
}

/// Salary differences per experience group, ascending group order.
pub fn differences_by_experience(report: &FairnessReport) -> Vec<(String, Vec<f64>)> {
    let mut acc: BTreeMap<ExperienceGroup, Vec<f64>> = BTreeMap::new();
    for row in &report.records {
        acc.entry(ExperienceGroup::from_years(row.record.years_experience))
            .or_default()
            .push(row.salary_difference);
    }
    acc.into_iter()
        .map(|(group, values)| (group.display_name().to_string(), values))
        .collect()
}

/// Salary differences per education level, alphabetical order.
pub fn differences_by_education(report: &FairnessReport) -> Vec<(String, Vec<f64>)> {
    let mut acc: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in &report.records {
        acc.entry(row.record.education_level.clone())
            .or_default()
            .push(row.salary_difference);
    }
    acc.into_iter().collect()
}

fn render_error(path: &Path, e: Box<dyn std::error::Error>) -> AppError {
    AppError::input(format!("Failed to render '{}': {e}", path.display()))
}

fn status_color(status: FairnessStatus) -> RGBColor {
    match status {
        FairnessStatus::Underpaid => RGBColor(214, 69, 65),
        FairnessStatus::FairlyPaid => RGBColor(101, 165, 91),
        FairnessStatus::Overpaid => RGBColor(64, 115, 196),
    }
}

/// Tick formatter for category axes: positions land on 0..n-1.
fn category_label(value: f64, labels: &[String]) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.25 || idx < 0.0 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .cloned()
        .unwrap_or_default()
}

fn draw_group_salaries(
    path: &Path,
    groups: &[GroupSummary],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = groups
        .iter()
        .map(|g| g.group.display_name().to_string())
        .collect();
    let y_max = groups
        .iter()
        .map(|g| g.mean_salary)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.1;
    let n = groups.len().max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption("Average salary by experience group", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(-0.5f64..(n - 0.5), 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|v| category_label(*v, &labels))
        .x_desc("experience group (years)")
        .y_desc("mean salary")
        .draw()?;

    chart.draw_series(groups.iter().enumerate().map(|(i, g)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, g.mean_salary)],
            RGBColor(64, 115, 196).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_difference_boxplot(
    path: &Path,
    title: &str,
    categories: &[(String, Vec<f64>)],
    rmse: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = categories.iter().map(|(label, _)| label.clone()).collect();
    let n = categories.len().max(1) as f64;

    let mut y_min = -rmse;
    let mut y_max = rmse;
    for (_, values) in categories {
        for v in values {
            y_min = y_min.min(*v);
            y_max = y_max.max(*v);
        }
    }
    let pad = (y_max - y_min).abs().max(1.0) * 0.1;

    // Plotters' `Boxplot` element draws its value coordinate as f32, so the
    // y-axis has to be f32 here.
    let y_range = (y_min - pad) as f32..(y_max + pad) as f32;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(title, ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(-0.5f64..(n - 0.5), y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&|v| category_label(*v, &labels))
        .y_desc("salary difference (actual − predicted)")
        .draw()?;

    // Reference lines: zero plus the classification thresholds.
    for (y, color) in [
        (0.0, BLACK.to_rgba()),
        (rmse, status_color(FairnessStatus::Overpaid).to_rgba()),
        (-rmse, status_color(FairnessStatus::Underpaid).to_rgba()),
    ] {
        chart.draw_series(LineSeries::new(
            vec![(-0.5, y as f32), (n - 0.5, y as f32)],
            color.stroke_width(1),
        ))?;
    }

    chart.draw_series(categories.iter().enumerate().filter_map(|(i, (_, values))| {
        if values.is_empty() {
            return None;
        }
        Some(
            Boxplot::new_vertical(i as f64, &Quartiles::new(values))
                .width(28)
                .style(RGBColor(64, 115, 196)),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_difference_histogram(
    path: &Path,
    report: &FairnessReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let rmse = report.quality.rmse;
    let diffs: Vec<f64> = report.records.iter().map(|r| r.salary_difference).collect();

    let mut x_min = diffs.iter().copied().fold(f64::INFINITY, f64::min).min(-rmse);
    let mut x_max = diffs.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(rmse);
    if !(x_min.is_finite() && x_max.is_finite()) || x_max <= x_min {
        x_min = -1.0;
        x_max = 1.0;
    }
    let span = x_max - x_min;
    x_min -= span * 0.05;
    x_max += span * 0.05;

    const BINS: usize = 30;
    let width = (x_max - x_min) / BINS as f64;

    // Per-bin counts, stacked by status so bins straddling a threshold show
    // both colors.
    let mut counts = [[0usize; BINS]; 3];
    for row in &report.records {
        let bin = (((row.salary_difference - x_min) / width) as usize).min(BINS - 1);
        let layer = match row.status {
            FairnessStatus::Underpaid => 0,
            FairnessStatus::FairlyPaid => 1,
            FairnessStatus::Overpaid => 2,
        };
        counts[layer][bin] += 1;
    }

    let tallest = (0..BINS)
        .map(|b| counts.iter().map(|layer| layer[b]).sum::<usize>())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption("Salary difference by fairness status", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(x_min..x_max, 0.0f64..(tallest as f64 * 1.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("salary difference (actual − predicted)")
        .y_desc("employees")
        .draw()?;

    for (layer, status) in FairnessStatus::ALL.iter().enumerate() {
        let color = status_color(*status);
        chart
            .draw_series((0..BINS).filter_map(|b| {
                let count = counts[layer][b];
                if count == 0 {
                    return None;
                }
                let base: usize = counts[..layer].iter().map(|l| l[b]).sum();
                let x0 = x_min + b as f64 * width;
                Some(Rectangle::new(
                    [
                        (x0, base as f64),
                        (x0 + width, (base + count) as f64),
                    ],
                    color.filled(),
                ))
            }))?
            .label(status.display_name())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    // Threshold lines at ±RMSE.
    for x in [-rmse, rmse] {
        chart.draw_series(LineSeries::new(
            vec![(x, 0.0), (x, tallest as f64 * 1.1)],
            BLACK.stroke_width(1),
        ))?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
