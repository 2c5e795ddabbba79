//! Write batch outputs (series, comparisons, rate and interpolation checks) to CSV
//! and a JSON manifest

use crate::error::ProjectionResult;
use crate::parameters::TableSummary;
use crate::scenario::{ScenarioRunner, INTERPOLATION_CHECK_INPUTS, INTERPOLATION_CHECK_MONTHS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const SERIES_FILE: &str = "test_data.csv";
pub const COMPARISON_FILE: &str = "scenario_comparisons.csv";
pub const RATE_FILE: &str = "rate_verification.csv";
pub const INTERPOLATION_FILE: &str = "interpolation_validation.csv";
pub const SUMMARY_FILE: &str = "run_summary.json";

/// What to generate in one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub start_month: u32,
    pub end_month: u32,
    /// Scenarios for the monthly series
    pub scenarios: Vec<String>,
    /// Months for the comparison and rate tables
    pub compare_months: Vec<u32>,
    /// Scenarios for the comparison table
    pub compare_scenarios: Vec<String>,
}

/// Manifest written next to the CSV outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub start_month: u32,
    pub end_month: u32,
    pub scenarios: Vec<String>,
    pub compare_months: Vec<u32>,
    pub compare_scenarios: Vec<String>,
    pub series_rows: usize,
    pub comparison_rows: usize,
    pub inputs: TableSummary,
    pub files: Vec<String>,
}

/// Write serializable rows as a CSV file with a header
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> ProjectionResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a value as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> ProjectionResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Generate every output table into `output_dir`
pub fn export_all(runner: &ScenarioRunner, options: &ExportOptions, output_dir: &Path) -> ProjectionResult<RunSummary> {
    fs::create_dir_all(output_dir)?;

    let series = runner.series_rows(options.start_month, options.end_month, &options.scenarios)?;
    let comparisons = runner.compare_months(&options.compare_months, &options.compare_scenarios);
    let rates = runner.rate_verification(&options.compare_months);
    let interpolation = runner.interpolation_validation(&INTERPOLATION_CHECK_INPUTS, &INTERPOLATION_CHECK_MONTHS);

    let files: Vec<PathBuf> = [SERIES_FILE, COMPARISON_FILE, RATE_FILE, INTERPOLATION_FILE, SUMMARY_FILE]
        .iter()
        .map(|name| output_dir.join(name))
        .collect();

    write_csv(&files[0], &series)?;
    write_csv(&files[1], &comparisons)?;
    write_csv(&files[2], &rates)?;
    write_csv(&files[3], &interpolation)?;

    let summary = RunSummary {
        generated_at: Utc::now(),
        start_month: options.start_month,
        end_month: options.end_month,
        scenarios: options.scenarios.clone(),
        compare_months: options.compare_months.clone(),
        compare_scenarios: options.compare_scenarios.clone(),
        series_rows: series.len(),
        comparison_rows: comparisons.len(),
        inputs: runner.engine().interpolator().table().summary(),
        files: files.iter().map(|p| p.display().to_string()).collect(),
    };
    write_json(&files[4], &summary)?;

    log::info!("Exported {} series rows to {}", series.len(), output_dir.display());
    Ok(summary)
}
