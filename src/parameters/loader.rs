//! Load parameter rows from a long-format CSV (InputType, Month, Value)
//!
//! The table is the monthly-inputs sheet exported as CSV. Rows whose month or
//! value cannot be read are skipped with a warning instead of failing the load.

use super::{ParameterRow, ParameterTable};
use crate::error::ProjectionResult;
use csv::{Reader, ReaderBuilder};
use std::path::Path;

/// Default location of the monthly inputs file
pub const DEFAULT_INPUTS_PATH: &str = "data/monthly_inputs.csv";

/// Raw CSV row matching the monthly inputs columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "InputType")]
    input_type: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Value")]
    value: String,
}

impl CsvRow {
    fn to_row(&self) -> Option<ParameterRow> {
        let input_type = self.input_type.trim();
        if input_type.is_empty() {
            return None;
        }

        let month = parse_month(&self.month)?;
        let value: f64 = self.value.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(ParameterRow::new(input_type, month, value))
    }
}

/// Spreadsheet exports often write whole months as "12.0"
fn parse_month(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(month) = raw.parse::<u32>() {
        return Some(month);
    }
    let month: f64 = raw.parse().ok()?;
    if month.fract() == 0.0 && month >= 0.0 && month <= u32::MAX as f64 {
        Some(month as u32)
    } else {
        None
    }
}

/// Rows may have missing or extra cells; those are skipped rather than failing the load
fn csv_reader() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true);
    builder
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> ProjectionResult<Vec<ParameterRow>> {
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                skipped += 1;
                log::warn!("Skipping unreadable parameter row: {}", e);
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let parsed = record
            .deserialize::<CsvRow>(Some(&headers))
            .ok()
            .and_then(|raw| raw.to_row());

        match parsed {
            Some(row) => rows.push(row),
            None => {
                skipped += 1;
                log::warn!("Skipping malformed parameter row at line {}: {:?}", line, record);
            }
        }
    }

    log::info!("Read {} parameter rows ({} skipped)", rows.len(), skipped);
    Ok(rows)
}

/// Load the parameter table from a CSV file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> ProjectionResult<ParameterTable> {
    let reader = csv_reader().from_path(path.as_ref())?;
    let table = ParameterTable::from_rows(read_rows(reader)?);

    log::info!(
        "Loaded {} input types from {}",
        table.len(),
        path.as_ref().display()
    );
    Ok(table)
}

/// Load the parameter table from any reader (e.g., string buffer, request body)
pub fn load_parameters_from_reader<R: std::io::Read>(reader: R) -> ProjectionResult<ParameterTable> {
    let rows = read_rows(csv_reader().from_reader(reader))?;
    Ok(ParameterTable::from_rows(rows))
}
