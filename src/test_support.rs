//! Shared fixtures for unit tests

use crate::parameters::{ParameterRow, ParameterTable};
use crate::projection::Channel;

const ANCHORS: [u32; 5] = [1, 6, 12, 24, 36];

/// One input type supplied at the five standard anchors
pub fn series(name: &str, values: [f64; 5]) -> Vec<ParameterRow> {
    ANCHORS
        .iter()
        .zip(values)
        .map(|(&m, v)| ParameterRow::new(name, m, v))
        .collect()
}

/// Table with every driver the pipeline reads; Accounts is 1000/1500/2000/3000/4000
pub fn fixture_table() -> ParameterTable {
    let mut rows = Vec::new();
    rows.extend(series("Accounts", [1000.0, 1500.0, 2000.0, 3000.0, 4000.0]));
    rows.extend(series("ActiveShare", [0.6, 0.65, 0.7, 0.72, 0.75]));
    rows.extend(series("CheckingShare", [0.8, 0.8, 0.78, 0.76, 0.75]));
    rows.extend(series("SavingShare", [0.3, 0.32, 0.35, 0.38, 0.4]));
    for (i, channel) in Channel::ALL.iter().enumerate() {
        let k = (i + 1) as f64;
        rows.extend(series(channel.volume_input(), [k, k + 0.5, k + 1.0, k + 1.5, k + 2.0]));
        rows.extend(series(channel.fee_input(), [0.1 * k, 0.1 * k, 0.09 * k, 0.08 * k, 0.08 * k]));
    }
    ParameterTable::from_rows(rows)
}
