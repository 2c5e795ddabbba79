//! Immutable parameter table keyed by (input-type, month)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One raw input row: a driver value supplied for a single month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub input_type: String,
    pub month: u32,
    pub value: f64,
}

impl ParameterRow {
    pub fn new(input_type: impl Into<String>, month: u32, value: f64) -> Self {
        Self {
            input_type: input_type.into(),
            month,
            value,
        }
    }
}

/// Sparse mapping from (input-type, month) to value
///
/// Built once from rows and never mutated afterwards. When the same key
/// appears more than once the first value wins; later ones are counted in
/// [`ParameterTable::duplicates`] and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    series: HashMap<String, BTreeMap<u32, f64>>,
    duplicates: usize,
}

impl ParameterTable {
    /// Build the table from rows in input order
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ParameterRow>,
    {
        let mut series: HashMap<String, BTreeMap<u32, f64>> = HashMap::new();
        let mut duplicates = 0;

        for row in rows {
            let months = series.entry(row.input_type).or_default();
            if months.contains_key(&row.month) {
                duplicates += 1;
                continue;
            }
            months.insert(row.month, row.value);
        }

        if duplicates > 0 {
            log::warn!("Ignored {} duplicate (input type, month) rows; first value kept", duplicates);
        }

        Self { series, duplicates }
    }

    /// Raw value at (input_type, month), if supplied
    pub fn get(&self, input_type: &str, month: u32) -> Option<f64> {
        self.series.get(input_type)?.get(&month).copied()
    }

    /// Whether any value exists for the input type
    pub fn contains(&self, input_type: &str) -> bool {
        self.series.contains_key(input_type)
    }

    /// All supplied months for one input type, ascending
    pub fn series(&self, input_type: &str) -> Option<&BTreeMap<u32, f64>> {
        self.series.get(input_type)
    }

    /// Input type names, sorted
    pub fn input_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct input types
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Rows dropped because their key was already present
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Structural summary of the loaded inputs (types, months, value ranges)
    pub fn summary(&self) -> TableSummary {
        let mut months = BTreeSet::new();
        let mut inputs = Vec::with_capacity(self.series.len());

        for name in self.input_types() {
            let values = &self.series[name];
            months.extend(values.keys().copied());

            let min = values.values().copied().fold(f64::INFINITY, f64::min);
            let max = values.values().copied().fold(f64::NEG_INFINITY, f64::max);

            inputs.push(InputSummary {
                input_type: name.to_string(),
                months: values.keys().copied().collect(),
                min_value: min,
                max_value: max,
            });
        }

        TableSummary {
            input_type_count: inputs.len(),
            months: months.into_iter().collect(),
            duplicates_ignored: self.duplicates,
            inputs,
        }
    }
}

/// Summary of one input type's supplied data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSummary {
    pub input_type: String,
    pub months: Vec<u32>,
    pub min_value: f64,
    pub max_value: f64,
}

/// Summary of the whole table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub input_type_count: usize,
    pub months: Vec<u32>,
    pub duplicates_ignored: usize,
    pub inputs: Vec<InputSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins_on_duplicates() {
        let table = ParameterTable::from_rows(vec![
            ParameterRow::new("Accounts", 1, 1000.0),
            ParameterRow::new("Accounts", 1, 9999.0),
            ParameterRow::new("Accounts", 6, 1500.0),
        ]);

        assert_eq!(table.get("Accounts", 1), Some(1000.0));
        assert_eq!(table.get("Accounts", 6), Some(1500.0));
        assert_eq!(table.duplicates(), 1);
    }

    #[test]
    fn test_missing_keys() {
        let table = ParameterTable::from_rows(vec![ParameterRow::new("ActiveShare", 1, 0.6)]);

        assert!(table.contains("ActiveShare"));
        assert!(!table.contains("Accounts"));
        assert_eq!(table.get("ActiveShare", 6), None);
        assert_eq!(table.get("Accounts", 1), None);
    }

    #[test]
    fn test_summary() {
        let table = ParameterTable::from_rows(vec![
            ParameterRow::new("Accounts", 1, 1000.0),
            ParameterRow::new("Accounts", 36, 4000.0),
            ParameterRow::new("ActiveShare", 12, 0.7),
            ParameterRow::new("GrowthRateM37Plus", 37, 0.02),
        ]);

        let summary = table.summary();
        assert_eq!(summary.input_type_count, 3);
        assert_eq!(summary.months, vec![1, 12, 36, 37]);

        let accounts = &summary.inputs[0];
        assert_eq!(accounts.input_type, "Accounts");
        assert_eq!(accounts.months, vec![1, 36]);
        assert_eq!(accounts.min_value, 1000.0);
        assert_eq!(accounts.max_value, 4000.0);
    }
}
