//! Side-by-side scenario comparison for a single month

use serde::{Deserialize, Serialize};
use super::engine::ProjectionEngine;
use super::metrics::ratio_or_zero;
use crate::scenario::BASE;

/// One scenario's headline figures and its variance from Base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "TotalAccounts")]
    pub total_accounts: f64,
    #[serde(rename = "ActiveAccounts")]
    pub active_accounts: f64,
    #[serde(rename = "TotalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "RevenuePerAccount")]
    pub revenue_per_account: f64,
    #[serde(rename = "VarianceFromBase_Revenue")]
    pub variance_from_base_revenue: f64,
    #[serde(rename = "VarianceFromBase_Accounts")]
    pub variance_from_base_accounts: f64,
}

/// `(value - base) / base`, 0 when base is 0
fn variance(value: f64, base: f64) -> f64 {
    ratio_or_zero(value - base, base)
}

impl ProjectionEngine {
    /// Compare scenarios at `month`, in the order given
    ///
    /// Variances are measured against the Base scenario evaluated in the same
    /// call, whether or not Base is in `scenarios`.
    pub fn compare_scenarios<S: AsRef<str>>(&self, month: u32, scenarios: &[S]) -> Vec<ScenarioSummary> {
        let base = self.derive(month, BASE);
        let base_accounts = base.accounts.total;
        let base_revenue = base.revenue.total_revenue;

        scenarios
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let record = if name == BASE { base.clone() } else { self.derive(month, name) };

                ScenarioSummary {
                    scenario: name.to_string(),
                    month,
                    total_accounts: record.accounts.total,
                    active_accounts: record.accounts.active,
                    total_revenue: record.revenue.total_revenue,
                    revenue_per_account: record.revenue_per_account(),
                    variance_from_base_revenue: variance(record.revenue.total_revenue, base_revenue),
                    variance_from_base_accounts: variance(record.accounts.total, base_accounts),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterTable;
    use crate::test_support::fixture_table;
    use crate::scenario::{ScenarioPolicy, HIGH_10, HIGH_25, LOW_10, LOW_25};
    use approx::assert_relative_eq;

    #[test]
    fn test_compare_standard_set() {
        let engine = ProjectionEngine::standard(fixture_table());
        let summary = engine.compare_scenarios(12, &ScenarioPolicy::comparison_set());

        assert_eq!(summary.len(), 5);
        assert_eq!(summary[0].scenario, BASE);
        assert_eq!(summary[0].variance_from_base_accounts, 0.0);
        assert_eq!(summary[0].variance_from_base_revenue, 0.0);

        let expected = [(HIGH_10, 0.1), (LOW_10, -0.1), (HIGH_25, 0.25), (LOW_25, -0.25)];
        for (row, (name, var)) in summary[1..].iter().zip(expected) {
            assert_eq!(row.scenario, name);
            assert_eq!(row.month, 12);
            assert_relative_eq!(row.variance_from_base_accounts, var, max_relative = 1e-9);
            assert_relative_eq!(row.variance_from_base_revenue, var, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_revenue_per_account_constant_across_scenarios() {
        let engine = ProjectionEngine::standard(fixture_table());
        let summary = engine.compare_scenarios(24, &ScenarioPolicy::comparison_set());

        for row in &summary[1..] {
            assert_relative_eq!(row.revenue_per_account, summary[0].revenue_per_account, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_base_not_requested() {
        let engine = ProjectionEngine::standard(fixture_table());
        let summary = engine.compare_scenarios(6, &[HIGH_25]);

        assert_eq!(summary.len(), 1);
        assert_relative_eq!(summary[0].variance_from_base_accounts, 0.25, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_base_gives_zero_variance() {
        let engine = ProjectionEngine::standard(ParameterTable::default());
        let summary = engine.compare_scenarios(12, &[BASE, HIGH_10]);

        for row in &summary {
            assert_eq!(row.revenue_per_account, 0.0);
            assert_eq!(row.variance_from_base_accounts, 0.0);
            assert_eq!(row.variance_from_base_revenue, 0.0);
        }
    }
}
