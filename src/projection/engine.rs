//! Three-stage derivation pipeline: accounts → transactions → revenue

use crate::interpolation::{AnchorSchedule, GrowthPolicy, Interpolator};
use crate::parameters::ParameterTable;
use crate::scenario::ScenarioPolicy;
use super::metrics::{
    AccountMetrics, ChannelValues, DerivedMetrics, RevenueMetrics, TransactionMetrics,
    ACCOUNTS_INPUT, ACTIVE_SHARE_INPUT, CHECKING_SHARE_INPUT, SAVING_SHARE_INPUT,
};

/// Configuration for a projection engine
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Months at which raw inputs are supplied
    pub anchors: AnchorSchedule,

    /// Growth rate source for months past the last anchor
    pub growth: GrowthPolicy,

    /// Scenario multipliers (accounts only)
    pub scenarios: ScenarioPolicy,
}

impl EngineConfig {
    /// Anchors 1/6/12/24/36, GrowthRateM37Plus at month 37 (default 1%), standard scenarios
    pub fn standard() -> Self {
        Self::default()
    }
}

/// Main projection engine
///
/// Each (month, scenario) is computed independently from the frozen parameter
/// table, so the engine can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    interpolator: Interpolator,
    scenarios: ScenarioPolicy,
}

impl ProjectionEngine {
    /// Create a new projection engine from a loaded table and config
    pub fn new(table: ParameterTable, config: EngineConfig) -> Self {
        Self {
            interpolator: Interpolator::new(table, config.anchors, config.growth),
            scenarios: config.scenarios,
        }
    }

    /// Engine with the standard configuration
    pub fn standard(table: ParameterTable) -> Self {
        Self::new(table, EngineConfig::standard())
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    pub fn scenarios(&self) -> &ScenarioPolicy {
        &self.scenarios
    }

    /// Scenario-free interpolated input value
    pub fn interpolate(&self, input_type: &str, month: u32) -> f64 {
        self.interpolator.value(input_type, month)
    }

    /// Total accounts after the scenario multiplier
    pub fn accounts_with_scenario(&self, month: u32, scenario: &str) -> f64 {
        let base = self.interpolate(ACCOUNTS_INPUT, month);
        self.scenarios.adjusted_accounts(base, scenario)
    }

    /// Stage 1: account counts
    pub fn calculate_accounts(&self, month: u32, scenario: &str) -> AccountMetrics {
        let total = self.accounts_with_scenario(month, scenario);

        // Shares are not scenario-dependent and are not range checked
        let active = total * self.interpolate(ACTIVE_SHARE_INPUT, month);
        let checking = active * self.interpolate(CHECKING_SHARE_INPUT, month);
        let savings = active * self.interpolate(SAVING_SHARE_INPUT, month);

        AccountMetrics {
            total,
            active,
            checking,
            savings,
        }
    }

    /// Stage 2: transaction volumes per channel
    pub fn calculate_transactions(&self, month: u32, scenario: &str) -> TransactionMetrics {
        let accounts = self.calculate_accounts(month, scenario);
        self.transactions_for(&accounts, month)
    }

    /// Stage 3: revenue per channel
    pub fn calculate_revenue(&self, month: u32, scenario: &str) -> RevenueMetrics {
        let transactions = self.calculate_transactions(month, scenario);
        self.revenue_for(&transactions, month)
    }

    /// All three stages in one pass
    pub fn derive(&self, month: u32, scenario: &str) -> DerivedMetrics {
        let accounts = self.calculate_accounts(month, scenario);
        let transactions = self.transactions_for(&accounts, month);
        let revenue = self.revenue_for(&transactions, month);

        DerivedMetrics {
            month,
            scenario: scenario.to_string(),
            accounts,
            transactions,
            revenue,
        }
    }

    fn transactions_for(&self, accounts: &AccountMetrics, month: u32) -> TransactionMetrics {
        let volumes = ChannelValues::from_fn(|channel| {
            accounts.active * self.interpolate(channel.volume_input(), month)
        });
        TransactionMetrics::new(volumes)
    }

    fn revenue_for(&self, transactions: &TransactionMetrics, month: u32) -> RevenueMetrics {
        let revenue = ChannelValues::from_fn(|channel| {
            transactions.volumes.get(channel) * self.interpolate(channel.fee_input(), month)
        });
        RevenueMetrics::new(revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_table, series};
    use crate::projection::metrics::Channel;
    use crate::scenario::{BASE, CUSTOM, HIGH_10, HIGH_25, LOW_10, LOW_25};
    use approx::assert_relative_eq;

    #[test]
    fn test_accounts_stage_month_3() {
        let engine = ProjectionEngine::standard(fixture_table());

        let base = engine.calculate_accounts(3, BASE);
        assert_relative_eq!(base.total, 1200.0, max_relative = 1e-12);

        let active_share = 0.6 + 0.05 * 2.0 / 5.0;
        assert_relative_eq!(base.active, 1200.0 * active_share, max_relative = 1e-12);
        assert_relative_eq!(base.checking, base.active * 0.8, max_relative = 1e-12);
        assert_relative_eq!(base.savings, base.active * (0.3 + 0.02 * 0.4), max_relative = 1e-12);

        let high = engine.calculate_accounts(3, HIGH_10);
        assert_relative_eq!(high.total, 1320.0, max_relative = 1e-12);
    }

    #[test]
    fn test_scenario_isolation_of_inputs() {
        let engine = ProjectionEngine::standard(fixture_table());

        // Same month, different scenario runs: non-account drivers are identical
        let base = engine.calculate_accounts(3, BASE);
        let high = engine.calculate_accounts(3, HIGH_10);
        assert_relative_eq!(base.active / base.total, high.active / high.total, max_relative = 1e-12);
        assert_relative_eq!(
            high.active / high.total,
            engine.interpolate("ActiveShare", 3),
            max_relative = 1e-12
        );

        // Per-active rates and fees come out of the records unchanged
        for scenario in [HIGH_10, LOW_10, HIGH_25, LOW_25, CUSTOM, "Unknown"] {
            let b = engine.derive(12, BASE);
            let s = engine.derive(12, scenario);
            for channel in Channel::ALL {
                let rate_b = b.transactions.volumes.get(channel) / b.accounts.active;
                let rate_s = s.transactions.volumes.get(channel) / s.accounts.active;
                assert_relative_eq!(rate_b, rate_s, max_relative = 1e-12);

                let fee_b = b.revenue.revenue.get(channel) / b.transactions.volumes.get(channel);
                let fee_s = s.revenue.revenue.get(channel) / s.transactions.volumes.get(channel);
                assert_relative_eq!(fee_b, fee_s, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_revenue_proportional_to_accounts() {
        let engine = ProjectionEngine::standard(fixture_table());

        for month in [1, 3, 6, 9, 12, 20, 36, 40] {
            let base = engine.derive(month, BASE);
            for scenario in [HIGH_10, LOW_10, HIGH_25, LOW_25] {
                let s = engine.derive(month, scenario);
                assert_relative_eq!(
                    s.revenue.total_revenue / base.revenue.total_revenue,
                    s.accounts.total / base.accounts.total,
                    max_relative = 1e-12
                );
                assert_relative_eq!(
                    s.transactions.total_volume / base.transactions.total_volume,
                    engine.scenarios().multiplier(scenario),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_stage_formulas() {
        let engine = ProjectionEngine::standard(fixture_table());
        let record = engine.derive(12, BASE);

        for channel in Channel::ALL {
            let volume = record.accounts.active * engine.interpolate(channel.volume_input(), 12);
            assert_relative_eq!(record.transactions.volumes.get(channel), volume, max_relative = 1e-12);

            let revenue = volume * engine.interpolate(channel.fee_input(), 12);
            assert_relative_eq!(record.revenue.revenue.get(channel), revenue, max_relative = 1e-12);
        }

        let volume_sum: f64 = Channel::ALL.iter().map(|&c| record.transactions.volumes.get(c)).sum();
        assert_relative_eq!(record.transactions.total_volume, volume_sum, max_relative = 1e-12);

        let revenue_sum: f64 = Channel::ALL.iter().map(|&c| record.revenue.revenue.get(c)).sum();
        assert_relative_eq!(record.revenue.total_revenue, revenue_sum, max_relative = 1e-12);
    }

    #[test]
    fn test_staged_calls_match_derive() {
        let engine = ProjectionEngine::standard(fixture_table());
        let record = engine.derive(17, LOW_25);

        assert_eq!(engine.calculate_accounts(17, LOW_25), record.accounts);
        assert_eq!(engine.calculate_transactions(17, LOW_25), record.transactions);
        assert_eq!(engine.calculate_revenue(17, LOW_25), record.revenue);
    }

    #[test]
    fn test_deterministic() {
        let engine = ProjectionEngine::standard(fixture_table());
        assert_eq!(engine.derive(29, HIGH_25), engine.derive(29, HIGH_25));
    }

    #[test]
    fn test_empty_table_degrades_to_zero() {
        let engine = ProjectionEngine::standard(ParameterTable::default());
        let record = engine.derive(12, HIGH_10);

        assert_eq!(record.accounts.total, 0.0);
        assert_eq!(record.transactions.total_volume, 0.0);
        assert_eq!(record.revenue.total_revenue, 0.0);
        assert_eq!(record.revenue_per_account(), 0.0);
    }

    #[test]
    fn test_out_of_range_shares_propagate() {
        let mut rows = series("Accounts", [100.0; 5]);
        rows.extend(series("ActiveShare", [1.5; 5]));
        rows.extend(series("CheckingShare", [0.9; 5]));
        rows.extend(series("SavingShare", [0.9; 5]));
        let engine = ProjectionEngine::standard(ParameterTable::from_rows(rows));

        let accounts = engine.calculate_accounts(6, BASE);
        assert_relative_eq!(accounts.active, 150.0);
        assert!(accounts.checking + accounts.savings > accounts.active);
    }

    #[test]
    fn test_custom_multiplier_applies_to_accounts_only() {
        let config = EngineConfig {
            scenarios: ScenarioPolicy::standard().with_custom_multiplier(1.5).unwrap(),
            ..EngineConfig::standard()
        };
        let engine = ProjectionEngine::new(fixture_table(), config);

        let base = engine.derive(6, BASE);
        let custom = engine.derive(6, CUSTOM);
        assert_relative_eq!(custom.accounts.total, base.accounts.total * 1.5, max_relative = 1e-12);
        assert_relative_eq!(
            custom.revenue.total_revenue,
            base.revenue.total_revenue * 1.5,
            max_relative = 1e-12
        );
    }
}
