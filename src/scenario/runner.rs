//! Scenario runner for batch projections
//!
//! Loads the parameter table once, then evaluates many (month, scenario)
//! pairs against it. Every pair is independent, so batches run in parallel.

use crate::error::{ProjectionError, ProjectionResult};
use crate::parameters::load_parameters;
use crate::projection::{
    Channel, DerivedMetrics, EngineConfig, ProjectionEngine, ScenarioSummary, ACTIVE_SHARE_INPUT,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inputs shown in the rate verification table; none of them depend on scenario
pub const VERIFIED_RATE_INPUTS: [&str; 6] = [
    "ACHinPerActive",
    "ACHinRate",
    "ActiveShare",
    "CheckingShare",
    "RTPinRate",
    "DebitCardTransactionRate",
];

/// Input types sampled in the interpolation validation table
pub const INTERPOLATION_CHECK_INPUTS: [&str; 4] = [
    "Accounts",
    "ACHinPerActive",
    "ACHinRate",
    "DebitCardTransactionsPerActive",
];

/// Off-anchor months on either side of each band boundary
pub const INTERPOLATION_CHECK_MONTHS: [u32; 8] = [2, 5, 7, 11, 13, 23, 25, 35];

/// One flattened (month, scenario) record for tabular export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Scenario")]
    pub scenario: String,

    #[serde(rename = "Accounts_total_accounts")]
    pub total_accounts: f64,
    #[serde(rename = "Accounts_active_accounts")]
    pub active_accounts: f64,
    #[serde(rename = "Accounts_checking_accounts")]
    pub checking_accounts: f64,
    #[serde(rename = "Accounts_savings_accounts")]
    pub savings_accounts: f64,

    #[serde(rename = "Transactions_ach_incoming")]
    pub txn_ach_incoming: f64,
    #[serde(rename = "Transactions_ach_outgoing")]
    pub txn_ach_outgoing: f64,
    #[serde(rename = "Transactions_rtp_incoming")]
    pub txn_rtp_incoming: f64,
    #[serde(rename = "Transactions_rtp_outgoing")]
    pub txn_rtp_outgoing: f64,
    #[serde(rename = "Transactions_wire_incoming")]
    pub txn_wire_incoming: f64,
    #[serde(rename = "Transactions_wire_outgoing")]
    pub txn_wire_outgoing: f64,
    #[serde(rename = "Transactions_debit_card")]
    pub txn_debit_card: f64,
    #[serde(rename = "Transactions_total_volume")]
    pub total_volume: f64,

    #[serde(rename = "Revenue_ach_incoming")]
    pub rev_ach_incoming: f64,
    #[serde(rename = "Revenue_ach_outgoing")]
    pub rev_ach_outgoing: f64,
    #[serde(rename = "Revenue_rtp_incoming")]
    pub rev_rtp_incoming: f64,
    #[serde(rename = "Revenue_rtp_outgoing")]
    pub rev_rtp_outgoing: f64,
    #[serde(rename = "Revenue_wire_incoming")]
    pub rev_wire_incoming: f64,
    #[serde(rename = "Revenue_wire_outgoing")]
    pub rev_wire_outgoing: f64,
    #[serde(rename = "Revenue_debit_card")]
    pub rev_debit_card: f64,
    #[serde(rename = "Revenue_total_revenue")]
    pub total_revenue: f64,
}

impl From<&DerivedMetrics> for SeriesRow {
    fn from(m: &DerivedMetrics) -> Self {
        let volumes = &m.transactions.volumes;
        let revenue = &m.revenue.revenue;
        Self {
            month: m.month,
            scenario: m.scenario.clone(),
            total_accounts: m.accounts.total,
            active_accounts: m.accounts.active,
            checking_accounts: m.accounts.checking,
            savings_accounts: m.accounts.savings,
            txn_ach_incoming: volumes.ach_incoming,
            txn_ach_outgoing: volumes.ach_outgoing,
            txn_rtp_incoming: volumes.rtp_incoming,
            txn_rtp_outgoing: volumes.rtp_outgoing,
            txn_wire_incoming: volumes.wire_incoming,
            txn_wire_outgoing: volumes.wire_outgoing,
            txn_debit_card: volumes.debit_card,
            total_volume: m.transactions.total_volume,
            rev_ach_incoming: revenue.ach_incoming,
            rev_ach_outgoing: revenue.ach_outgoing,
            rev_rtp_incoming: revenue.rtp_incoming,
            rev_rtp_outgoing: revenue.rtp_outgoing,
            rev_wire_incoming: revenue.wire_incoming,
            rev_wire_outgoing: revenue.wire_outgoing,
            rev_debit_card: revenue.debit_card,
            total_revenue: m.revenue.total_revenue,
        }
    }
}

/// Interpolated, scenario-independent rates for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCheck {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "ACHinPerActive")]
    pub ach_in_per_active: f64,
    #[serde(rename = "ACHinRate")]
    pub ach_in_rate: f64,
    #[serde(rename = "ActiveShare")]
    pub active_share: f64,
    #[serde(rename = "CheckingShare")]
    pub checking_share: f64,
    #[serde(rename = "RTPinRate")]
    pub rtp_in_rate: f64,
    #[serde(rename = "DebitCardTransactionRate")]
    pub debit_card_rate: f64,
}

/// Interpolated value of one input type at one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationCheck {
    #[serde(rename = "InputType")]
    pub input_type: String,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "InterpolatedValue")]
    pub interpolated_value: f64,
}

/// Total accounts for one scenario next to rates that must not move with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVerification {
    pub scenario: String,
    pub month: u32,
    pub total_accounts: f64,
    pub ach_in_per_active: f64,
    pub ach_in_rate: f64,
    pub active_share: f64,
}

/// Pre-loaded scenario runner for batch projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner around a built engine
    pub fn new(engine: ProjectionEngine) -> Self {
        Self { engine }
    }

    /// Create runner by loading the parameter table from CSV
    pub fn from_csv_path(path: &Path, config: EngineConfig) -> ProjectionResult<Self> {
        let table = load_parameters(path)?;
        Ok(Self::new(ProjectionEngine::new(table, config)))
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Derived record for every month in `start..=end` and every scenario
    ///
    /// Rows are ordered by month, then by scenario in the order given.
    pub fn run_series<S: AsRef<str> + Sync>(
        &self,
        start: u32,
        end: u32,
        scenarios: &[S],
    ) -> ProjectionResult<Vec<DerivedMetrics>> {
        if start == 0 || start > end {
            return Err(ProjectionError::InvalidMonthRange { start, end });
        }

        let pairs: Vec<(u32, &str)> = (start..=end)
            .flat_map(move |month| scenarios.iter().map(move |s| (month, s.as_ref())))
            .collect();

        log::info!(
            "Deriving {} records (months {}..={}, {} scenarios)",
            pairs.len(),
            start,
            end,
            scenarios.len()
        );

        Ok(pairs
            .par_iter()
            .map(|&(month, scenario)| self.engine.derive(month, scenario))
            .collect())
    }

    /// Flattened series rows for tabular export
    pub fn series_rows<S: AsRef<str> + Sync>(
        &self,
        start: u32,
        end: u32,
        scenarios: &[S],
    ) -> ProjectionResult<Vec<SeriesRow>> {
        let records = self.run_series(start, end, scenarios)?;
        Ok(records.iter().map(SeriesRow::from).collect())
    }

    /// Scenario comparison for each month, concatenated in month order
    pub fn compare_months<S: AsRef<str> + Sync>(&self, months: &[u32], scenarios: &[S]) -> Vec<ScenarioSummary> {
        months
            .par_iter()
            .map(|&month| self.engine.compare_scenarios(month, scenarios))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Scenario-independent rate table
    pub fn rate_verification(&self, months: &[u32]) -> Vec<RateCheck> {
        let [ach_pa, ach_rate, active, checking, rtp_rate, debit_rate] = VERIFIED_RATE_INPUTS;
        months
            .iter()
            .map(|&month| RateCheck {
                month,
                ach_in_per_active: self.engine.interpolate(ach_pa, month),
                ach_in_rate: self.engine.interpolate(ach_rate, month),
                active_share: self.engine.interpolate(active, month),
                checking_share: self.engine.interpolate(checking, month),
                rtp_in_rate: self.engine.interpolate(rtp_rate, month),
                debit_card_rate: self.engine.interpolate(debit_rate, month),
            })
            .collect()
    }

    /// Interpolated values for each input type at each month, grouped by input type
    ///
    /// Input types missing from the table are left out rather than reported as zeros.
    pub fn interpolation_validation<S: AsRef<str>>(&self, input_types: &[S], months: &[u32]) -> Vec<InterpolationCheck> {
        let table = self.engine.interpolator().table();
        input_types
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| {
                let present = table.contains(name);
                if !present {
                    log::warn!("Skipping interpolation check for missing input '{}'", name);
                }
                present
            })
            .flat_map(|name| {
                months.iter().map(move |&month| InterpolationCheck {
                    input_type: name.to_string(),
                    month,
                    interpolated_value: self.engine.interpolate(name, month),
                })
            })
            .collect()
    }

    /// Per-scenario accounts alongside rates that should be identical across them
    pub fn scenario_verification<S: AsRef<str>>(&self, month: u32, scenarios: &[S]) -> Vec<ScenarioVerification> {
        scenarios
            .iter()
            .map(|name| {
                let name = name.as_ref();
                ScenarioVerification {
                    scenario: name.to_string(),
                    month,
                    total_accounts: self.engine.calculate_accounts(month, name).total,
                    ach_in_per_active: self.engine.interpolate(Channel::AchIncoming.volume_input(), month),
                    ach_in_rate: self.engine.interpolate(Channel::AchIncoming.fee_input(), month),
                    active_share: self.engine.interpolate(ACTIVE_SHARE_INPUT, month),
                }
            })
            .collect()
    }
}
