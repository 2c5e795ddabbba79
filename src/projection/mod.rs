//! Derivation pipeline for monthly account, transaction and revenue metrics

mod engine;
mod metrics;
mod comparison;

pub use engine::{ProjectionEngine, EngineConfig};
pub use metrics::{
    Channel, ChannelValues, AccountMetrics, TransactionMetrics, RevenueMetrics, DerivedMetrics,
    ratio_or_zero, ACCOUNTS_INPUT, ACTIVE_SHARE_INPUT, CHECKING_SHARE_INPUT, SAVING_SHARE_INPUT,
};
pub use comparison::ScenarioSummary;
