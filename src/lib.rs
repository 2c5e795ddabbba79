//! Platform Projections - monthly account, transaction and revenue projections
//!
//! This library provides:
//! - A frozen (input-type, month) parameter table loaded from CSV
//! - Piecewise-linear interpolation between anchor months, compounding growth beyond them
//! - Scenario multipliers that scale the account-count driver only
//! - A three-stage derivation pipeline (accounts → transactions → revenue)
//! - Batch series generation, scenario comparison and export

pub mod error;
pub mod parameters;
pub mod interpolation;
pub mod scenario;
pub mod projection;
pub mod export;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{ProjectionError, ProjectionResult};
pub use parameters::{ParameterRow, ParameterTable};
pub use interpolation::{AnchorSchedule, GrowthPolicy, Interpolator};
pub use scenario::{ScenarioPolicy, ScenarioRunner};
pub use projection::{ProjectionEngine, EngineConfig, DerivedMetrics, ScenarioSummary};
