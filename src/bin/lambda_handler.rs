//! AWS Lambda handler for what-if projection queries
//!
//! Accepts the parameter rows and a month via JSON and returns the derived
//! metrics for each requested scenario plus the comparison against Base.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use platform_projections::{
    projection::{DerivedMetrics, EngineConfig, ProjectionEngine, ScenarioSummary},
    scenario::ScenarioPolicy,
    ParameterRow, ParameterTable,
};
use serde::{Deserialize, Serialize};

/// Input for one query
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Long-format inputs (input_type, month, value)
    pub rows: Vec<ParameterRow>,

    /// Month to evaluate (default: 12)
    #[serde(default = "default_month")]
    pub month: u32,

    /// Scenarios to evaluate (default: Base, ±10%, ±25%)
    #[serde(default = "ScenarioPolicy::comparison_set")]
    pub scenarios: Vec<String>,

    /// Multiplier for the Custom scenario
    #[serde(default)]
    pub custom_multiplier: Option<f64>,
}

fn default_month() -> u32 { 12 }

/// Output for one query
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub month: u32,
    pub input_types: usize,
    pub duplicates_ignored: usize,
    pub growth_rate: f64,
    pub metrics: Vec<DerivedMetrics>,
    pub comparison: Vec<ScenarioSummary>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectionResponse {
    fn failed(month: u32, message: String) -> Self {
        Self {
            month,
            input_types: 0,
            duplicates_ignored: 0,
            growth_rate: 0.0,
            metrics: Vec::new(),
            comparison: Vec::new(),
            execution_time_ms: 0,
            error: Some(message),
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let mut config = EngineConfig::standard();
    if let Some(multiplier) = request.custom_multiplier {
        config.scenarios = match ScenarioPolicy::standard().with_custom_multiplier(multiplier) {
            Ok(policy) => policy,
            Err(e) => return Ok(ProjectionResponse::failed(request.month, e.to_string())),
        };
    }

    let table = ParameterTable::from_rows(request.rows);
    let input_types = table.len();
    let duplicates_ignored = table.duplicates();
    let engine = ProjectionEngine::new(table, config);

    log::info!(
        "Projecting month {} for {} scenarios over {} input types",
        request.month,
        request.scenarios.len(),
        input_types
    );

    let metrics = request
        .scenarios
        .iter()
        .map(|scenario| engine.derive(request.month, scenario))
        .collect();
    let comparison = engine.compare_scenarios(request.month, &request.scenarios);

    Ok(ProjectionResponse {
        month: request.month,
        input_types,
        duplicates_ignored,
        growth_rate: engine.interpolator().growth_rate(),
        metrics,
        comparison,
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
