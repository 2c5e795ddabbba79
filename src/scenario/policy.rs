//! Scenario multipliers applied to the account-count driver

use crate::error::{ProjectionError, ProjectionResult};
use serde::{Deserialize, Serialize};

pub const BASE: &str = "Base";
pub const HIGH_10: &str = "High_10";
pub const LOW_10: &str = "Low_10";
pub const HIGH_25: &str = "High_25";
pub const LOW_25: &str = "Low_25";
pub const CUSTOM: &str = "Custom";

/// Multiplier applied to total accounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplier {
    Fixed(f64),
    /// Supplied at run time; 1.0 until resolved
    Variable,
}

impl Multiplier {
    pub fn resolved(&self) -> Option<f64> {
        match *self {
            Multiplier::Fixed(m) => Some(m),
            Multiplier::Variable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub multiplier: Multiplier,
}

impl Scenario {
    pub fn fixed(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier: Multiplier::Fixed(multiplier),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiplier: Multiplier::Variable,
        }
    }
}

fn validate(name: &str, value: f64) -> ProjectionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::InvalidMultiplier {
            scenario: name.to_string(),
            value,
        })
    }
}

/// Named scenario set
///
/// Only the account count is scaled. Shares, per-active rates and fees are
/// read straight from the interpolator and never pass through here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scenario>", into = "Vec<Scenario>")]
pub struct ScenarioPolicy {
    scenarios: Vec<Scenario>,
}

impl ScenarioPolicy {
    /// Base, ±10%, ±25% and an unresolved Custom scenario
    pub fn standard() -> Self {
        Self {
            scenarios: vec![
                Scenario::fixed(BASE, 1.0),
                Scenario::fixed(HIGH_10, 1.1),
                Scenario::fixed(LOW_10, 0.9),
                Scenario::fixed(HIGH_25, 1.25),
                Scenario::fixed(LOW_25, 0.75),
                Scenario::variable(CUSTOM),
            ],
        }
    }

    /// Build from an explicit scenario list; fixed multipliers must be positive
    pub fn new(scenarios: Vec<Scenario>) -> ProjectionResult<Self> {
        for scenario in &scenarios {
            if let Multiplier::Fixed(m) = scenario.multiplier {
                validate(&scenario.name, m)?;
            }
        }
        Ok(Self { scenarios })
    }

    /// Resolve every variable scenario to `multiplier`
    pub fn with_custom_multiplier(mut self, multiplier: f64) -> ProjectionResult<Self> {
        validate(CUSTOM, multiplier)?;
        for scenario in &mut self.scenarios {
            if scenario.multiplier == Multiplier::Variable {
                scenario.multiplier = Multiplier::Fixed(multiplier);
            }
        }
        Ok(self)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Multiplier for `name`; unknown names and unresolved variables give 1.0
    pub fn multiplier(&self, name: &str) -> f64 {
        match self.get(name).map(|s| s.multiplier) {
            Some(Multiplier::Fixed(m)) => m,
            Some(Multiplier::Variable) => {
                log::debug!("Scenario '{}' has no resolved multiplier, using 1.0", name);
                1.0
            }
            None => {
                log::debug!("Unknown scenario '{}', using 1.0", name);
                1.0
            }
        }
    }

    /// Scenario-adjusted account count
    pub fn adjusted_accounts(&self, base_accounts: f64, name: &str) -> f64 {
        base_accounts * self.multiplier(name)
    }

    /// Scenarios shown side by side in comparisons
    pub fn comparison_set() -> Vec<String> {
        [BASE, HIGH_10, LOW_10, HIGH_25, LOW_25]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for ScenarioPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Scenario>> for ScenarioPolicy {
    type Error = ProjectionError;

    fn try_from(scenarios: Vec<Scenario>) -> ProjectionResult<Self> {
        Self::new(scenarios)
    }
}

impl From<ScenarioPolicy> for Vec<Scenario> {
    fn from(policy: ScenarioPolicy) -> Self {
        policy.scenarios
    }
}
