//! Scenario definitions and the batch runner that evaluates them

mod policy;
mod runner;

pub use policy::{
    Multiplier, Scenario, ScenarioPolicy, BASE, CUSTOM, HIGH_10, HIGH_25, LOW_10, LOW_25,
};
pub use runner::{
    InterpolationCheck, RateCheck, ScenarioRunner, ScenarioVerification, SeriesRow,
    INTERPOLATION_CHECK_INPUTS, INTERPOLATION_CHECK_MONTHS, VERIFIED_RATE_INPUTS,
};
