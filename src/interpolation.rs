//! Piecewise-linear interpolation between anchor months, with compounding
//! growth beyond the final anchor

use crate::error::{ProjectionError, ProjectionResult};
use crate::parameters::ParameterTable;
use serde::{Deserialize, Serialize};

/// Months at which raw inputs are supplied
pub const STANDARD_ANCHOR_MONTHS: [u32; 5] = [1, 6, 12, 24, 36];

/// Input type holding the post-anchor monthly growth rate
pub const GROWTH_RATE_INPUT: &str = "GrowthRateM37Plus";

/// Month at which the growth rate is read from the table
pub const GROWTH_RATE_MONTH: u32 = 37;

/// Growth rate used when the table does not supply one
pub const DEFAULT_GROWTH_RATE: f64 = 0.01;

/// Ordered, strictly ascending set of anchor months
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct AnchorSchedule {
    months: Vec<u32>,
}

impl AnchorSchedule {
    /// The 1/6/12/24/36 schedule
    pub fn standard() -> Self {
        Self {
            months: STANDARD_ANCHOR_MONTHS.to_vec(),
        }
    }

    /// Custom schedule; must be non-empty and strictly ascending
    pub fn new(months: Vec<u32>) -> ProjectionResult<Self> {
        if months.is_empty() {
            return Err(ProjectionError::InvalidAnchors("no anchor months".into()));
        }
        if let Some(pair) = months.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ProjectionError::InvalidAnchors(format!(
                "months must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { months })
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn first(&self) -> u32 {
        self.months[0]
    }

    pub fn last(&self) -> u32 {
        self.months[self.months.len() - 1]
    }
}

impl Default for AnchorSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<u32>> for AnchorSchedule {
    type Error = ProjectionError;

    fn try_from(months: Vec<u32>) -> ProjectionResult<Self> {
        Self::new(months)
    }
}

impl From<AnchorSchedule> for Vec<u32> {
    fn from(schedule: AnchorSchedule) -> Self {
        schedule.months
    }
}

/// Where the extrapolation growth rate comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPolicy {
    pub input_type: String,
    pub lookup_month: u32,
    pub default_rate: f64,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            input_type: GROWTH_RATE_INPUT.to_string(),
            lookup_month: GROWTH_RATE_MONTH,
            default_rate: DEFAULT_GROWTH_RATE,
        }
    }
}

/// Maps (input type, month) to a value using the parameter table
///
/// Pure: the result depends only on the table, the schedule and the arguments.
/// Scenarios never reach this type.
#[derive(Debug, Clone)]
pub struct Interpolator {
    table: ParameterTable,
    anchors: AnchorSchedule,
    growth: GrowthPolicy,
}

impl Interpolator {
    pub fn new(table: ParameterTable, anchors: AnchorSchedule, growth: GrowthPolicy) -> Self {
        Self {
            table,
            anchors,
            growth,
        }
    }

    /// Interpolator over the standard anchor schedule and growth policy
    pub fn standard(table: ParameterTable) -> Self {
        Self::new(table, AnchorSchedule::standard(), GrowthPolicy::default())
    }

    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    pub fn anchors(&self) -> &AnchorSchedule {
        &self.anchors
    }

    /// Monthly growth rate applied beyond the last anchor
    pub fn growth_rate(&self) -> f64 {
        self.table
            .get(&self.growth.input_type, self.growth.lookup_month)
            .unwrap_or(self.growth.default_rate)
    }

    /// Interpolated value of `input_type` at `month`
    ///
    /// Unknown input types and missing anchor values resolve to 0. Bands are
    /// right-inclusive: a month equal to an anchor is answered by the band
    /// ending there, which returns the anchor value itself.
    pub fn value(&self, input_type: &str, month: u32) -> f64 {
        let Some(series) = self.table.series(input_type) else {
            log::debug!("Input type '{}' not in parameter table, using 0", input_type);
            return 0.0;
        };
        let anchor = |m: u32| series.get(&m).copied().unwrap_or(0.0);

        let first = self.anchors.first();
        if month <= first {
            return anchor(first);
        }

        for band in self.anchors.months().windows(2) {
            let (lo, hi) = (band[0], band[1]);
            if month > hi {
                continue;
            }

            let hi_value = anchor(hi);
            if month == hi {
                return hi_value;
            }
            let lo_value = anchor(lo);
            let fraction = (month - lo) as f64 / (hi - lo) as f64;
            return lo_value + (hi_value - lo_value) * fraction;
        }

        let last = self.anchors.last();
        let periods = (month - last) as f64;
        anchor(last) * (1.0 + self.growth_rate()).powf(periods)
    }
}
