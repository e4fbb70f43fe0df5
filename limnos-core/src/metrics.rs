//! Summary indicators computed from a completed trajectory.

use serde::{Deserialize, Serialize};

use crate::dynamics::{StateVector, BIOMASS, NUTRIENTS, OXYGEN, VOLUME};
use crate::timeseries::{FloatValue, Time};

/// Percentage reduction from `start` to `end`, positive when the variable
/// decreased. Defined as 0 when the starting value is exactly zero; that is
/// a division guard, not a modelling claim.
pub fn reduction_pct(start: FloatValue, end: FloatValue) -> FloatValue {
    if start == 0.0 {
        0.0
    } else {
        (start - end) / start * 100.0
    }
}

/// Percentage improvement from `start` to `end`, positive when the variable
/// increased. Same zero-start guard as [`reduction_pct`].
pub fn improvement_pct(start: FloatValue, end: FloatValue) -> FloatValue {
    if start == 0.0 {
        0.0
    } else {
        (end - start) / start * 100.0
    }
}

/// Impact indicators for one scenario run.
///
/// Recomputed fresh from the first and last samples of the stored result on
/// every request; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub scenario: String,
    /// Nutrient concentration reduction over the run, percent
    pub nutrient_reduction_pct: FloatValue,
    /// Biomass reduction over the run, percent
    pub biomass_reduction_pct: FloatValue,
    /// Dissolved-oxygen improvement over the run, percent
    pub oxygen_improvement_pct: FloatValue,

    pub initial_volume: FloatValue,
    pub final_volume: FloatValue,
    pub initial_nutrients: FloatValue,
    pub final_nutrients: FloatValue,
    pub initial_biomass: FloatValue,
    pub final_biomass: FloatValue,
    pub initial_oxygen: FloatValue,
    pub final_oxygen: FloatValue,

    /// Final occupancy of the carrying capacity, clamped to [0, 100] percent
    pub final_occupancy_pct: FloatValue,
    /// Simulated horizon
    /// unit: yr
    pub horizon: Time,
}

impl ScenarioMetrics {
    pub fn from_samples(
        scenario: impl Into<String>,
        first: &StateVector,
        last: &StateVector,
        biomass_capacity: FloatValue,
        horizon: Time,
    ) -> Self {
        let final_occupancy_pct = if biomass_capacity > 0.0 {
            (last[BIOMASS] / biomass_capacity * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            scenario: scenario.into(),
            nutrient_reduction_pct: reduction_pct(first[NUTRIENTS], last[NUTRIENTS]),
            biomass_reduction_pct: reduction_pct(first[BIOMASS], last[BIOMASS]),
            oxygen_improvement_pct: improvement_pct(first[OXYGEN], last[OXYGEN]),
            initial_volume: first[VOLUME],
            final_volume: last[VOLUME],
            initial_nutrients: first[NUTRIENTS],
            final_nutrients: last[NUTRIENTS],
            initial_biomass: first[BIOMASS],
            final_biomass: last[BIOMASS],
            initial_oxygen: first[OXYGEN],
            final_oxygen: last[OXYGEN],
            final_occupancy_pct,
            horizon,
        }
    }
}
