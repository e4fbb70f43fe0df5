//! Sampled trajectories produced by a simulation run.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::dynamics::{StateVector, BIOMASS, NUTRIENTS, OXYGEN, VOLUME};
use crate::ivp::GridSolution;

/// Floating point value used across the model
pub type FloatValue = f64;
/// Simulation time, in years from the start of the run
pub type Time = FloatValue;

/// The discretized trajectory of one simulation run.
///
/// Parallel arrays of sample times and the value of each state component at
/// those times. A result is owned by the model instance that produced it and
/// is overwritten by the next call to `simulate`; downstream consumers only
/// ever see shared references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Name of the scenario that produced this trajectory
    pub scenario: String,
    /// Sample times
    /// unit: yr
    pub time: Array1<Time>,
    /// Water volume at each sample
    /// unit: m^3
    pub volume: Array1<FloatValue>,
    /// Dissolved nutrient concentration at each sample
    /// unit: mg/L
    pub nutrients: Array1<FloatValue>,
    /// Macrophyte biomass at each sample
    /// unit: t
    pub biomass: Array1<FloatValue>,
    /// Dissolved oxygen concentration at each sample
    /// unit: mg/L
    pub oxygen: Array1<FloatValue>,
    /// Whether the integration completed. Failed integrations never produce
    /// a result, so this is true for every stored trajectory.
    pub success: bool,
}

impl SimulationResult {
    /// Build a result from a completed grid solution.
    pub fn from_solution(scenario: impl Into<String>, solution: GridSolution) -> Self {
        let component = |idx: usize| {
            Array1::from_iter(solution.states.iter().map(|state| state[idx]))
        };

        Self {
            scenario: scenario.into(),
            volume: component(VOLUME),
            nutrients: component(NUTRIENTS),
            biomass: component(BIOMASS),
            oxygen: component(OXYGEN),
            time: Array1::from_vec(solution.time),
            success: true,
        }
    }

    /// Number of samples in the trajectory
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// State vector at a given sample index
    pub fn sample(&self, index: usize) -> Option<StateVector> {
        if index >= self.len() {
            return None;
        }
        Some(StateVector::new(
            self.volume[index],
            self.nutrients[index],
            self.biomass[index],
            self.oxygen[index],
        ))
    }

    pub fn first_sample(&self) -> Option<StateVector> {
        self.sample(0)
    }

    pub fn last_sample(&self) -> Option<StateVector> {
        self.len().checked_sub(1).and_then(|idx| self.sample(idx))
    }
}
