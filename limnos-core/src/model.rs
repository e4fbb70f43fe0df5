//! Stateful simulation session.
//!
//! [`LakeModel`] owns the merged parameter set, the current state vector and
//! the latest result, and drives the pure rate evaluator through the
//! integration driver. The split keeps the rate equations trivially
//! unit-testable while the session layer carries the lifecycle: construct,
//! simulate, inspect metrics, mutate the state, run again.

use log::debug;

use crate::constants::BIOMASS_EPSILON;
use crate::dynamics::{InterventionPolicy, LakeDynamics, StateVector, BIOMASS, OXYGEN};
use crate::errors::{LimnosError, LimnosResult};
use crate::ivp::IntegrationDriver;
use crate::metrics::ScenarioMetrics;
use crate::parameters::LakeParameters;
use crate::scenario::Scenario;
use crate::timeseries::{FloatValue, SimulationResult};

/// One lake simulation session under a fixed scenario.
///
/// Successive [`simulate`](Self::simulate) calls chain: each run starts from
/// the state the previous one ended in, and the state-mutation operations
/// (`remove_all_biomass`, `add_biomass`, `reset`) act on the same state
/// between runs. Instances are independent; batch comparison uses one model
/// per scenario.
#[derive(Debug, Clone)]
pub struct LakeModel {
    dynamics: LakeDynamics,
    driver: IntegrationDriver,
    scenario: Scenario,
    initial_state: StateVector,
    state: StateVector,
    result: Option<SimulationResult>,
}

impl LakeModel {
    /// Build a model from a base parameter set and a scenario.
    ///
    /// The scenario is validated, its overrides are merged into the
    /// parameter set (override wins), and the merged set is validated
    /// before anything else runs. The initial biomass is floored to a small
    /// positive value so the consumption terms stay well-defined when "no
    /// biomass" is requested.
    pub fn new(parameters: LakeParameters, scenario: Scenario) -> LimnosResult<Self> {
        scenario.validate()?;

        let mut parameters = parameters;
        for (name, value) in &scenario.overrides {
            parameters.set(name, *value)?;
        }
        parameters.validate()?;

        let initial_state = StateVector::new(
            parameters.initial_volume,
            parameters.initial_nutrients,
            parameters.initial_biomass.max(BIOMASS_EPSILON),
            parameters.initial_oxygen,
        );
        let policy = InterventionPolicy::from_scenario(&scenario);

        Ok(Self {
            dynamics: LakeDynamics::new(parameters, policy),
            driver: IntegrationDriver::default(),
            scenario,
            initial_state,
            state: initial_state,
            result: None,
        })
    }

    /// Integrate from the current state over the configured horizon.
    ///
    /// On success the current state advances to the trajectory's final
    /// sample and the stored result is replaced. On failure no partial
    /// result is stored and the previous state is kept.
    pub fn simulate(&mut self) -> LimnosResult<&SimulationResult> {
        let horizon = self.dynamics.parameters().simulation_horizon;
        let step = self.dynamics.parameters().output_step;
        debug!(
            "scenario `{}`: integrating {} yr at {} yr output steps",
            self.scenario.name, horizon, step
        );

        let solution = self
            .driver
            .integrate(&self.dynamics, self.state, horizon, step)?;
        if let Some(last) = solution.states.last() {
            self.state = *last;
        }

        let result = SimulationResult::from_solution(self.scenario.name.clone(), solution);
        Ok(self.result.insert(result))
    }

    /// Summary indicators of the stored result.
    ///
    /// Requires a completed [`simulate`](Self::simulate) call.
    pub fn metrics(&self) -> LimnosResult<ScenarioMetrics> {
        let result = self.result.as_ref().ok_or(LimnosError::ResultNotAvailable)?;
        let first = result
            .first_sample()
            .ok_or(LimnosError::ResultNotAvailable)?;
        let last = result.last_sample().ok_or(LimnosError::ResultNotAvailable)?;

        Ok(ScenarioMetrics::from_samples(
            result.scenario.clone(),
            &first,
            &last,
            self.dynamics.parameters().biomass_capacity,
            self.dynamics.parameters().simulation_horizon,
        ))
    }

    /// Harvest the entire mat from the lake.
    ///
    /// Biomass drops to its near-zero floor. The nutrient concentration is
    /// left exactly unchanged: phosphorus already absorbed into the removed
    /// tissue does not return to the water. Oxygen is set back to the
    /// recorded initial value, removing whatever impact the mat currently
    /// had on it. Volume is untouched. Returns the tonnage removed.
    pub fn remove_all_biomass(&mut self) -> FloatValue {
        let removed = (self.state[BIOMASS] - BIOMASS_EPSILON).max(0.0);
        self.state[BIOMASS] = BIOMASS_EPSILON;
        self.state[OXYGEN] = self.initial_state[OXYGEN];
        removed
    }

    /// Seed the lake with additional biomass.
    ///
    /// The amount must be finite and positive; anything else is rejected
    /// without touching the state.
    pub fn add_biomass(&mut self, amount: FloatValue) -> LimnosResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LimnosError::InvalidBiomassAddition(amount));
        }
        self.state[BIOMASS] += amount;
        Ok(())
    }

    /// Restore the originally constructed initial state and discard any
    /// stored result.
    pub fn reset(&mut self) {
        self.state = self.initial_state;
        self.result = None;
    }

    pub fn current_state(&self) -> &StateVector {
        &self.state
    }

    pub fn initial_state(&self) -> &StateVector {
        &self.initial_state
    }

    pub fn current_biomass(&self) -> FloatValue {
        self.state[BIOMASS]
    }

    /// Occupancy of the carrying capacity, clamped to [0, 100] percent for
    /// display.
    pub fn occupancy_percent(&self) -> FloatValue {
        (self.dynamics.occupancy(self.state[BIOMASS]) * 100.0).clamp(0.0, 100.0)
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn parameters(&self) -> &LakeParameters {
        self.dynamics.parameters()
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }
}
