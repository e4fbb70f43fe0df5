//! Sequential batch execution of scenarios against a shared parameter set.
//!
//! The runner owns a validated base parameter set, builds one independent
//! model per scenario, and collects results and metrics for the comparison
//! table. All recovery policy lives here: a failed scenario is logged and
//! skipped, never retried, and never aborts the rest of the batch.

use limnos_core::errors::{LimnosError, LimnosResult};
use limnos_core::metrics::ScenarioMetrics;
use limnos_core::model::LakeModel;
use limnos_core::parameters::LakeParameters;
use limnos_core::scenario::Scenario;
use limnos_core::timeseries::{FloatValue, SimulationResult};
use log::{info, warn};
use serde::Serialize;

/// Everything produced by one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: SimulationResult,
    pub metrics: ScenarioMetrics,
}

/// Metric used to rank scenarios against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingCriterion {
    NutrientReduction,
    BiomassReduction,
    OxygenImprovement,
}

impl RankingCriterion {
    pub fn value(&self, metrics: &ScenarioMetrics) -> FloatValue {
        match self {
            Self::NutrientReduction => metrics.nutrient_reduction_pct,
            Self::BiomassReduction => metrics.biomass_reduction_pct,
            Self::OxygenImprovement => metrics.oxygen_improvement_pct,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NutrientReduction => "nutrient reduction",
            Self::BiomassReduction => "biomass reduction",
            Self::OxygenImprovement => "oxygen improvement",
        }
    }
}

/// One row of the scenario comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub scenario: String,
    pub treatment_efficiency_primary_pct: FloatValue,
    pub treatment_efficiency_secondary_pct: FloatValue,
    pub mechanical_removal: FloatValue,
    pub final_nutrients: FloatValue,
    pub nutrient_reduction_pct: FloatValue,
    pub final_biomass: FloatValue,
    pub biomass_reduction_pct: FloatValue,
    pub final_oxygen: FloatValue,
    pub oxygen_improvement_pct: FloatValue,
}

/// Runs scenarios sequentially and keeps their outcomes in insertion order.
pub struct ScenarioRunner {
    parameters: LakeParameters,
    outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioRunner {
    /// Build a runner over a validated base parameter set.
    pub fn new(parameters: LakeParameters) -> LimnosResult<Self> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            outcomes: Vec::new(),
        })
    }

    /// Run one scenario to completion and store its outcome.
    ///
    /// Re-running a scenario with the same name replaces its previous
    /// outcome.
    pub fn run_scenario(&mut self, scenario: Scenario) -> LimnosResult<&ScenarioOutcome> {
        info!("running scenario `{}`", scenario.name);

        let mut model = LakeModel::new(self.parameters.clone(), scenario.clone())?;
        let result = model.simulate()?.clone();
        let metrics = model.metrics()?;

        self.outcomes
            .retain(|outcome| outcome.scenario.name != scenario.name);
        self.outcomes.push(ScenarioOutcome {
            scenario,
            result,
            metrics,
        });
        Ok(self.outcomes.last().expect("outcome just stored"))
    }

    /// Run one preset scenario by name.
    pub fn run_preset(&mut self, name: &str) -> LimnosResult<&ScenarioOutcome> {
        self.run_scenario(limnos_scenarios::by_name(name)?)
    }

    /// Run every preset sequentially, skipping failed scenarios.
    ///
    /// Returns the failures so the caller can report them; successful
    /// outcomes are stored either way.
    pub fn run_all(&mut self) -> Vec<(String, LimnosError)> {
        let mut failures = Vec::new();
        for scenario in limnos_scenarios::all() {
            let name = scenario.name.clone();
            if let Err(error) = self.run_scenario(scenario) {
                warn!("scenario `{}` failed: {}", name, error);
                failures.push((name, error));
            }
        }
        failures
    }

    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    pub fn parameters(&self) -> &LakeParameters {
        &self.parameters
    }

    /// Row-per-scenario comparison table, in run order.
    pub fn comparison_rows(&self) -> Vec<ComparisonRow> {
        self.outcomes
            .iter()
            .map(|outcome| ComparisonRow {
                scenario: outcome.scenario.name.clone(),
                treatment_efficiency_primary_pct: outcome.scenario.treatment_efficiency_primary
                    * 100.0,
                treatment_efficiency_secondary_pct: outcome.scenario.treatment_efficiency_secondary
                    * 100.0,
                mechanical_removal: outcome.scenario.mechanical_removal,
                final_nutrients: outcome.metrics.final_nutrients,
                nutrient_reduction_pct: outcome.metrics.nutrient_reduction_pct,
                final_biomass: outcome.metrics.final_biomass,
                biomass_reduction_pct: outcome.metrics.biomass_reduction_pct,
                final_oxygen: outcome.metrics.final_oxygen,
                oxygen_improvement_pct: outcome.metrics.oxygen_improvement_pct,
            })
            .collect()
    }

    /// The stored outcome that scores highest on the given criterion.
    pub fn best_by(&self, criterion: RankingCriterion) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().max_by(|a, b| {
            criterion
                .value(&a.metrics)
                .total_cmp(&criterion.value(&b.metrics))
        })
    }
}
