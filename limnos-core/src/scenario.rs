//! Pollution-management scenario descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{LimnosError, LimnosResult};
use crate::timeseries::FloatValue;

/// One pollution-management policy to simulate.
///
/// A scenario bundles the interventions applied on top of a base parameter
/// set: how much of each urban discharge is removed by wastewater treatment,
/// how much biomass is mechanically harvested per year, how much is seeded,
/// and any direct parameter overrides (override wins over the base value).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    /// Fraction of the primary urban discharge removed by treatment, 0 to 1
    pub treatment_efficiency_primary: FloatValue,
    /// Fraction of the secondary urban discharge removed by treatment, 0 to 1
    pub treatment_efficiency_secondary: FloatValue,
    /// Constant mechanical harvesting rate
    /// unit: t/yr
    pub mechanical_removal: FloatValue,
    /// Constant biomass seeding rate
    /// unit: t/yr
    #[serde(default)]
    pub biomass_seeding: FloatValue,
    /// Parameter overrides merged into the base parameter set at model
    /// construction
    #[serde(default)]
    pub overrides: HashMap<String, FloatValue>,
}

impl Scenario {
    /// A do-nothing scenario with the given name: no treatment, no removal,
    /// no seeding, no overrides.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            treatment_efficiency_primary: 0.0,
            treatment_efficiency_secondary: 0.0,
            mechanical_removal: 0.0,
            biomass_seeding: 0.0,
            overrides: HashMap::new(),
        }
    }

    pub fn with_treatment(mut self, primary: FloatValue, secondary: FloatValue) -> Self {
        self.treatment_efficiency_primary = primary;
        self.treatment_efficiency_secondary = secondary;
        self
    }

    pub fn with_mechanical_removal(mut self, removal: FloatValue) -> Self {
        self.mechanical_removal = removal;
        self
    }

    pub fn with_biomass_seeding(mut self, seeding: FloatValue) -> Self {
        self.biomass_seeding = seeding;
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, value: FloatValue) -> Self {
        self.overrides.insert(name.into(), value);
        self
    }

    /// Check the intervention values against their allowed ranges.
    pub fn validate(&self) -> LimnosResult<()> {
        let invalid = |reason: String| LimnosError::InvalidScenario {
            name: self.name.clone(),
            reason,
        };

        for (label, efficiency) in [
            ("primary", self.treatment_efficiency_primary),
            ("secondary", self.treatment_efficiency_secondary),
        ] {
            if !(0.0..=1.0).contains(&efficiency) {
                return Err(invalid(format!(
                    "{label} treatment efficiency must be between 0 and 1, got {efficiency}"
                )));
            }
        }
        if self.mechanical_removal < 0.0 {
            return Err(invalid(format!(
                "mechanical removal must be non-negative, got {}",
                self.mechanical_removal
            )));
        }
        if self.biomass_seeding < 0.0 {
            return Err(invalid(format!(
                "biomass seeding must be non-negative, got {}",
                self.biomass_seeding
            )));
        }
        Ok(())
    }
}
