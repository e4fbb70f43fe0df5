//! Lake parameter set.
//!
//! One explicit struct with named fields and defaults resolved at
//! construction. Scenario overrides are merged by name through
//! [`LakeParameters::set`] before validation, so the rate equations only
//! ever read typed fields.

use serde::{Deserialize, Serialize};

use crate::errors::{LimnosError, LimnosResult};
use crate::timeseries::{FloatValue, Time};

/// Calibration and control parameters for a lake simulation.
///
/// Defaults describe a large high-altitude lake with two major urban
/// phosphorus sources and an established floating macrophyte population.
/// Immutable once a model is constructed; the only mutation path is the
/// scenario-override merge applied during construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeParameters {
    /// Initial water volume
    /// unit: m^3
    pub initial_volume: FloatValue,
    /// Initial dissolved phosphorus concentration
    /// unit: mg/L
    pub initial_nutrients: FloatValue,
    /// Initial macrophyte biomass
    /// unit: t
    pub initial_biomass: FloatValue,
    /// Initial dissolved oxygen concentration
    /// unit: mg/L
    pub initial_oxygen: FloatValue,

    /// Lake surface area
    /// unit: m^2
    pub lake_area: FloatValue,
    /// Mean depth of the basin
    /// unit: m
    pub mean_depth: FloatValue,
    /// Annual precipitation depth over the lake surface
    /// unit: m/yr
    pub annual_precipitation: FloatValue,
    /// Annual evaporation depth from the lake surface
    /// unit: m/yr
    pub annual_evaporation: FloatValue,
    /// Combined river inflow
    /// unit: m^3/yr
    pub river_inflow: FloatValue,
    /// Human water extraction
    /// unit: m^3/yr
    pub human_extraction: FloatValue,

    /// Annual phosphorus discharge from the primary urban source
    /// unit: t/yr
    pub discharge_primary: FloatValue,
    /// Annual phosphorus discharge from the secondary urban source
    /// unit: t/yr
    pub discharge_secondary: FloatValue,
    /// Annual phosphorus discharge from diffuse sources. Never reduced by
    /// wastewater treatment.
    /// unit: t/yr
    pub discharge_diffuse: FloatValue,
    /// Phosphorus concentration of untreated wastewater
    /// unit: mg/L
    pub wastewater_concentration: FloatValue,

    /// Intrinsic macrophyte growth rate
    /// unit: 1/yr
    pub growth_rate: FloatValue,
    /// Natural macrophyte mortality rate
    /// unit: 1/yr
    pub mortality_rate: FloatValue,
    /// Half-saturation nutrient concentration of the Monod growth term
    /// unit: mg/L
    pub nutrient_half_saturation: FloatValue,
    /// Nutrient concentration drawn down per tonne of actively absorbing
    /// biomass
    /// unit: (mg/L) / (t yr)
    pub nutrient_uptake_coefficient: FloatValue,
    /// Macrophyte carrying capacity of the basin
    /// unit: t
    pub biomass_capacity: FloatValue,

    /// Atmospheric reaeration rate
    /// unit: 1/yr
    pub reaeration_rate: FloatValue,
    /// Dissolved oxygen saturation concentration
    /// unit: mg/L
    pub oxygen_saturation: FloatValue,
    /// Oxygen consumed by macrophyte respiration per tonne of biomass
    /// unit: (mg/L) / (t yr)
    pub oxygen_respiration_coefficient: FloatValue,
    /// Oxygen consumed by decomposition of organic matter, per unit of
    /// nutrient concentration
    /// unit: 1/yr
    pub oxygen_decomposition_coefficient: FloatValue,

    /// Fraction of the nutrient pool lost to sediment per year
    /// unit: 1/yr
    pub nutrient_sedimentation_rate: FloatValue,

    /// Total simulated horizon
    /// unit: yr
    pub simulation_horizon: Time,
    /// Output sampling step
    /// unit: yr
    pub output_step: Time,
}

impl Default for LakeParameters {
    fn default() -> Self {
        Self {
            initial_volume: 8.93e11,
            initial_nutrients: 0.028,
            initial_biomass: 300.0,
            initial_oxygen: 8.0,

            lake_area: 8.372e9,
            mean_depth: 107.0,
            annual_precipitation: 0.75,
            annual_evaporation: 1.55,
            river_inflow: 6.5e9,
            human_extraction: 1.5e8,

            discharge_primary: 15.0,
            discharge_secondary: 15.0,
            discharge_diffuse: 5.0,
            wastewater_concentration: 8.0,

            growth_rate: 1.2,
            mortality_rate: 1.0,
            nutrient_half_saturation: 0.05,
            nutrient_uptake_coefficient: 0.001,
            biomass_capacity: 2000.0,

            reaeration_rate: 5.0,
            oxygen_saturation: 8.5,
            oxygen_respiration_coefficient: 0.002,
            oxygen_decomposition_coefficient: 0.05,

            nutrient_sedimentation_rate: 0.25,

            simulation_horizon: 20.0,
            output_step: 0.1,
        }
    }
}

/// Validated ranges for the externally supplied stocks and controls.
const RANGES: &[(&str, FloatValue, FloatValue)] = &[
    ("initial_volume", 5e11, 1.2e12),
    ("initial_nutrients", 0.001, 1.0),
    ("initial_biomass", 0.0, 5000.0),
    ("initial_oxygen", 0.0, 12.0),
    ("simulation_horizon", 0.0, 200.0),
];

impl LakeParameters {
    /// Check the externally supplied values against their validated ranges.
    ///
    /// Out-of-range input is a configuration error raised before a model is
    /// ever constructed from this parameter set.
    pub fn validate(&self) -> LimnosResult<()> {
        for &(name, min, max) in RANGES {
            let value = self.get(name)?;
            if !(min..=max).contains(&value) {
                return Err(LimnosError::ParameterOutOfRange {
                    name,
                    value,
                    min,
                    max,
                });
            }
        }
        if self.output_step <= 0.0 {
            return Err(LimnosError::InvalidStep(self.output_step));
        }
        Ok(())
    }

    /// Read a parameter by name.
    pub fn get(&self, name: &str) -> LimnosResult<FloatValue> {
        let value = match name {
            "initial_volume" => self.initial_volume,
            "initial_nutrients" => self.initial_nutrients,
            "initial_biomass" => self.initial_biomass,
            "initial_oxygen" => self.initial_oxygen,
            "lake_area" => self.lake_area,
            "mean_depth" => self.mean_depth,
            "annual_precipitation" => self.annual_precipitation,
            "annual_evaporation" => self.annual_evaporation,
            "river_inflow" => self.river_inflow,
            "human_extraction" => self.human_extraction,
            "discharge_primary" => self.discharge_primary,
            "discharge_secondary" => self.discharge_secondary,
            "discharge_diffuse" => self.discharge_diffuse,
            "wastewater_concentration" => self.wastewater_concentration,
            "growth_rate" => self.growth_rate,
            "mortality_rate" => self.mortality_rate,
            "nutrient_half_saturation" => self.nutrient_half_saturation,
            "nutrient_uptake_coefficient" => self.nutrient_uptake_coefficient,
            "biomass_capacity" => self.biomass_capacity,
            "reaeration_rate" => self.reaeration_rate,
            "oxygen_saturation" => self.oxygen_saturation,
            "oxygen_respiration_coefficient" => self.oxygen_respiration_coefficient,
            "oxygen_decomposition_coefficient" => self.oxygen_decomposition_coefficient,
            "nutrient_sedimentation_rate" => self.nutrient_sedimentation_rate,
            "simulation_horizon" => self.simulation_horizon,
            "output_step" => self.output_step,
            _ => return Err(LimnosError::UnknownParameter(name.to_string())),
        };
        Ok(value)
    }

    /// Assign a parameter by name.
    ///
    /// Used for the scenario-override merge at model construction; unknown
    /// names are configuration errors rather than silently ignored keys.
    pub fn set(&mut self, name: &str, value: FloatValue) -> LimnosResult<()> {
        let slot = match name {
            "initial_volume" => &mut self.initial_volume,
            "initial_nutrients" => &mut self.initial_nutrients,
            "initial_biomass" => &mut self.initial_biomass,
            "initial_oxygen" => &mut self.initial_oxygen,
            "lake_area" => &mut self.lake_area,
            "mean_depth" => &mut self.mean_depth,
            "annual_precipitation" => &mut self.annual_precipitation,
            "annual_evaporation" => &mut self.annual_evaporation,
            "river_inflow" => &mut self.river_inflow,
            "human_extraction" => &mut self.human_extraction,
            "discharge_primary" => &mut self.discharge_primary,
            "discharge_secondary" => &mut self.discharge_secondary,
            "discharge_diffuse" => &mut self.discharge_diffuse,
            "wastewater_concentration" => &mut self.wastewater_concentration,
            "growth_rate" => &mut self.growth_rate,
            "mortality_rate" => &mut self.mortality_rate,
            "nutrient_half_saturation" => &mut self.nutrient_half_saturation,
            "nutrient_uptake_coefficient" => &mut self.nutrient_uptake_coefficient,
            "biomass_capacity" => &mut self.biomass_capacity,
            "reaeration_rate" => &mut self.reaeration_rate,
            "oxygen_saturation" => &mut self.oxygen_saturation,
            "oxygen_respiration_coefficient" => &mut self.oxygen_respiration_coefficient,
            "oxygen_decomposition_coefficient" => &mut self.oxygen_decomposition_coefficient,
            "nutrient_sedimentation_rate" => &mut self.nutrient_sedimentation_rate,
            "simulation_horizon" => &mut self.simulation_horizon,
            "output_step" => &mut self.output_step,
            _ => return Err(LimnosError::UnknownParameter(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}
