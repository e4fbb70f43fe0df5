//! Coupled rate equations of the lake system.
//!
//! A single well-mixed compartment with four state variables:
//!
//! 1. Water volume $V$ (m^3) — a constant-coefficient balance of
//!    precipitation and river inflow against evaporation and extraction.
//! 2. Nutrient concentration $N$ (mg/L) — treated urban discharge plus
//!    diffuse load, minus macrophyte uptake and sedimentation, corrected
//!    for dilution when the volume changes:
//!    $$ \frac{dN}{dt} = \frac{L \cdot 10^9}{V} - U(N, B)
//!       - k_{sed} N - N \frac{dV/dt}{V} $$
//! 3. Macrophyte biomass $B$ (t) — logistic growth with Monod nutrient
//!    limitation, natural mortality, mechanical harvesting and seeding:
//!    $$ \frac{dB}{dt} = B \left( r \frac{N}{N + N_h}
//!       \max(0, 1 - B/K) - m \right) - h + s $$
//! 4. Dissolved oxygen $O$ (mg/L) — atmospheric reaeration against
//!    respiration and decomposition, with a regime switch at 95% surface
//!    occupancy: a sparse mat is a net producer of oxygen, a saturated mat
//!    blocks gas exchange and decays.
//!
//! The evaluator is a pure function of the state and the fixed
//! parameter/intervention bundle; it keeps no memory between calls. The
//! stateful session logic lives in [`crate::model`].

use ode_solvers::{System, Vector4};
use serde::{Deserialize, Serialize};

use crate::constants::{
    BIOMASS_EPSILON, MG_PER_TONNE, PHOTOSYNTHESIS_RATE, REAERATION_BLOCKAGE_MAX,
    SATURATED_RESPIRATION_FACTOR, SATURATION_THRESHOLD, TENT_PEAK_OCCUPANCY, UPTAKE_CAP_FRACTION,
    VOLUME_FLOOR,
};
use crate::parameters::LakeParameters;
use crate::scenario::Scenario;
use crate::timeseries::{FloatValue, Time};

/// State vector ordered as (volume, nutrients, biomass, oxygen)
pub type StateVector = Vector4<FloatValue>;

pub const VOLUME: usize = 0;
pub const NUTRIENTS: usize = 1;
pub const BIOMASS: usize = 2;
pub const OXYGEN: usize = 3;

/// The numeric interventions of a scenario, resolved once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterventionPolicy {
    /// Fraction of the primary urban discharge removed by treatment
    pub treatment_efficiency_primary: FloatValue,
    /// Fraction of the secondary urban discharge removed by treatment
    pub treatment_efficiency_secondary: FloatValue,
    /// Mechanical harvesting rate
    /// unit: t/yr
    pub mechanical_removal: FloatValue,
    /// Biomass seeding rate
    /// unit: t/yr
    pub biomass_seeding: FloatValue,
}

impl InterventionPolicy {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            treatment_efficiency_primary: scenario.treatment_efficiency_primary,
            treatment_efficiency_secondary: scenario.treatment_efficiency_secondary,
            mechanical_removal: scenario.mechanical_removal,
            biomass_seeding: scenario.biomass_seeding,
        }
    }
}

/// Uptake-efficiency tent over the occupancy fraction.
///
/// Rises linearly from 0 at an empty surface to 1 at half capacity, then
/// falls linearly back to 0 at the saturation threshold: a mat of moderate
/// density exposes the most nutrient-contact area, a saturated mat exposes
/// none.
pub fn uptake_efficiency(occupancy: FloatValue) -> FloatValue {
    if occupancy <= 0.0 || occupancy >= SATURATION_THRESHOLD {
        0.0
    } else if occupancy < TENT_PEAK_OCCUPANCY {
        occupancy / TENT_PEAK_OCCUPANCY
    } else {
        (SATURATION_THRESHOLD - occupancy) / (SATURATION_THRESHOLD - TENT_PEAK_OCCUPANCY)
    }
}

/// The coupled rate equations for one parameter/intervention bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeDynamics {
    parameters: LakeParameters,
    policy: InterventionPolicy,
}

impl LakeDynamics {
    pub fn new(parameters: LakeParameters, policy: InterventionPolicy) -> Self {
        Self { parameters, policy }
    }

    pub fn parameters(&self) -> &LakeParameters {
        &self.parameters
    }

    pub fn policy(&self) -> &InterventionPolicy {
        &self.policy
    }

    /// Water entering the lake: precipitation over the surface plus rivers.
    /// unit: m^3/yr
    pub fn water_inflow(&self) -> FloatValue {
        self.parameters.lake_area * self.parameters.annual_precipitation
            + self.parameters.river_inflow
    }

    /// Water leaving the lake: evaporation from the surface plus extraction.
    /// unit: m^3/yr
    pub fn water_outflow(&self) -> FloatValue {
        self.parameters.lake_area * self.parameters.annual_evaporation
            + self.parameters.human_extraction
    }

    /// Effective annual phosphorus load after wastewater treatment.
    ///
    /// Each urban source is reduced by its scenario treatment efficiency;
    /// the diffuse term is never treatment-reduced. Floored at zero.
    /// unit: t/yr
    pub fn effective_discharge(&self) -> FloatValue {
        let primary =
            self.parameters.discharge_primary * (1.0 - self.policy.treatment_efficiency_primary);
        let secondary = self.parameters.discharge_secondary
            * (1.0 - self.policy.treatment_efficiency_secondary);

        (primary + secondary + self.parameters.discharge_diffuse).max(0.0)
    }

    /// Fraction of the carrying capacity occupied by the current biomass.
    /// Can exceed 1 when the mat is overgrown past capacity.
    pub fn occupancy(&self, biomass: FloatValue) -> FloatValue {
        biomass / self.parameters.biomass_capacity
    }

    /// Nutrient concentration drawn down by the macrophyte mat.
    ///
    /// Zero with no biomass present and zero once the mat saturates the
    /// surface; in between, Monod-limited in the nutrient concentration and
    /// scaled by the occupancy tent. Capped at 10% of the current
    /// concentration per year as a stability safeguard.
    /// unit: (mg/L) / yr
    pub fn nutrient_uptake(&self, nutrients: FloatValue, biomass: FloatValue) -> FloatValue {
        if biomass <= BIOMASS_EPSILON || nutrients <= 0.0 {
            return 0.0;
        }
        let occupancy = self.occupancy(biomass);
        if occupancy >= SATURATION_THRESHOLD {
            return 0.0;
        }

        let monod = nutrients / (nutrients + self.parameters.nutrient_half_saturation);
        let uptake = self.parameters.nutrient_uptake_coefficient
            * biomass
            * monod
            * uptake_efficiency(occupancy);

        uptake.min(UPTAKE_CAP_FRACTION * nutrients)
    }

    /// Net biomass rate: logistic Monod-limited growth minus mortality,
    /// minus mechanical harvesting, plus seeding. Floored at `-biomass` so
    /// harvesting cannot remove more than exists.
    /// unit: t/yr
    pub fn biomass_growth(&self, nutrients: FloatValue, biomass: FloatValue) -> FloatValue {
        let monod = nutrients / (nutrients + self.parameters.nutrient_half_saturation);
        let capacity_factor = (1.0 - biomass / self.parameters.biomass_capacity).max(0.0);

        let net = biomass
            * (self.parameters.growth_rate * monod * capacity_factor
                - self.parameters.mortality_rate);

        (net - self.policy.mechanical_removal + self.policy.biomass_seeding).max(-biomass)
    }

    /// Net dissolved-oxygen rate.
    ///
    /// Below the saturation threshold the mat is a net producer:
    /// photosynthesis scales with biomass and with how close the mat is to
    /// saturation, respiration uses the baseline coefficient. At or above
    /// the threshold the mat degrades oxygen: reaeration is attenuated by
    /// up to 90% as coverage approaches the full surface, photosynthesis
    /// stops from self-shading, and respiration switches to the saturated
    /// coefficient.
    /// unit: (mg/L) / yr
    pub fn oxygen_balance(
        &self,
        oxygen: FloatValue,
        biomass: FloatValue,
        nutrients: FloatValue,
    ) -> FloatValue {
        let reaeration =
            self.parameters.reaeration_rate * (self.parameters.oxygen_saturation - oxygen);
        let decomposition = self.parameters.oxygen_decomposition_coefficient * nutrients;
        let occupancy = self.occupancy(biomass);

        if occupancy < SATURATION_THRESHOLD {
            let photosynthesis =
                PHOTOSYNTHESIS_RATE * biomass * (occupancy / SATURATION_THRESHOLD);
            let respiration = self.parameters.oxygen_respiration_coefficient * biomass;
            reaeration + photosynthesis - respiration - decomposition
        } else {
            let coverage =
                ((occupancy - SATURATION_THRESHOLD) / (1.0 - SATURATION_THRESHOLD)).min(1.0);
            let respiration = SATURATED_RESPIRATION_FACTOR
                * self.parameters.oxygen_respiration_coefficient
                * biomass;
            reaeration * (1.0 - REAERATION_BLOCKAGE_MAX * coverage) - respiration - decomposition
        }
    }

    /// Evaluate all four derivatives at once.
    pub fn derivatives(&self, t: Time, state: &StateVector) -> StateVector {
        let mut dy_dt = StateVector::zeros();
        self.system(t, state, &mut dy_dt);
        dy_dt
    }
}

impl System<Time, StateVector> for LakeDynamics {
    fn system(&self, _t: Time, y: &StateVector, dy_dt: &mut StateVector) {
        // Clamp to the non-negative floor before evaluating; the volume
        // floor is strictly positive so the concentration terms stay finite.
        let volume = y[VOLUME].max(VOLUME_FLOOR);
        let nutrients = y[NUTRIENTS].max(0.0);
        let biomass = y[BIOMASS].max(0.0);
        let oxygen = y[OXYGEN].max(0.0);

        let dv_dt = self.water_inflow() - self.water_outflow();

        let load = self.effective_discharge() * MG_PER_TONNE / volume;
        let uptake = self.nutrient_uptake(nutrients, biomass);
        let sedimentation = self.parameters.nutrient_sedimentation_rate * nutrients;
        let dilution = -nutrients * (dv_dt / volume);
        let dn_dt = load - uptake - sedimentation + dilution;

        dy_dt[VOLUME] = dv_dt;
        dy_dt[NUTRIENTS] = dn_dt;
        dy_dt[BIOMASS] = self.biomass_growth(nutrients, biomass);
        dy_dt[OXYGEN] = self.oxygen_balance(oxygen, biomass, nutrients);
    }
}
