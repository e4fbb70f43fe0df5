//! Invariant tests for the lake dynamics model.
//!
//! These cover the contracts the session layer and downstream consumers
//! rely on: state bounds during integration, the zero-biomass and
//! saturation policies of the rate equations, exactness of the state
//! mutation operations, and the end-to-end scenario behaviour.

use approx::assert_relative_eq;
use limnos_core::constants::{BIOMASS_EPSILON, SATURATION_THRESHOLD, VOLUME_FLOOR};
use limnos_core::dynamics::{
    InterventionPolicy, LakeDynamics, StateVector, BIOMASS, NUTRIENTS, OXYGEN, VOLUME,
};
use limnos_core::model::LakeModel;
use limnos_core::parameters::LakeParameters;
use limnos_core::scenario::Scenario;

fn base_scenario() -> Scenario {
    Scenario::new("base", "no intervention")
}

fn base_dynamics(parameters: &LakeParameters) -> LakeDynamics {
    LakeDynamics::new(
        parameters.clone(),
        InterventionPolicy::from_scenario(&base_scenario()),
    )
}

mod state_bounds {
    use super::*;

    /// All four components stay non-negative along the whole trajectory,
    /// with the volume never dropping below its strictly positive floor.
    #[test]
    fn trajectory_stays_non_negative() {
        let mut model = LakeModel::new(LakeParameters::default(), base_scenario()).unwrap();
        let result = model.simulate().unwrap();

        for index in 0..result.len() {
            let state = result.sample(index).unwrap();
            assert!(state[VOLUME] >= VOLUME_FLOOR, "volume at sample {}", index);
            assert!(state[NUTRIENTS] >= 0.0, "nutrients at sample {}", index);
            assert!(state[BIOMASS] >= 0.0, "biomass at sample {}", index);
            assert!(state[OXYGEN] >= 0.0, "oxygen at sample {}", index);
        }
    }

    #[test]
    fn heavy_harvesting_cannot_push_biomass_negative() {
        let scenario = Scenario::new("scorched", "absurd harvesting rate")
            .with_treatment(0.95, 0.95)
            .with_mechanical_removal(1e5);
        let mut model = LakeModel::new(LakeParameters::default(), scenario).unwrap();
        let result = model.simulate().unwrap();

        for index in 0..result.len() {
            assert!(result.biomass[index] >= 0.0, "sample {}", index);
        }
    }
}

mod zero_biomass {
    use super::*;

    /// With no biomass present there is no nutrient uptake anywhere on the
    /// trajectory: the nutrient balance reduces to load, sedimentation and
    /// dilution.
    #[test]
    fn uptake_is_identically_zero() {
        let parameters = LakeParameters {
            initial_biomass: 0.0,
            ..Default::default()
        };
        let mut model = LakeModel::new(parameters.clone(), base_scenario()).unwrap();
        let result = model.simulate().unwrap().clone();

        let dynamics = base_dynamics(&parameters);
        for index in 0..result.len() {
            let state = result.sample(index).unwrap();
            assert!(state[BIOMASS] <= BIOMASS_EPSILON * 2.0, "sample {}", index);
            assert_eq!(
                dynamics.nutrient_uptake(state[NUTRIENTS], state[BIOMASS]),
                0.0,
                "uptake at sample {}",
                index
            );
        }
    }

    /// The zero-biomass nutrient trajectory matches the closed balance of
    /// the remaining terms at every sampled state.
    #[test]
    fn nutrient_rate_reduces_to_load_sedimentation_dilution() {
        let parameters = LakeParameters {
            initial_biomass: 0.0,
            ..Default::default()
        };
        let dynamics = base_dynamics(&parameters);

        let state = StateVector::new(8.9e11, 0.05, 0.0, 8.0);
        let derivative = dynamics.derivatives(0.0, &state)[NUTRIENTS];

        let dv_dt = dynamics.water_inflow() - dynamics.water_outflow();
        let expected = dynamics.effective_discharge() * 1e9 / state[VOLUME]
            - parameters.nutrient_sedimentation_rate * state[NUTRIENTS]
            - state[NUTRIENTS] * dv_dt / state[VOLUME];
        assert_relative_eq!(derivative, expected, max_relative = 1e-12);
    }
}

mod saturation {
    use super::*;

    #[test]
    fn saturated_mat_absorbs_nothing() {
        let parameters = LakeParameters::default();
        let dynamics = base_dynamics(&parameters);
        let capacity = parameters.biomass_capacity;

        for occupancy in [SATURATION_THRESHOLD, 0.97, 1.0, 1.5] {
            assert_eq!(
                dynamics.nutrient_uptake(0.5, occupancy * capacity),
                0.0,
                "occupancy {}",
                occupancy
            );
        }
    }

    /// At or past the saturation threshold the oxygen derivative is
    /// strictly below its value just under the threshold, for the same
    /// oxygen and nutrient state.
    #[test]
    fn oxygen_derivative_drops_across_the_threshold() {
        let parameters = LakeParameters::default();
        let dynamics = base_dynamics(&parameters);
        let capacity = parameters.biomass_capacity;

        for (oxygen, nutrients) in [(2.0, 0.01), (6.0, 0.03), (8.5, 0.5)] {
            let below = dynamics.oxygen_balance(oxygen, 0.94 * capacity, nutrients);
            for occupancy in [SATURATION_THRESHOLD, 0.97, 1.0] {
                let at_or_above = dynamics.oxygen_balance(oxygen, occupancy * capacity, nutrients);
                assert!(
                    at_or_above < below,
                    "O2={} N={} occupancy={}: {} should be below {}",
                    oxygen,
                    nutrients,
                    occupancy,
                    at_or_above,
                    below
                );
            }
        }
    }
}

mod state_control {
    use super::*;

    /// Removing the mat leaves the nutrient concentration bit-identical and
    /// restores the recorded initial oxygen exactly.
    #[test]
    fn remove_all_biomass_is_exact() {
        let mut model = LakeModel::new(LakeParameters::default(), base_scenario()).unwrap();
        model.simulate().unwrap();

        let nutrients_before = model.current_state()[NUTRIENTS];
        let volume_before = model.current_state()[VOLUME];
        model.remove_all_biomass();

        assert!(model.current_state()[NUTRIENTS].to_bits() == nutrients_before.to_bits());
        assert!(model.current_state()[VOLUME].to_bits() == volume_before.to_bits());
        assert_eq!(model.current_state()[OXYGEN], model.initial_state()[OXYGEN]);
        assert_eq!(model.current_biomass(), BIOMASS_EPSILON);
    }

    /// reset() followed by a zero-horizon run reproduces the originally
    /// constructed initial state exactly.
    #[test]
    fn reset_then_zero_horizon_run_is_exact() {
        let parameters = LakeParameters {
            simulation_horizon: 0.0,
            ..Default::default()
        };
        let mut model = LakeModel::new(parameters, base_scenario()).unwrap();

        model.add_biomass(250.0).unwrap();
        model.reset();
        let result = model.simulate().unwrap();

        assert_eq!(result.len(), 1);
        assert!(result.success);
        assert_eq!(result.first_sample().unwrap(), *model.initial_state());
    }

    /// A variable that starts at exactly zero yields a zero percentage,
    /// never NaN.
    #[test]
    fn zero_initial_oxygen_metric_is_zero() {
        let parameters = LakeParameters {
            initial_oxygen: 0.0,
            simulation_horizon: 0.0,
            ..Default::default()
        };
        let mut model = LakeModel::new(parameters, base_scenario()).unwrap();
        model.simulate().unwrap();

        let metrics = model.metrics().unwrap();
        assert_eq!(metrics.oxygen_improvement_pct, 0.0);
        assert!(metrics.oxygen_improvement_pct.is_finite());
    }
}

mod end_to_end {
    use super::*;

    /// Default parameters, base scenario: 20 years at 0.1-year steps gives
    /// exactly 201 samples, starting from the initial state.
    #[test]
    fn base_case_trajectory_shape() {
        let mut model = LakeModel::new(LakeParameters::default(), base_scenario()).unwrap();
        let initial = *model.initial_state();
        let result = model.simulate().unwrap();

        assert_eq!(result.len(), 201);
        assert!(result.success);
        assert_eq!(result.first_sample().unwrap(), initial);
        assert_eq!(result.time[0], 0.0);
        assert_eq!(result.time[200], 20.0);
    }

    /// Treating both urban discharges at 95% ends with strictly less
    /// dissolved phosphorus than doing nothing.
    #[test]
    fn treatment_lowers_the_final_nutrient_concentration() {
        let mut base = LakeModel::new(LakeParameters::default(), base_scenario()).unwrap();
        base.simulate().unwrap();
        let base_final = base.metrics().unwrap().final_nutrients;

        let treated_scenario =
            Scenario::new("treatment_95", "95% treatment").with_treatment(0.95, 0.95);
        let mut treated = LakeModel::new(LakeParameters::default(), treated_scenario).unwrap();
        treated.simulate().unwrap();
        let treated_final = treated.metrics().unwrap().final_nutrients;

        assert!(
            treated_final < base_final,
            "treated {} should be below base {}",
            treated_final,
            base_final
        );
    }

    /// Biomass addition on a fresh model is exact; invalid amounts leave
    /// the state untouched.
    #[test]
    fn biomass_addition_is_exact_or_rejected() {
        let mut model = LakeModel::new(LakeParameters::default(), base_scenario()).unwrap();
        let before = model.current_biomass();

        model.add_biomass(500.0).unwrap();
        assert_eq!(model.current_biomass(), before + 500.0);

        assert!(model.add_biomass(-10.0).is_err());
        assert!(model.add_biomass(f64::NAN).is_err());
        assert_eq!(model.current_biomass(), before + 500.0);
    }
}
