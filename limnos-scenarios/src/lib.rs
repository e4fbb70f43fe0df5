//! Preset pollution-management scenarios.
//!
//! The standard policy ladder evaluated against the lake model: no
//! intervention, three wastewater-treatment levels, treatment combined with
//! mechanical harvesting, and a maximum-intervention case. Every function
//! returns a freshly built owned value, so callers can modify their copy
//! freely; there is no shared scenario table to mutate.

use limnos_core::errors::{LimnosError, LimnosResult};
use limnos_core::scenario::Scenario;
use limnos_core::timeseries::FloatValue;

/// Continuation of the current situation, no intervention.
pub fn baseline() -> Scenario {
    Scenario::new(
        "base",
        "Continuation of the current situation without intervention",
    )
}

/// Wastewater treatment plants at 50% efficiency for both urban sources.
pub fn treatment_50() -> Scenario {
    Scenario::new("treatment_50", "Treatment plants at 50% efficiency").with_treatment(0.50, 0.50)
}

/// Wastewater treatment plants at 80% efficiency for both urban sources.
pub fn treatment_80() -> Scenario {
    Scenario::new("treatment_80", "Treatment plants at 80% efficiency").with_treatment(0.80, 0.80)
}

/// Wastewater treatment plants at 95% efficiency, the practical optimum.
pub fn treatment_95() -> Scenario {
    Scenario::new("treatment_95", "Treatment plants at 95% efficiency").with_treatment(0.95, 0.95)
}

/// 95% treatment combined with mechanical harvesting of the mat.
pub fn combined() -> Scenario {
    Scenario::new(
        "combined",
        "95% treatment plus mechanical harvesting of 500 t/yr",
    )
    .with_treatment(0.95, 0.95)
    .with_mechanical_removal(500.0)
}

/// Maximum intervention: 95% treatment, aggressive harvesting and a
/// reduced diffuse discharge.
pub fn optimistic() -> Scenario {
    Scenario::new(
        "optimistic",
        "Maximum intervention: 95% treatment, aggressive harvesting, reduced diffuse discharge",
    )
    .with_treatment(0.95, 0.95)
    .with_mechanical_removal(1000.0)
    .with_override("discharge_diffuse", 5.0)
}

/// All presets, in comparison order.
pub fn all() -> Vec<Scenario> {
    vec![
        baseline(),
        treatment_50(),
        treatment_80(),
        treatment_95(),
        combined(),
        optimistic(),
    ]
}

/// Names of all presets, in comparison order.
pub fn names() -> Vec<String> {
    all().into_iter().map(|scenario| scenario.name).collect()
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> LimnosResult<Scenario> {
    all()
        .into_iter()
        .find(|scenario| scenario.name == name)
        .ok_or_else(|| LimnosError::UnknownScenario {
            name: name.to_string(),
            available: names().join(", "),
        })
}

/// Build a validated custom scenario from the three headline interventions.
///
/// Seeding and parameter overrides can be chained onto the returned value
/// with the [`Scenario`] builder methods.
pub fn custom(
    name: impl Into<String>,
    treatment_primary: FloatValue,
    treatment_secondary: FloatValue,
    mechanical_removal: FloatValue,
) -> LimnosResult<Scenario> {
    let description = format!(
        "Custom scenario: primary {:.0}%, secondary {:.0}%, removal {} t/yr",
        treatment_primary * 100.0,
        treatment_secondary * 100.0,
        mechanical_removal
    );
    let scenario = Scenario::new(name, description)
        .with_treatment(treatment_primary, treatment_secondary)
        .with_mechanical_removal(mechanical_removal);

    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for scenario in all() {
            scenario
                .validate()
                .unwrap_or_else(|e| panic!("preset {} invalid: {}", scenario.name, e));
        }
    }

    #[test]
    fn presets_are_in_comparison_order() {
        assert_eq!(
            names(),
            vec![
                "base",
                "treatment_50",
                "treatment_80",
                "treatment_95",
                "combined",
                "optimistic"
            ]
        );
    }

    #[test]
    fn by_name_finds_a_preset() {
        let scenario = by_name("combined").unwrap();
        assert_eq!(scenario.mechanical_removal, 500.0);
        assert_eq!(scenario.treatment_efficiency_primary, 0.95);
    }

    #[test]
    fn by_name_reports_the_available_presets() {
        let err = by_name("utopia").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("utopia"));
        assert!(message.contains("treatment_95"));
    }

    #[test]
    fn optimistic_overrides_the_diffuse_discharge() {
        let scenario = optimistic();
        assert_eq!(scenario.overrides["discharge_diffuse"], 5.0);
    }

    #[test]
    fn custom_scenarios_are_validated() {
        assert!(custom("ok", 0.65, 0.70, 250.0).is_ok());
        assert!(custom("bad-efficiency", 1.5, 0.0, 0.0).is_err());
        assert!(custom("bad-removal", 0.5, 0.5, -10.0).is_err());
    }
}
