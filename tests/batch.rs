//! End-to-end batch comparison over the full preset ladder.

use approx::assert_relative_eq;
use limnos::runner::{RankingCriterion, ScenarioRunner};
use limnos::LakeParameters;

#[test]
fn full_preset_batch_with_default_horizon() {
    let mut runner = ScenarioRunner::new(LakeParameters::default()).unwrap();
    let failures = runner.run_all();
    assert!(failures.is_empty(), "unexpected failures: {:?}", failures);

    // Every preset shares the default 20-year, 0.1-year-step grid
    for outcome in runner.outcomes() {
        assert_eq!(
            outcome.result.len(),
            201,
            "scenario {}",
            outcome.scenario.name
        );
        assert!(outcome.result.success);
        assert_relative_eq!(outcome.metrics.initial_nutrients, 0.028);
    }

    let metric = |name: &str| {
        runner
            .outcomes()
            .iter()
            .find(|outcome| outcome.scenario.name == name)
            .map(|outcome| outcome.metrics.final_nutrients)
            .unwrap()
    };

    // The treatment ladder is monotone in the final nutrient concentration
    assert!(metric("treatment_95") < metric("treatment_80"));
    assert!(metric("treatment_80") < metric("treatment_50"));
    assert!(metric("treatment_50") < metric("base"));

    // The best nutrient outcome uses 95% treatment in some form
    let best = runner
        .best_by(RankingCriterion::NutrientReduction)
        .unwrap()
        .scenario
        .name
        .clone();
    assert!(
        ["treatment_95", "combined", "optimistic"].contains(&best.as_str()),
        "unexpected best scenario {}",
        best
    );
}
