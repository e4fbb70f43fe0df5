//! File export of batch results.
//!
//! Writes the row-per-scenario comparison table, one time-series table per
//! state variable (a time column plus one column per scenario), and a JSON
//! metrics summary into an output directory. The core performs no I/O;
//! everything written here is read back out of stored outcomes.

use std::fs;
use std::io;
use std::path::Path;

use limnos_core::timeseries::{FloatValue, SimulationResult};
use ndarray::Array1;

use crate::runner::ScenarioRunner;

const SERIES_VARIABLES: &[&str] = &["volume", "nutrients", "biomass", "oxygen"];

/// Write every export file for the runner's stored outcomes.
pub fn write_outputs(runner: &ScenarioRunner, directory: &Path) -> io::Result<()> {
    fs::create_dir_all(directory)?;

    write_comparison(runner, &directory.join("comparison.csv"))?;
    for variable in SERIES_VARIABLES {
        write_series(
            runner,
            variable,
            &directory.join(format!("series_{}.csv", variable)),
        )?;
    }
    write_metrics(runner, &directory.join("metrics.json"))?;
    Ok(())
}

fn write_comparison(runner: &ScenarioRunner, path: &Path) -> io::Result<()> {
    let mut lines = vec![
        "scenario,treatment_efficiency_primary_pct,treatment_efficiency_secondary_pct,\
         mechanical_removal,final_nutrients,nutrient_reduction_pct,final_biomass,\
         biomass_reduction_pct,final_oxygen,oxygen_improvement_pct"
            .to_string(),
    ];
    for row in runner.comparison_rows() {
        lines.push(format!(
            "{},{},{},{},{},{},{},{},{},{}",
            row.scenario,
            row.treatment_efficiency_primary_pct,
            row.treatment_efficiency_secondary_pct,
            row.mechanical_removal,
            row.final_nutrients,
            row.nutrient_reduction_pct,
            row.final_biomass,
            row.biomass_reduction_pct,
            row.final_oxygen,
            row.oxygen_improvement_pct
        ));
    }
    fs::write(path, lines.join("\n") + "\n")
}

fn series_array<'a>(result: &'a SimulationResult, variable: &str) -> &'a Array1<FloatValue> {
    match variable {
        "volume" => &result.volume,
        "nutrients" => &result.nutrients,
        "biomass" => &result.biomass,
        "oxygen" => &result.oxygen,
        other => unreachable!("unknown series variable {}", other),
    }
}

fn write_series(runner: &ScenarioRunner, variable: &str, path: &Path) -> io::Result<()> {
    let outcomes = runner.outcomes();
    let Some(first) = outcomes.first() else {
        return fs::write(path, "time\n");
    };

    let mut header = vec!["time".to_string()];
    header.extend(outcomes.iter().map(|o| o.scenario.name.clone()));
    let mut lines = vec![header.join(",")];

    // Scenarios share the base time grid; one whose overrides change the
    // horizon simply runs out of samples and leaves its cells empty.
    for (index, time) in first.result.time.iter().enumerate() {
        let mut cells = vec![time.to_string()];
        for outcome in outcomes {
            let series = series_array(&outcome.result, variable);
            cells.push(
                series
                    .get(index)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        lines.push(cells.join(","));
    }
    fs::write(path, lines.join("\n") + "\n")
}

fn write_metrics(runner: &ScenarioRunner, path: &Path) -> io::Result<()> {
    let metrics: Vec<_> = runner
        .outcomes()
        .iter()
        .map(|outcome| &outcome.metrics)
        .collect();

    let json = serde_json::to_string_pretty(&metrics)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
    fs::write(path, json + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use limnos_core::parameters::LakeParameters;
    use std::env;

    fn run_two_scenarios() -> ScenarioRunner {
        let params = LakeParameters {
            simulation_horizon: 1.0,
            output_step: 0.5,
            ..Default::default()
        };
        let mut runner = ScenarioRunner::new(params).unwrap();
        runner.run_preset("base").unwrap();
        runner.run_preset("treatment_95").unwrap();
        runner
    }

    #[test]
    fn exports_all_files() {
        let runner = run_two_scenarios();
        let directory = env::temp_dir().join("limnos-export-test");

        write_outputs(&runner, &directory).unwrap();

        for file in [
            "comparison.csv",
            "series_volume.csv",
            "series_nutrients.csv",
            "series_biomass.csv",
            "series_oxygen.csv",
            "metrics.json",
        ] {
            assert!(directory.join(file).exists(), "missing {}", file);
        }

        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn comparison_table_has_one_row_per_scenario() {
        let runner = run_two_scenarios();
        let directory = env::temp_dir().join("limnos-comparison-test");

        write_outputs(&runner, &directory).unwrap();
        let table = fs::read_to_string(directory.join("comparison.csv")).unwrap();
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("scenario,"));
        assert!(lines[1].starts_with("base,"));
        assert!(lines[2].starts_with("treatment_95,"));

        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn series_tables_have_one_column_per_scenario() {
        let runner = run_two_scenarios();
        let directory = env::temp_dir().join("limnos-series-test");

        write_outputs(&runner, &directory).unwrap();
        let series = fs::read_to_string(directory.join("series_nutrients.csv")).unwrap();
        let lines: Vec<_> = series.lines().collect();

        assert_eq!(lines[0], "time,base,treatment_95");
        // 1.0 yr at 0.5 yr steps: three samples plus the header
        assert_eq!(lines.len(), 4);

        fs::remove_dir_all(&directory).unwrap();
    }
}
