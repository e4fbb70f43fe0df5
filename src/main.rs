//! Lake scenario comparison CLI.
//!
//! Runs the preset pollution-management scenarios (or a single named or
//! file-defined scenario) against the lake dynamics model, prints the
//! comparison table and writes the result files.
//!
//! # Usage
//!
//! ```bash
//! limnos                          # run every preset, export to results/
//! limnos --scenario treatment_95  # run one preset
//! limnos --horizon 50 --output out/
//! limnos --list
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use limnos::runner::{RankingCriterion, ScenarioRunner};
use limnos::{export, scenarios, LakeParameters, Scenario};

/// Lake pollution-management scenario runner
#[derive(Parser, Debug)]
#[command(name = "limnos")]
#[command(about = "Simulate lake pollution-management scenarios and compare their impact")]
struct Args {
    /// Run a single preset scenario by name
    #[arg(short, long)]
    scenario: Option<String>,

    /// Run a scenario defined in a TOML file instead of a preset
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Override the simulated horizon in years
    #[arg(long)]
    horizon: Option<f64>,

    /// Override the output step in years
    #[arg(long)]
    step: Option<f64>,

    /// Directory for the exported result files
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// List the available preset scenarios and exit
    #[arg(long)]
    list: bool,

    /// Skip writing result files
    #[arg(long)]
    no_export: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for scenario in scenarios::all() {
            println!("{:<14} {}", scenario.name, scenario.description);
        }
        return;
    }

    let mut parameters = LakeParameters::default();
    if let Some(horizon) = args.horizon {
        parameters.simulation_horizon = horizon;
    }
    if let Some(step) = args.step {
        parameters.output_step = step;
    }

    let mut runner = match ScenarioRunner::new(parameters) {
        Ok(runner) => runner,
        Err(error) => {
            eprintln!("Invalid parameters: {}", error);
            process::exit(1);
        }
    };

    if let Some(path) = &args.scenario_file {
        let scenario = match load_scenario_file(path) {
            Ok(scenario) => scenario,
            Err(message) => {
                eprintln!("{}", message);
                process::exit(1);
            }
        };
        if let Err(error) = runner.run_scenario(scenario) {
            eprintln!("Scenario failed: {}", error);
            process::exit(1);
        }
    } else if let Some(name) = &args.scenario {
        if let Err(error) = runner.run_preset(name) {
            eprintln!("Scenario failed: {}", error);
            process::exit(1);
        }
    } else {
        let failures = runner.run_all();
        for (name, error) in &failures {
            eprintln!("Scenario `{}` failed: {}", name, error);
        }
        if runner.outcomes().is_empty() {
            eprintln!("Every scenario failed");
            process::exit(1);
        }
    }

    print_comparison(&runner);
    print_best_scenarios(&runner);

    if !args.no_export {
        match export::write_outputs(&runner, &args.output) {
            Ok(()) => println!("\nResults written to {}", args.output.display()),
            Err(error) => {
                eprintln!("Failed to write results: {}", error);
                process::exit(1);
            }
        }
    }
}

fn load_scenario_file(path: &Path) -> Result<Scenario, String> {
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("Failed to read {}: {}", path.display(), error))?;
    toml::from_str(&contents)
        .map_err(|error| format!("Failed to parse {}: {}", path.display(), error))
}

fn print_comparison(runner: &ScenarioRunner) {
    println!(
        "{:<14} {:>7} {:>7} {:>9} {:>12} {:>9} {:>11} {:>9} {:>10} {:>9}",
        "scenario",
        "eff A %",
        "eff B %",
        "removal",
        "N (mg/L)",
        "dN %",
        "B (t)",
        "dB %",
        "O2 (mg/L)",
        "dO2 %"
    );
    for row in runner.comparison_rows() {
        println!(
            "{:<14} {:>7.0} {:>7.0} {:>9.0} {:>12.4} {:>9.1} {:>11.1} {:>9.1} {:>10.2} {:>9.1}",
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
        );
    }
}

fn print_best_scenarios(runner: &ScenarioRunner) {
    println!();
    for criterion in [
        RankingCriterion::NutrientReduction,
        RankingCriterion::BiomassReduction,
        RankingCriterion::OxygenImprovement,
    ] {
        if let Some(outcome) = runner.best_by(criterion) {
            println!(
                "Best {}: {} ({:+.1}%)",
                criterion.label(),
                outcome.scenario.name,
                criterion.value(&outcome.metrics)
            );
        }
    }
}
