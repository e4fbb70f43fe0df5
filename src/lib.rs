//! Batch execution and reporting for the limnos lake dynamics model.
//!
//! The core engine lives in `limnos-core`, the preset policy scenarios in
//! `limnos-scenarios`; this crate runs scenarios in batch, builds the
//! comparison table and exports result files. The most used types are
//! re-exported at the root.

pub mod export;
pub mod runner;

pub use limnos_core::errors::{LimnosError, LimnosResult};
pub use limnos_core::metrics::ScenarioMetrics;
pub use limnos_core::model::LakeModel;
pub use limnos_core::parameters::LakeParameters;
pub use limnos_core::scenario::Scenario;
pub use limnos_core::timeseries::SimulationResult;
pub use limnos_scenarios as scenarios;
