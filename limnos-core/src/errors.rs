use crate::timeseries::{FloatValue, Time};
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum LimnosError {
    #[error("parameter `{name}` out of range: {value} (expected {min} to {max})")]
    ParameterOutOfRange {
        name: &'static str,
        value: FloatValue,
        min: FloatValue,
        max: FloatValue,
    },
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("scenario `{name}` is invalid: {reason}")]
    InvalidScenario { name: String, reason: String },
    #[error("unknown scenario `{name}`. Available scenarios: {available}")]
    UnknownScenario { name: String, available: String },
    #[error("simulation horizon must be non-negative, got {0}")]
    InvalidHorizon(Time),
    #[error("output step must be positive, got {0}")]
    InvalidStep(Time),
    #[error("integration failed over [{t_start}, {t_end}]: {message}")]
    IntegrationFailure {
        t_start: Time,
        t_end: Time,
        message: String,
    },
    #[error("no simulation result available; call simulate() first")]
    ResultNotAvailable,
    #[error("biomass addition must be a finite positive amount, got {0}")]
    InvalidBiomassAddition(FloatValue),
}

/// Convenience type for `Result<T, LimnosError>`.
pub type LimnosResult<T> = Result<T, LimnosError>;
