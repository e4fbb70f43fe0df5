pub mod constants;
pub mod dynamics;
pub mod errors;
pub mod ivp;
pub mod metrics;
pub mod model;
pub mod parameters;
pub mod scenario;
pub mod timeseries;
