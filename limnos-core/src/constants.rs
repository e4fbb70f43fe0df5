//! Fixed model constants.
//!
//! These are structural constants of the rate equations rather than
//! calibration parameters: changing one changes the model, not the lake.

use crate::timeseries::FloatValue;

/// Lower bound applied to the volume state before every derivative
/// evaluation. Keeps the concentration terms away from division by zero.
/// unit: m^3
pub const VOLUME_FLOOR: FloatValue = 1e9;

/// Biomass at or below this threshold is treated as "no mat present":
/// nutrient uptake is zero and the initial state is floored here.
/// unit: t
pub const BIOMASS_EPSILON: FloatValue = 1e-6;

/// Occupancy fraction (biomass / carrying capacity) above which the mat is
/// treated as fully covering the surface.
pub const SATURATION_THRESHOLD: FloatValue = 0.95;

/// Occupancy fraction at which the uptake-efficiency tent function peaks.
pub const TENT_PEAK_OCCUPANCY: FloatValue = 0.5;

/// Nutrient uptake is capped at this fraction of the current concentration
/// per year.
pub const UPTAKE_CAP_FRACTION: FloatValue = 0.1;

/// Conversion from an annual phosphorus mass load (t/yr) to a concentration
/// load (mg/L per yr) once divided by the lake volume in m^3.
pub const MG_PER_TONNE: FloatValue = 1e9;

/// Maximum fraction of atmospheric reaeration blocked by a fully saturated
/// surface mat.
pub const REAERATION_BLOCKAGE_MAX: FloatValue = 0.9;

/// Oxygen produced by photosynthesis per tonne of biomass at full
/// photosynthetic efficiency.
/// unit: (mg/L) / (t yr)
pub const PHOTOSYNTHESIS_RATE: FloatValue = 0.004;

/// Multiplier on the respiration coefficient once the mat saturates the
/// surface and decomposing biomass dominates the oxygen balance.
pub const SATURATED_RESPIRATION_FACTOR: FloatValue = 5.0;
