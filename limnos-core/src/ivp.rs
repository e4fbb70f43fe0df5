//! Time-integration driver.
//!
//! Advances a state vector across a uniform output grid, integrating each
//! grid segment with an adaptive Dormand-Prince 4(5) stepper and recording
//! the segment endpoint. Solver non-convergence is a hard failure: no
//! partial trajectory ever escapes the driver.

use log::warn;
use ode_solvers::Dopri5;

use crate::dynamics::{LakeDynamics, StateVector};
use crate::errors::{LimnosError, LimnosResult};
use crate::timeseries::{FloatValue, Time};

/// Default relative tolerance of the stepper.
pub const DEFAULT_RTOL: FloatValue = 1e-6;
/// Default absolute tolerance of the stepper, in the problem's natural units.
pub const DEFAULT_ATOL: FloatValue = 1e-9;

/// Guard added before flooring `horizon / step`, so that binary
/// representation noise (20.0 / 0.1 is slightly below 200) cannot drop the
/// final sample from the grid.
const GRID_EPSILON: FloatValue = 1e-9;

/// A trajectory sampled on the output grid.
#[derive(Debug, Clone)]
pub struct GridSolution {
    /// Sample times, `floor(horizon/step) + 1` points starting at 0
    pub time: Vec<Time>,
    /// State at each sample time
    pub states: Vec<StateVector>,
}

/// Adaptive-step integration over a uniform output grid.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationDriver {
    rtol: FloatValue,
    atol: FloatValue,
}

impl Default for IntegrationDriver {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

impl IntegrationDriver {
    pub fn new(rtol: FloatValue, atol: FloatValue) -> Self {
        Self { rtol, atol }
    }

    /// Integrate `dynamics` from the given state over `[0, horizon]`,
    /// sampling every `step` years.
    ///
    /// A zero horizon returns a single-sample trajectory equal to the
    /// initial state without invoking the solver. A horizon shorter than
    /// one step behaves the same way: the grid only contains multiples of
    /// `step` that fit the horizon.
    pub fn integrate(
        &self,
        dynamics: &LakeDynamics,
        initial: StateVector,
        horizon: Time,
        step: Time,
    ) -> LimnosResult<GridSolution> {
        if horizon.is_nan() || horizon < 0.0 {
            return Err(LimnosError::InvalidHorizon(horizon));
        }
        if step.is_nan() || step <= 0.0 {
            return Err(LimnosError::InvalidStep(step));
        }

        let segments = if horizon == 0.0 {
            0
        } else {
            (horizon / step + GRID_EPSILON).floor() as usize
        };

        let mut time: Vec<Time> = (0..=segments).map(|k| k as Time * step).collect();
        if let Some(last) = time.last_mut() {
            // Snap the final grid point onto the horizon when they only
            // differ by accumulated representation error.
            if (*last - horizon).abs() <= step * 1e-6 {
                *last = horizon;
            } else {
                warn!(
                    "horizon {} is not a multiple of step {}; trajectory ends at {}",
                    horizon, step, last
                );
            }
        }

        let mut states = Vec::with_capacity(segments + 1);
        states.push(initial);

        let mut y = initial;
        for k in 0..segments {
            let (t_start, t_end) = (time[k], time[k + 1]);
            y = self.integrate_segment(dynamics, y, t_start, t_end)?;
            states.push(y);
        }

        Ok(GridSolution { time, states })
    }

    /// Advance the state across one grid segment and return its endpoint.
    fn integrate_segment(
        &self,
        dynamics: &LakeDynamics,
        y: StateVector,
        t_start: Time,
        t_end: Time,
    ) -> LimnosResult<StateVector> {
        let failure = |message: String| LimnosError::IntegrationFailure {
            t_start,
            t_end,
            message,
        };

        let mut stepper = Dopri5::new(
            dynamics.clone(),
            t_start,
            t_end,
            t_end - t_start,
            y,
            self.rtol,
            self.atol,
        );
        stepper
            .integrate()
            .map_err(|source| failure(format!("{:?}", source)))?;

        stepper
            .y_out()
            .last()
            .copied()
            .ok_or_else(|| failure("stepper produced no output".to_string()))
    }
}
