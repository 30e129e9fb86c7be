use crate::error::ControllerParamsError;
use crate::utils::traits::{cst, Float};

// Free path length search horizon, in meters.
pub const DEFAULT_HORIZON: f64 = 10.0;

// Curvature magnitude below which an arc is treated as a straight line.
pub const STRAIGHT_CURVATURE_THRESHOLD: f64 = 1e-2;

pub const SPEED_SNAP_EPSILON: f64 = 0.05;
pub const SCORE_CLEARANCE_WEIGHT: f64 = 8.0;
pub const SCORE_GOAL_WEIGHT: f64 = -0.5;
pub const SENTINEL_SCORE: f64 = -100.0;

/// Immutable controller tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerParams<F: Float> {
    pub control_interval: F,
    pub margin: F,
    pub max_clearance: F,
    pub curvature_sampling_interval: F,
    pub horizon: F,
    // Gates the corrected arc clearance formula; false matches the
    // original imprecise one.
    pub precise_clearance: bool,
}

impl<F: Float> ControllerParams<F> {
    pub fn new(
        control_interval: F,
        margin: F,
        max_clearance: F,
        curvature_sampling_interval: F,
    ) -> Result<Self, ControllerParamsError> {
        Self::with_horizon(
            control_interval,
            margin,
            max_clearance,
            curvature_sampling_interval,
            cst(DEFAULT_HORIZON),
        )
    }

    pub fn with_horizon(
        control_interval: F,
        margin: F,
        max_clearance: F,
        curvature_sampling_interval: F,
        horizon: F,
    ) -> Result<Self, ControllerParamsError> {
        if control_interval <= F::zero() {
            return Err(ControllerParamsError::NonPositiveControlInterval(
                control_interval.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if margin < F::zero() {
            return Err(ControllerParamsError::NegativeMargin(
                margin.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if max_clearance <= F::zero() {
            return Err(ControllerParamsError::NonPositiveMaxClearance(
                max_clearance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if curvature_sampling_interval <= F::zero() {
            return Err(ControllerParamsError::NonPositiveSamplingInterval(
                curvature_sampling_interval.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if horizon <= F::zero() {
            return Err(ControllerParamsError::NonPositiveHorizon(
                horizon.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(Self {
            control_interval,
            margin,
            max_clearance,
            curvature_sampling_interval,
            horizon,
            precise_clearance: false,
        })
    }

    pub fn with_precise_clearance(mut self, precise: bool) -> Self {
        self.precise_clearance = precise;
        self
    }
}
