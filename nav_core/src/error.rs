use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VehicleError {
    #[error("vehicle dimensions must be strictly positive (width={width}, length={length}, wheelbase={wheelbase})")]
    NonPositiveDimension {
        width: f64,
        length: f64,
        wheelbase: f64,
    },
    #[error("wheelbase ({wheelbase}) must not exceed length ({length})")]
    WheelbaseExceedsLength { wheelbase: f64, length: f64 },
    #[error("vehicle limits must be strictly positive (max_speed={max_speed}, max_acceleration={max_acceleration}, max_curvature={max_curvature})")]
    NonPositiveLimit {
        max_speed: f64,
        max_acceleration: f64,
        max_curvature: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ControllerParamsError {
    #[error("control_interval must be strictly positive, got {0}")]
    NonPositiveControlInterval(f64),
    #[error("margin must be non-negative, got {0}")]
    NegativeMargin(f64),
    #[error("max_clearance must be strictly positive, got {0}")]
    NonPositiveMaxClearance(f64),
    #[error("curvature_sampling_interval must be strictly positive, got {0}")]
    NonPositiveSamplingInterval(f64),
    #[error("horizon must be strictly positive, got {0}")]
    NonPositiveHorizon(f64),
}
