//! Reactive motion controller for a car-like ground vehicle.
//!
//! On each control tick, [`sampler::PathSampler`] samples a family of
//! constant-curvature arcs against a point cloud of nearby obstacles and
//! produces a time-optimal `(speed, curvature)` command toward a fixed
//! forward goal. [`compensator::LatencyCompensator`] wraps it with forward
//! simulation of in-flight commands to compensate for sensing/actuation
//! latency.

pub mod arc_evaluator;
pub mod clock;
pub mod command;
pub mod compensator;
pub mod error;
pub mod kinematics;
pub mod params;
pub mod sampler;
pub mod speed_rule;
pub mod utils;
pub mod validation;
pub mod vehicle;

pub use arc_evaluator::{ArcEvaluation, ArcEvaluator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{
    Command, CommandStamped, FreePathWarning, PathCandidate, SpeedBranch, SpeedDecision, State2D,
};
pub use compensator::LatencyCompensator;
pub use error::{ControllerParamsError, VehicleError};
pub use params::ControllerParams;
pub use sampler::PathSampler;
pub use vehicle::Vehicle;
