use serde::{Deserialize, Serialize};

use crate::utils::traits::Float;

/// A motion command: forward speed and curvature, both already clamped to
/// the vehicle's limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command<F: Float> {
    pub velocity: F,
    pub curvature: F,
}

impl<F: Float> Command<F> {
    pub fn new(velocity: F, curvature: F) -> Self {
        Self {
            velocity,
            curvature,
        }
    }
}

/// A [`Command`] tagged with the monotonic time it was recorded, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandStamped<F: Float> {
    pub command: Command<F>,
    pub timestamp: F,
}

/// One sampled constant-curvature arc and its evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathCandidate<F: Float> {
    pub curvature: F,
    pub free_path_length: F,
    pub raw_free_path_length: F,
    pub clearance: F,
    pub goal_distance: F,
    pub score: F,
}

/// Vehicle pose and speed in the body frame of the last observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State2D<F: Float> {
    pub x: F,
    pub y: F,
    pub heading: F,
    pub speed: F,
}

impl<F: Float> State2D<F> {
    pub fn seed(speed: F) -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
            heading: F::zero(),
            speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBranch {
    Accelerate,
    Cruise,
    Decelerate,
    Fallback,
}

/// Surfaced when the chosen arc's pre-floor free path length is negative —
/// the footprint is already in geometric contact with an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreePathWarning<F: Float> {
    pub free_path_length: F,
}

pub struct SpeedDecision<F: Float> {
    pub velocity: F,
    pub branch: SpeedBranch,
    pub warning: Option<FreePathWarning<F>>,
}
