use nalgebra::Point2;

use crate::command::Command;
use crate::params::ControllerParams;
use crate::utils::traits::Float;
use crate::vehicle::Vehicle;

// Every cloud point must be finite, and the reported current speed must be
// finite and non-negative.
pub fn is_valid_input<F: Float>(cloud: &[Point2<F>], speed: F) -> bool {
    speed.is_finite()
        && speed >= F::zero()
        && cloud.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

// Emitted in place of a full tick when `is_valid_input` fails:
// (max(0, v - a_max*dt), 0).
pub fn safe_braking_command<F: Float>(
    vehicle: &Vehicle<F>,
    params: &ControllerParams<F>,
    speed: F,
) -> Command<F> {
    let safe_speed = if speed.is_finite() { speed } else { F::zero() };
    let braked = (safe_speed - vehicle.max_acceleration * params.control_interval).max(F::zero());
    Command::new(braked, F::zero())
}
