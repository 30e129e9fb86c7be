use crate::command::{FreePathWarning, PathCandidate, SpeedBranch, SpeedDecision};
use crate::params::{ControllerParams, SPEED_SNAP_EPSILON};
use crate::utils::traits::{cst, Float};
use crate::vehicle::Vehicle;

// Classifies into accelerate / cruise / fallback / decelerate, in that
// order, and returns the next commanded speed clamped to [0, v_max].
pub fn decide_speed<F: Float>(
    vehicle: &Vehicle<F>,
    params: &ControllerParams<F>,
    current_speed: F,
    candidate: &PathCandidate<F>,
) -> SpeedDecision<F> {
    let dt = params.control_interval;
    let a = vehicle.max_acceleration;
    let v_max = vehicle.max_speed;
    let fpl = candidate.free_path_length;
    let raw_fpl = candidate.raw_free_path_length;

    let v = if (v_max - current_speed).abs() <= cst(SPEED_SNAP_EPSILON) {
        v_max
    } else {
        current_speed
    };

    let two = cst::<F>(2.0);
    let half = cst::<F>(0.5);

    let accel_threshold = v * dt + half * a * dt * dt + (v + a * dt).powi(2) / (two * a);
    let cruise_threshold = v * dt + v_max * v_max / (two * a);

    let (velocity, branch, warning) = if v < v_max && fpl >= accel_threshold {
        (v + a * dt, SpeedBranch::Accelerate, None)
    } else if v == v_max && fpl >= cruise_threshold {
        (v, SpeedBranch::Cruise, None)
    } else if raw_fpl < F::zero() {
        (
            v - a * dt,
            SpeedBranch::Fallback,
            Some(FreePathWarning {
                free_path_length: raw_fpl,
            }),
        )
    } else {
        (v - a * dt, SpeedBranch::Decelerate, None)
    };

    let velocity = velocity.max(F::zero()).min(v_max);

    SpeedDecision {
        velocity,
        branch,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vehicle() -> Vehicle<f64> {
        Vehicle::new(0.28, 0.5, 0.32, 1.0, 4.0, 1.0).unwrap()
    }

    fn params() -> ControllerParams<f64> {
        ControllerParams::new(0.05, 0.05, 0.5, 0.05).unwrap()
    }

    fn candidate(free_path_length: f64, raw_free_path_length: f64) -> PathCandidate<f64> {
        PathCandidate {
            curvature: 0.0,
            free_path_length,
            raw_free_path_length,
            clearance: 0.5,
            goal_distance: 0.0,
            score: 0.0,
        }
    }

    #[test]
    fn accelerates_with_ample_room() {
        let vehicle = vehicle();
        let params = params();
        let decision = decide_speed(&vehicle, &params, 0.5, &candidate(0.54, 0.54));
        assert_eq!(decision.branch, SpeedBranch::Accelerate);
        assert_relative_eq!(decision.velocity, 0.7, epsilon = 1e-9);
        assert!(decision.warning.is_none());
    }

    #[test]
    fn cruises_at_max_speed_with_room() {
        let vehicle = vehicle();
        let params = params();
        let decision = decide_speed(&vehicle, &params, 1.0, &candidate(9.54, 9.54));
        assert_eq!(decision.branch, SpeedBranch::Cruise);
        assert_relative_eq!(decision.velocity, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn falls_back_on_negative_raw_free_path_length() {
        let vehicle = vehicle();
        let params = params();
        let decision = decide_speed(&vehicle, &params, 1.0, &candidate(0.0, -0.31));
        assert_eq!(decision.branch, SpeedBranch::Fallback);
        assert_relative_eq!(decision.velocity, 0.8, epsilon = 1e-9);
        assert_relative_eq!(
            decision.warning.unwrap().free_path_length,
            -0.31,
            epsilon = 1e-9
        );
    }

    #[test]
    fn decelerates_when_short_but_not_negative() {
        let vehicle = vehicle();
        let params = params();
        // Short of the accelerate/cruise thresholds, but not a negative raw
        // length -- plain deceleration, no warning.
        let decision = decide_speed(&vehicle, &params, 1.0, &candidate(0.05, 0.05));
        assert_eq!(decision.branch, SpeedBranch::Decelerate);
        assert!(decision.warning.is_none());
        assert_relative_eq!(decision.velocity, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn velocity_is_always_clamped_to_vehicle_limits() {
        let vehicle = vehicle();
        let params = params();
        let decision = decide_speed(&vehicle, &params, 0.0, &candidate(-5.0, -5.0));
        assert!(decision.velocity >= 0.0);
        assert!(decision.velocity <= vehicle.max_speed);
    }

    #[test]
    fn snaps_current_speed_to_max_within_epsilon() {
        let vehicle = vehicle();
        let params = params();
        // 0.98 is within SPEED_SNAP_EPSILON (0.05) of v_max (1.0); should be
        // treated as cruising at v_max, not accelerating from 0.98.
        let decision = decide_speed(&vehicle, &params, 0.98, &candidate(9.54, 9.54));
        assert_eq!(decision.branch, SpeedBranch::Cruise);
        assert_relative_eq!(decision.velocity, 1.0, epsilon = 1e-9);
    }
}
