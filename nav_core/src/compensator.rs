use std::collections::VecDeque;

use nalgebra::Point2;

use crate::clock::{Clock, SystemClock};
use crate::command::{Command, CommandStamped, State2D};
use crate::kinematics::{pose_isometry, transform_cloud_into};
use crate::params::{ControllerParams, STRAIGHT_CURVATURE_THRESHOLD};
use crate::sampler::PathSampler;
use crate::utils::traits::{cst, Float};
use crate::validation::{is_valid_input, safe_braking_command};
use crate::vehicle::Vehicle;

/// Wraps a [`PathSampler`] with forward simulation of commands already
/// issued but not yet reflected in sensor data.
pub struct LatencyCompensator<'v, F: Float, C: Clock<F> = SystemClock> {
    sampler: PathSampler<'v, F>,
    latency: F,
    history: VecDeque<CommandStamped<F>>,
    clock: C,
}

impl<'v, F: Float> LatencyCompensator<'v, F, SystemClock> {
    pub fn new(vehicle: &'v Vehicle<F>, params: ControllerParams<F>, latency: F) -> Self {
        Self::with_clock(vehicle, params, latency, SystemClock::new())
    }
}

impl<'v, F: Float, C: Clock<F>> LatencyCompensator<'v, F, C> {
    pub fn with_clock(
        vehicle: &'v Vehicle<F>,
        params: ControllerParams<F>,
        latency: F,
        clock: C,
    ) -> Self {
        Self {
            sampler: PathSampler::new(vehicle, params),
            latency,
            history: VecDeque::new(),
            clock,
        }
    }

    pub fn vehicle(&self) -> &Vehicle<F> {
        self.sampler.vehicle()
    }

    pub fn params(&self) -> &ControllerParams<F> {
        self.sampler.params()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn record_command(&mut self, command: Command<F>, timestamp: F) {
        let timestamp = match self.history.back() {
            Some(tail) if timestamp < tail.timestamp => {
                tracing::warn!(
                    requested = ?timestamp,
                    tail = ?tail.timestamp,
                    "clamping out-of-order command timestamp to preserve history ordering"
                );
                tail.timestamp
            }
            _ => timestamp,
        };
        self.history.push_back(CommandStamped {
            command,
            timestamp,
        });
    }

    // sensor_ts is informational only; pruning and projection both use
    // the compensator's own clock.
    #[tracing::instrument(level = "debug", skip(self, cloud), fields(cloud_len = cloud.len()))]
    pub fn generate_command(
        &mut self,
        cloud: &[Point2<F>],
        current_speed: F,
        sensor_ts: F,
    ) -> Command<F> {
        tracing::debug!(sensor_ts = ?sensor_ts, "sensor timestamp (informational only)");

        if !is_valid_input(cloud, current_speed) {
            tracing::warn!("rejecting tick with invalid input (non-finite point or negative speed)");
            return safe_braking_command(self.vehicle(), self.params(), current_speed);
        }

        self.prune();
        let state = self.project_state(current_speed);
        let pose = pose_isometry(state.x, state.y, state.heading);
        let transformed = transform_cloud_into(cloud, &pose);

        let command = self.sampler.generate_command(&transformed, state.speed);
        let now = self.clock.now();
        self.record_command(command, now);
        command
    }

    pub fn calculate_free_path_length(
        &self,
        cloud: &[Point2<F>],
        kappa: F,
        sensor_ts: F,
    ) -> F {
        let _ = sensor_ts;
        let state = self.project_state(F::zero());
        let pose = pose_isometry(state.x, state.y, state.heading);
        let transformed = transform_cloud_into(cloud, &pose);
        self.sampler.free_path_length_only(&transformed, kappa)
    }

    fn prune(&mut self) {
        let now = self.clock.now();
        while let Some(front) = self.history.front() {
            if now - front.timestamp >= self.latency {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    // Empty history (after pruning) returns the seed state unchanged.
    fn project_state(&self, seed_speed: F) -> State2D<F> {
        let now = self.clock.now();
        let mut state = State2D::seed(seed_speed);
        let dt = self.sampler.params().control_interval;

        let mut last_speed = None;
        for entry in self
            .history
            .iter()
            .skip_while(|entry| now - entry.timestamp >= self.latency)
        {
            let delta = entry.command.velocity * dt;
            let kappa = entry.command.curvature;
            if kappa.abs() <= cst(STRAIGHT_CURVATURE_THRESHOLD) {
                state.x = state.x + delta;
            } else {
                let radius = F::one() / kappa;
                let dtheta = delta / radius;
                state.x = state.x + delta * dtheta.cos();
                state.y = state.y + delta * dtheta.sin();
                state.heading = state.heading + dtheta;
            }
            last_speed = Some(entry.command.velocity);
        }

        if let Some(speed) = last_speed {
            state.speed = speed;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use approx::assert_relative_eq;

    fn vehicle() -> Vehicle<f64> {
        Vehicle::new(0.28, 0.5, 0.32, 1.0, 4.0, 1.0).unwrap()
    }

    fn params() -> ControllerParams<f64> {
        ControllerParams::new(0.05, 0.05, 0.5, 0.05).unwrap()
    }

    #[test]
    fn project_state_is_identity_with_empty_history() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(123.456_f64);
        let compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);
        let state = compensator.project_state(0.7);
        assert_relative_eq!(state.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.heading, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.speed, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn straight_command_projects_and_shifts_cloud() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(0.05_f64);
        let mut compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);
        compensator.record_command(Command::new(1.0, 0.0), 0.0);

        let state = compensator.project_state(0.0);
        assert_relative_eq!(state.x, 0.05, epsilon = 1e-9);
        assert_relative_eq!(state.y, 0.0, epsilon = 1e-9);

        // A point originally at (1.0, 0) should be evaluated as if at
        // (0.95, 0) once shifted into the projected frame.
        let pose = pose_isometry(state.x, state.y, state.heading);
        let transformed = transform_cloud_into(&[Point2::new(1.0, 0.0)], &pose);
        assert_relative_eq!(transformed[0].x, 0.95, epsilon = 1e-9);
    }

    #[test]
    fn history_pruning_keeps_only_recent_commands() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(0.0_f64);
        let mut compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);

        compensator.record_command(Command::new(0.5, 0.0), -0.3);
        compensator.record_command(Command::new(0.5, 0.0), -0.2);
        compensator.record_command(Command::new(0.5, 0.0), -0.1);
        assert_eq!(compensator.history_len(), 3);

        compensator.clock.advance_to(0.0);
        compensator.generate_command(&[], 0.5, 0.0);

        // Of the three originally recorded commands, only the one at
        // now-0.1 is still within the 0.15s latency window; the tick's own
        // freshly recorded command is appended on top of that survivor.
        assert_eq!(compensator.history_len(), 2);
        assert_relative_eq!(compensator.history[0].timestamp, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn surviving_history_is_always_within_latency_window() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(0.0_f64);
        let mut compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);
        for ts in [-0.5, -0.3, -0.2, -0.1, -0.01] {
            compensator.record_command(Command::new(0.2, 0.0), ts);
        }
        compensator.prune();
        let now = 0.0_f64;
        for entry in &compensator.history {
            assert!(now - entry.timestamp < 0.15);
        }
    }

    #[test]
    fn clamps_out_of_order_timestamp() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(0.0_f64);
        let mut compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);
        compensator.record_command(Command::new(0.5, 0.0), 1.0);
        compensator.record_command(Command::new(0.5, 0.0), 0.5);
        assert_eq!(compensator.history.back().unwrap().timestamp, 1.0);
    }

    #[test]
    fn invalid_input_yields_safe_braking_command() {
        let vehicle = vehicle();
        let params = params();
        let clock = ManualClock::new(0.0_f64);
        let mut compensator = LatencyCompensator::with_clock(&vehicle, params, 0.15, clock);
        let cmd = compensator.generate_command(&[], -1.0, 0.0);
        assert_eq!(cmd.velocity, 0.0);
        assert_eq!(cmd.curvature, 0.0);
    }
}
