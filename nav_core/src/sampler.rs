use nalgebra::Point2;

use crate::arc_evaluator::ArcEvaluator;
use crate::command::{Command, PathCandidate};
use crate::params::{
    ControllerParams, SCORE_CLEARANCE_WEIGHT, SCORE_GOAL_WEIGHT, SENTINEL_SCORE,
    STRAIGHT_CURVATURE_THRESHOLD,
};
use crate::speed_rule::decide_speed;
use crate::utils::traits::{cst, Float};
use crate::validation::{is_valid_input, safe_braking_command};
use crate::vehicle::Vehicle;

// Fixed forward goal, (10, 0) in the body frame.
pub fn default_goal<F: Float>() -> Point2<F> {
    Point2::new(cst(10.0), F::zero())
}

// Generated from an integer step index rather than repeated float
// addition, so the final sample always lands exactly on kappa_max.
fn curvature_lattice<F: Float>(kappa_max: F, dk: F) -> impl Iterator<Item = F> {
    let span = kappa_max + kappa_max;
    let steps = (span / dk).ceil();
    let steps = steps.to_i64().unwrap_or(0).max(0);
    (0..=steps).map(move |i| (-kappa_max + cst::<F>(i as f64) * dk).min(kappa_max))
}

pub struct PathSampler<'v, F: Float> {
    vehicle: &'v Vehicle<F>,
    params: ControllerParams<F>,
    evaluator: ArcEvaluator<'v, F>,
}

impl<'v, F: Float> PathSampler<'v, F> {
    pub fn new(vehicle: &'v Vehicle<F>, params: ControllerParams<F>) -> Self {
        Self {
            vehicle,
            params,
            evaluator: ArcEvaluator::new(vehicle, params),
        }
    }

    pub fn vehicle(&self) -> &Vehicle<F> {
        self.vehicle
    }

    pub fn params(&self) -> &ControllerParams<F> {
        &self.params
    }

    #[tracing::instrument(level = "debug", skip(self, cloud), fields(cloud_len = cloud.len()))]
    pub fn generate_command(&self, cloud: &[Point2<F>], current_speed: F) -> Command<F> {
        if !is_valid_input(cloud, current_speed) {
            tracing::warn!("rejecting tick with invalid input (non-finite point or negative speed)");
            return safe_braking_command(self.vehicle, &self.params, current_speed);
        }

        let best = self.best_candidate(cloud);
        let decision = decide_speed(self.vehicle, &self.params, current_speed, &best);

        if let Some(warning) = decision.warning {
            tracing::warn!(
                curvature = ?best.curvature,
                free_path_length = ?warning.free_path_length,
                "imminent collision on selected arc"
            );
        }

        Command::new(decision.velocity, best.curvature)
    }

    pub fn best_candidate(&self, cloud: &[Point2<F>]) -> PathCandidate<F> {
        let mut best = PathCandidate {
            curvature: F::zero(),
            free_path_length: F::zero(),
            raw_free_path_length: F::zero(),
            clearance: F::zero(),
            goal_distance: F::zero(),
            score: cst(SENTINEL_SCORE),
        };

        for kappa in curvature_lattice(self.vehicle.max_curvature, self.params.curvature_sampling_interval)
        {
            let eval = self.evaluator.evaluate(cloud, kappa);
            let goal_distance = self.goal_distance(kappa);
            let score = eval.free_path_length
                + cst::<F>(SCORE_CLEARANCE_WEIGHT) * eval.clearance
                + cst::<F>(SCORE_GOAL_WEIGHT) * goal_distance;

            if score > best.score {
                best = PathCandidate {
                    curvature: kappa,
                    free_path_length: eval.free_path_length,
                    raw_free_path_length: eval.raw_free_path_length,
                    clearance: eval.clearance,
                    goal_distance,
                    score,
                };
            }
        }

        best
    }

    pub fn free_path_length_only(&self, cloud: &[Point2<F>], kappa: F) -> F {
        self.evaluator.evaluate(cloud, kappa).free_path_length
    }

    fn goal_distance(&self, kappa: F) -> F {
        let advance = self.vehicle.max_speed * self.params.control_interval;
        let goal = default_goal::<F>();
        let projected = if kappa.abs() < cst(STRAIGHT_CURVATURE_THRESHOLD) {
            Point2::new(advance, F::zero())
        } else {
            let radius = F::one() / kappa.abs();
            let phi = advance / radius;
            let (x, y) = (radius * phi.sin(), radius - radius * phi.cos());
            if kappa < F::zero() {
                Point2::new(x, -y)
            } else {
                Point2::new(x, y)
            }
        };
        (goal - projected).norm()
    }
}
