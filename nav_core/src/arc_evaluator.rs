use nalgebra::Point2;

use crate::kinematics::{arc_radius, icr_transform_point};
use crate::params::{ControllerParams, STRAIGHT_CURVATURE_THRESHOLD};
use crate::utils::traits::{cst, Float};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEvaluation<F: Float> {
    pub free_path_length: F,
    // Pre-floor length; negative exactly when the footprint is already in
    // geometric contact with an obstacle.
    pub raw_free_path_length: F,
    pub clearance: F,
}

pub struct ArcEvaluator<'v, F: Float> {
    vehicle: &'v Vehicle<F>,
    params: ControllerParams<F>,
}

impl<'v, F: Float> ArcEvaluator<'v, F> {
    pub fn new(vehicle: &'v Vehicle<F>, params: ControllerParams<F>) -> Self {
        Self { vehicle, params }
    }

    pub fn evaluate(&self, cloud: &[Point2<F>], kappa: F) -> ArcEvaluation<F> {
        if kappa.abs() < cst(STRAIGHT_CURVATURE_THRESHOLD) {
            self.evaluate_straight(cloud)
        } else {
            self.evaluate_arc(cloud, kappa)
        }
    }

    fn evaluate_straight(&self, cloud: &[Point2<F>]) -> ArcEvaluation<F> {
        let half_width = self.vehicle.half_width(self.params.margin);
        let nose_offset = self.vehicle.nose_offset(self.params.margin);
        let horizon_fpl = self.params.horizon - nose_offset;

        let mut raw_fpl = horizon_fpl;
        for p in cloud {
            if p.y.abs() <= half_width && p.x > F::zero() {
                let candidate = p.x - nose_offset;
                if candidate < raw_fpl {
                    raw_fpl = candidate;
                }
            }
        }
        let fpl = raw_fpl.max(F::zero());

        let mut clearance = self.params.max_clearance;
        for p in cloud {
            let abs_y = p.y.abs();
            if abs_y >= half_width
                && abs_y <= self.params.max_clearance
                && p.x >= F::zero()
                && p.x <= fpl + self.vehicle.wheelbase
            {
                let c = abs_y - self.vehicle.wheelbase / cst(2.0) - self.params.margin;
                if c < clearance {
                    clearance = c;
                }
            }
        }
        let clearance = clearance.max(F::zero()).min(self.params.max_clearance);

        ArcEvaluation {
            free_path_length: fpl,
            raw_free_path_length: raw_fpl,
            clearance,
        }
    }

    fn evaluate_arc(&self, cloud: &[Point2<F>], kappa: F) -> ArcEvaluation<F> {
        let radius = arc_radius(kappa);
        let reflect = kappa < F::zero();
        let half_width = self.vehicle.half_width(self.params.margin);
        let nose_offset = self.vehicle.nose_offset(self.params.margin);
        let rear_offset = self.vehicle.rear_offset(self.params.margin);

        let r_inner_rear = radius - half_width;
        let r_inner_front = ((radius - half_width).powi(2) + nose_offset.powi(2)).sqrt();
        let r_outer_front = ((radius + half_width).powi(2) + nose_offset.powi(2)).sqrt();
        let r_outer_rear = ((radius + half_width).powi(2) + rear_offset.powi(2)).sqrt();
        let r_outer_rear_axle = radius + half_width;

        let horizon_fpl = self.params.horizon - nose_offset;
        let mut raw_fpl = horizon_fpl;

        for p in cloud {
            let px = p.x;
            let py = if reflect { -p.y } else { p.y };
            let dy = radius - py;
            let r = (px * px + dy * dy).sqrt();
            let theta = px.atan2(dy);

            if r < r_inner_rear || r > r_outer_front.max(r_outer_rear) {
                continue;
            }

            // inner side strike
            if r >= r_inner_rear && r < r_inner_front && theta > F::zero() {
                let psi = (r_inner_rear / r).acos();
                let phi = theta - psi;
                if phi >= F::zero() {
                    let candidate = radius * phi;
                    if candidate < raw_fpl {
                        raw_fpl = candidate;
                    }
                }
            }

            // front strike
            if r >= r_inner_front && r < r_outer_front && theta > F::zero() {
                let psi = (nose_offset / r).asin();
                let phi = theta - psi;
                if phi >= F::zero() {
                    let candidate = radius * phi;
                    if candidate < raw_fpl {
                        raw_fpl = candidate;
                    }
                }
            }

            // outer rear strike: computed but never folded into raw_fpl,
            // matching the original's dead assignment here.
            if r >= r_outer_rear_axle
                && r < r_outer_rear
                && px.abs() < rear_offset
                && py.abs() > half_width
            {
                let psi = -(r_outer_rear_axle / r).acos();
                let _candidate_free_path_length = radius * (theta - psi);
            }
        }

        let fpl = raw_fpl.max(F::zero());
        let clearance = self.arc_clearance(cloud, radius, reflect, half_width, fpl);

        ArcEvaluation {
            free_path_length: fpl,
            raw_free_path_length: raw_fpl,
            clearance,
        }
    }

    fn arc_clearance(
        &self,
        cloud: &[Point2<F>],
        radius: F,
        reflect: bool,
        half_width: F,
        fpl: F,
    ) -> F {
        let phi = fpl / radius;
        let mut clearance = self.params.max_clearance;
        let inner_bound = radius - half_width - self.params.max_clearance;
        let outer_bound = radius + half_width + self.params.max_clearance;

        for p in cloud {
            let px = p.x;
            let py = if reflect { -p.y } else { p.y };
            let dy = radius - py;
            let r = (px * px + dy * dy).sqrt();
            let theta = px.atan2(dy);

            if theta < F::zero() || theta > phi || r < inner_bound || r > outer_bound {
                continue;
            }
            let candidate = if self.params.precise_clearance {
                (r - radius).abs() - half_width
            } else {
                ((r * theta.cos()).abs() - radius).abs() - half_width
            };
            if candidate < clearance {
                clearance = candidate;
            }
        }

        for p in cloud {
            let px = p.x;
            let py = if reflect { -p.y } else { p.y };
            let terminal = icr_transform_point(Point2::new(px, py), phi, radius);
            let abs_y = terminal.y.abs();
            if abs_y >= half_width && abs_y <= self.params.max_clearance {
                let c = abs_y - self.vehicle.wheelbase / cst(2.0) - self.params.margin;
                if c < clearance {
                    clearance = c;
                }
            }
        }

        clearance.max(F::zero()).min(self.params.max_clearance)
    }
}
