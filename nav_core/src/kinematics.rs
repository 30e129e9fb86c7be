use nalgebra::{Isometry2, Point2, Vector2};

use crate::utils::traits::Float;

// Right turns (kappa < 0) are handled by reflecting y elsewhere, so this
// always returns a positive radius.
#[inline]
pub fn arc_radius<F: Float>(kappa: F) -> F {
    F::one() / kappa.abs()
}

// Body-frame pose reached after advancing by arc angle phi on a circle of
// radius R centered at (0, R).
#[inline]
pub fn icr_advance<F: Float>(phi: F, radius: F) -> (F, F, F) {
    (radius * phi.sin(), radius - radius * phi.cos(), phi)
}

pub fn icr_pose<F: Float>(phi: F, radius: F) -> Isometry2<F> {
    let (x, y, theta) = icr_advance(phi, radius);
    pose_isometry(x, y, theta)
}

#[inline]
pub fn icr_transform_point<F: Float>(p: Point2<F>, phi: F, radius: F) -> Point2<F> {
    icr_pose(phi, radius).inverse_transform_point(&p)
}

pub fn pose_isometry<F: Float>(x: F, y: F, theta: F) -> Isometry2<F> {
    Isometry2::new(Vector2::new(x, y), theta)
}

pub fn transform_cloud_into<F: Float>(cloud: &[Point2<F>], pose: &Isometry2<F>) -> Vec<Point2<F>> {
    let inverse = pose.inverse();
    cloud.iter().map(|p| inverse * p).collect()
}
