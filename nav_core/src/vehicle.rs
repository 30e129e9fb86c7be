use crate::error::VehicleError;
use crate::utils::traits::{cst, Float};

/// Rigid-body dimensions and kinematic limits of the car-like vehicle.
/// Pure, immutable data; every component downstream borrows a `&Vehicle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle<F: Float> {
    pub width: F,
    pub length: F,
    pub wheelbase: F,
    pub max_speed: F,
    pub max_acceleration: F,
    pub max_curvature: F,
}

impl<F: Float> Vehicle<F> {
    pub fn new(
        width: F,
        length: F,
        wheelbase: F,
        max_speed: F,
        max_acceleration: F,
        max_curvature: F,
    ) -> Result<Self, VehicleError> {
        if width <= F::zero() || length <= F::zero() || wheelbase <= F::zero() {
            return Err(VehicleError::NonPositiveDimension {
                width: width.to_f64().unwrap_or(f64::NAN),
                length: length.to_f64().unwrap_or(f64::NAN),
                wheelbase: wheelbase.to_f64().unwrap_or(f64::NAN),
            });
        }
        if wheelbase > length {
            return Err(VehicleError::WheelbaseExceedsLength {
                wheelbase: wheelbase.to_f64().unwrap_or(f64::NAN),
                length: length.to_f64().unwrap_or(f64::NAN),
            });
        }
        if max_speed <= F::zero() || max_acceleration <= F::zero() || max_curvature <= F::zero() {
            return Err(VehicleError::NonPositiveLimit {
                max_speed: max_speed.to_f64().unwrap_or(f64::NAN),
                max_acceleration: max_acceleration.to_f64().unwrap_or(f64::NAN),
                max_curvature: max_curvature.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            width,
            length,
            wheelbase,
            max_speed,
            max_acceleration,
            max_curvature,
        })
    }

    pub(crate) fn nose_offset(&self, margin: F) -> F {
        margin + (self.length + self.wheelbase) / cst(2.0)
    }

    pub(crate) fn rear_offset(&self, margin: F) -> F {
        margin + (self.length - self.wheelbase) / cst(2.0)
    }

    pub(crate) fn half_width(&self, margin: F) -> F {
        self.width / cst(2.0) + margin
    }
}
