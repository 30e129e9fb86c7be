/// Numeric element type usable throughout the controller.
///
/// Mirrors the `num`/`nalgebra` float bounds the rest of the geometry stack
/// is built on, so every component here is generic over `f32` or `f64`
/// without repeating the bound list at each call site.
pub trait Float
where
    Self: num::Float + std::fmt::Display + std::fmt::Debug + nalgebra::RealField + 'static,
{
}

impl Float for f32 {}
impl Float for f64 {}

/// Shorthand for converting an `f64` literal into the generic float type.
///
/// Panics only if `F` cannot represent `x`, which never happens for `f32`/`f64`
/// and the small literal constants used throughout this crate.
#[inline(always)]
pub fn cst<F: Float>(x: f64) -> F {
    F::from(x).unwrap()
}
