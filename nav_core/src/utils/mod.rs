pub mod traits;

pub use traits::{cst, Float};
