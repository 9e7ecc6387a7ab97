/// Group of useful computations
pub mod computations;
mod axis;
pub mod vector;

pub use axis::Axis;
pub use computations::*;
pub use vector::Vector3;
