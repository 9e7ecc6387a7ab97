mod verlet;
pub use verlet::Verlet;

use crate::AtomicModel;

/// Time integrator, split around the force evaluation of a step
pub trait Integrator {
    fn pre_force(_model: &mut AtomicModel, _dt: f64) {}
    fn post_force(_model: &mut AtomicModel, _dt: f64) {}
}
