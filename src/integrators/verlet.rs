use super::*;
use crate::{compute, utils::Vector3};

/// Velocity-verlet integrator
pub struct Verlet {}

impl Verlet {
    /// Steps the velocities of the model by half a timestep
    fn increment_velocity_halfstep(model: &mut AtomicModel, dt: f64) {
        let half_dt = 0.5 * dt;
        for atom in model.atoms.iter_mut() {
            atom.velocity += atom.acceleration * half_dt;
        }
    }
    /// Steps the positions of the model forward, wrapping them into the box
    fn increment_positions(model: &mut AtomicModel, dt: f64) {
        let container = model.container;
        let mass = model.mass;
        let mut flux = Vector3::default();

        for atom in model.atoms.iter_mut() {
            let dx = atom.velocity * dt + atom.acceleration * (0.5 * dt * dt);
            let (wrapped, crossing) =
                container.periodic(atom.position + dx, atom.velocity * mass);
            atom.position = wrapped;
            atom.unwrapped_position += dx;
            flux += crossing;
        }
        model.momentum_flux += flux;
    }
}

impl Integrator for Verlet {
    fn pre_force(model: &mut AtomicModel, dt: f64) {
        model.kinetic_energy = 0.0;
        model.potential_energy = 0.0;
        model.virial = 0.0;
        Verlet::increment_positions(model, dt);
        Verlet::increment_velocity_halfstep(model, dt);
    }
    fn post_force(model: &mut AtomicModel, dt: f64) {
        Verlet::increment_velocity_halfstep(model, dt);
        model.kinetic_energy = compute::kinetic_energy(&model.atoms, model.mass);
    }
}
