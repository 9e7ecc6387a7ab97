use std::f64::consts::PI;

use num_traits::Zero;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{
    atom_type::Species,
    error::{Error, Result},
    utils::Vector3,
};

/// Per-particle state
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub id: usize,
    pub species: Species,
    /// Position wrapped into the periodic box
    pub position: Vector3,
    /// Position accumulated from every displacement, never wrapped
    pub unwrapped_position: Vector3,
    pub velocity: Vector3,
    pub acceleration: Vector3,
}
impl Atom {
    /// New atom at rest
    pub fn new(id: usize, species: Species, position: Vector3) -> Self {
        Self {
            id,
            species,
            position,
            unwrapped_position: position,
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
        }
    }
}

/// Atom collection; index order is fixed at creation and drives the pair loop
#[derive(Clone, Debug, Default)]
pub struct Atoms {
    atoms: Vec<Atom>,
}
impl Atoms {
    pub fn new() -> Self {
        Atoms { atoms: Vec::new() }
    }
    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Atom> {
        self.atoms.iter_mut()
    }
    pub fn as_slice(&self) -> &[Atom] {
        &self.atoms
    }
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }
    pub fn ids(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.id).collect()
    }
    pub fn positions(&self) -> Vec<Vector3> {
        self.atoms.iter().map(|a| a.position).collect()
    }
    pub fn unwrapped_positions(&self) -> Vec<Vector3> {
        self.atoms.iter().map(|a| a.unwrapped_position).collect()
    }
    pub fn velocities(&self) -> Vec<Vector3> {
        self.atoms.iter().map(|a| a.velocity).collect()
    }

    /// Mean velocity of all atoms
    pub fn mean_velocity(&self) -> Result<Vector3> {
        let total: Vector3 = self.atoms.iter().map(|a| a.velocity).sum();
        total.checked_div(self.num_atoms() as f64)
    }

    /// Sum of m v^2 over all atoms (kg nm^2 / s^2)
    pub fn sum_mv2(&self, mass: f64) -> f64 {
        self.atoms
            .iter()
            .map(|a| mass * a.velocity.squared_magnitude())
            .sum()
    }

    pub fn scale_velocities(&mut self, factor: f64) {
        self.atoms.iter_mut().for_each(|a| a.velocity *= factor);
    }

    /// Random displacement vectors with every component uniform in `[-amplitude, amplitude]`
    pub fn random_displacements<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        amplitude: f64,
    ) -> Result<Vec<Vector3>> {
        if !(amplitude >= 0.0 && amplitude.is_finite()) {
            return Err(Error::config(format!(
                "Displacement amplitude should be non-negative, found {}",
                amplitude
            )));
        }
        let dist = Uniform::new_inclusive(-amplitude, amplitude);
        Ok((0..self.num_atoms())
            .map(|_| Vector3::new(dist.sample(rng), dist.sample(rng), dist.sample(rng)))
            .collect())
    }

    /// Give every atom the same speed in a direction built from two uniform angles.
    ///
    /// The polar angle is uniform in `[0, pi]`, so directions cluster at the poles.
    pub fn randomize_speeds<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: f64) {
        for atom in self.atoms.iter_mut() {
            let theta = PI * rng.gen::<f64>();
            let phi = 2.0 * PI * rng.gen::<f64>();
            atom.velocity = Vector3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ) * speed;
        }
    }

    /// Subtract the mean velocity until `|mean.x + mean.y + mean.z| <= eps`.
    ///
    /// Returns the number of subtractions performed, at most `max_iterations`.
    pub fn zero_momentum(&mut self, eps: f64, max_iterations: usize) -> Result<usize> {
        for iteration in 0..max_iterations {
            let mean = self.mean_velocity()?;
            if mean.component_sum().abs() <= eps {
                return Ok(iteration);
            }
            self.atoms.iter_mut().for_each(|a| a.velocity -= mean);
        }
        Ok(max_iterations)
    }
}
