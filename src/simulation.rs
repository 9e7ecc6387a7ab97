use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::{
    atom_type::{AtomType, Species},
    atomic::{PairPotential, Potential, PotentialKind},
    atoms::{Atom, Atoms},
    compute::{self, AcfSettings},
    constants::{EV, KB},
    container::Container,
    error::{Error, Result},
    integrators::{Integrator, Verlet},
    lattice::{Cubic, Lattice, LatticeType},
    utils::{checked_div, Vector3},
};

/// Default tolerance of [`AtomicModel::pulse_zeroing`] (nm/s)
pub const PULSE_ZEROING_EPS: f64 = 1e-5;

/// Upper bound on mean-velocity subtractions in one [`AtomicModel::pulse_zeroing`] call
pub const PULSE_ZEROING_MAX_ITERATIONS: usize = 100;

/// Crystal of a single species in a periodic cubic box.
///
/// Owns the atoms, the bound pair potential and every accumulator of a run.
#[derive(Clone, Debug)]
pub struct AtomicModel {
    pub(crate) atoms: Atoms,
    pub(crate) container: Container,
    lattice: Cubic,
    species: Species,
    size: usize,
    potential: Potential,
    pub(crate) mass: f64,
    rng: StdRng,
    timestep: Option<f64>,
    current_step: usize,
    pub(crate) kinetic_energy: f64,
    pub(crate) potential_energy: f64,
    pub(crate) virial: f64,
    pub(crate) momentum_flux: Vector3,
    flux_steps: usize,
    acf_settings: AcfSettings,
    velocity_history: Vec<Vec<Vector3>>,
    msd_reference: Vec<Vector3>,
    forces_current: bool,
    poisoned: bool,
}
impl AtomicModel {
    // Creation

    /// Create a model seeded from system entropy
    pub fn new(
        size: usize,
        species: Species,
        lattice: LatticeType,
        potential: PotentialKind,
    ) -> Result<Self> {
        Self::build(size, species, lattice, potential, StdRng::from_entropy())
    }

    /// Create a model whose random perturbations are reproducible
    pub fn with_seed(
        size: usize,
        species: Species,
        lattice: LatticeType,
        potential: PotentialKind,
        seed: u64,
    ) -> Result<Self> {
        Self::build(size, species, lattice, potential, StdRng::seed_from_u64(seed))
    }

    fn build(
        size: usize,
        species: Species,
        lattice_type: LatticeType,
        potential_kind: PotentialKind,
        rng: StdRng,
    ) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("Model size should be at least one unit cell"));
        }
        let a = species.lattice_constant();
        let lattice = Cubic::new(a, lattice_type)?;
        let container = Container::from_lattice(size, a)?;
        let potential = Potential::for_species(potential_kind, &species)?;

        let mut atoms = Atoms::new();
        for (id, pos) in lattice.sites(size) {
            atoms.add_atom(Atom::new(id, species, pos));
        }

        let mut model = Self {
            atoms,
            container,
            lattice,
            species,
            size,
            potential,
            mass: species.mass(),
            rng,
            timestep: None,
            current_step: 1,
            kinetic_energy: 0.0,
            potential_energy: 0.0,
            virial: 0.0,
            momentum_flux: Vector3::default(),
            flux_steps: 0,
            acf_settings: AcfSettings::default(),
            velocity_history: Vec::new(),
            msd_reference: Vec::new(),
            forces_current: false,
            poisoned: false,
        };
        model.init_calculation()?;
        model.model_info();
        Ok(model)
    }

    /// Log a summary of the model
    pub fn model_info(&self) {
        info!(
            species = %self.species,
            lattice = %self.lattice.lattice_type(),
            potential = %self.potential.kind(),
            size = self.size,
            atoms = self.count_atoms(),
            "Created atomic model"
        );
        info!(
            lattice_constant = self.lattice_constant(),
            box_size = self.box_size(),
            volume = self.volume(),
            ke = self.ke(),
            pe = self.pe(),
            p1 = self.p1(),
            "Initial state"
        );
    }

    // Getters

    pub fn species(&self) -> Species {
        self.species
    }
    pub fn lattice_type(&self) -> LatticeType {
        self.lattice.lattice_type()
    }
    pub fn potential(&self) -> &Potential {
        &self.potential
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }
    pub fn container(&self) -> &Container {
        &self.container
    }
    pub fn timestep(&self) -> Option<f64> {
        self.timestep
    }
    pub fn current_step(&self) -> usize {
        self.current_step
    }
    pub fn count_atoms(&self) -> usize {
        self.atoms.num_atoms()
    }
    pub fn box_size(&self) -> f64 {
        self.container.box_size()
    }
    pub fn volume(&self) -> f64 {
        self.container.volume()
    }
    pub fn lattice_constant(&self) -> f64 {
        self.lattice.lattice_constant()
    }
    pub fn sigma(&self) -> f64 {
        self.potential.sigma()
    }
    pub fn mass(&self) -> f64 {
        self.mass
    }
    pub fn acf_settings(&self) -> &AcfSettings {
        &self.acf_settings
    }
    pub fn momentum_flux(&self) -> Vector3 {
        self.momentum_flux
    }
    /// Steps accumulated in the current momentum flux window
    pub fn flux_steps(&self) -> usize {
        self.flux_steps
    }
    pub fn velocity_history(&self) -> &[Vec<Vector3>] {
        &self.velocity_history
    }
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    // Setters

    pub fn set_time_step(&mut self, dt: f64) -> Result<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(Error::config(format!(
                "Time step should be positive, found {}",
                dt
            )));
        }
        self.timestep = Some(dt);
        Ok(())
    }
    pub fn set_acf_settings(&mut self, settings: AcfSettings) -> Result<()> {
        settings.validate()?;
        self.acf_settings = settings;
        self.velocity_history.clear();
        Ok(())
    }

    // Observables

    /// Kinetic energy (eV)
    pub fn ke(&self) -> f64 {
        self.kinetic_energy
    }
    /// Potential energy (eV)
    pub fn pe(&self) -> f64 {
        self.potential_energy
    }
    /// Total energy (eV)
    pub fn fe(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
    /// Kinetic temperature (K)
    pub fn temperature(&self) -> f64 {
        compute::temperature(self.kinetic_energy, self.count_atoms())
    }
    /// Pair virial `sum d . F` of the last force evaluation (eV)
    pub fn virial(&self) -> f64 {
        self.virial
    }
    /// Virial pressure (eV/nm^3)
    pub fn p1(&self) -> f64 {
        compute::virial_pressure(
            self.count_atoms(),
            self.temperature(),
            self.virial,
            self.volume(),
        )
    }
    /// Momentum flux pressure over the current window (eV/nm^3)
    pub fn p2(&self) -> Result<f64> {
        let dt = self.require_timestep()?;
        compute::flux_pressure(self.momentum_flux, self.box_size(), dt, self.flux_steps)
    }
    pub fn positions(&self) -> Vec<Vector3> {
        self.atoms.positions()
    }
    pub fn unwrapped_positions(&self) -> Vec<Vector3> {
        self.atoms.unwrapped_positions()
    }
    pub fn velocities(&self) -> Vec<Vector3> {
        self.atoms.velocities()
    }
    /// Radial distribution function as `(r, g(r))` pairs
    pub fn radial_distribution(&self) -> Result<Vec<(f64, f64)>> {
        self.check_usable()?;
        compute::radial_distribution(&self.atoms, &self.container, self.lattice_constant())
    }
    /// Mean-square displacement from the reference positions (nm^2)
    pub fn average_square_offset(&self) -> Result<f64> {
        self.check_usable()?;
        compute::mean_square_displacement(&self.atoms.unwrapped_positions(), &self.msd_reference)
    }
    /// Normalized velocity autocorrelation function
    pub fn acfs(&self) -> Result<Vec<f64>> {
        self.check_usable()?;
        compute::autocorrelation(&self.velocity_history, &self.acf_settings)
    }

    // Periodic boundaries

    pub fn separation_squared(&self, p1: &Vector3, p2: &Vector3) -> (f64, Vector3) {
        self.container.separation_squared(p1, p2)
    }
    pub fn periodic(&self, pos: Vector3, momentum: Vector3) -> (Vector3, Vector3) {
        self.container.periodic(pos, momentum)
    }

    // Preparation

    /// Recompute forces, energies and virial from the current state and take
    /// the current unwrapped positions as the MSD reference.
    pub fn init_calculation(&mut self) -> Result<()> {
        self.check_usable()?;
        self.kinetic_energy = 0.0;
        self.potential_energy = 0.0;
        self.virial = 0.0;
        let forces = self.accel();
        self.guard(forces)?;
        self.kinetic_energy = compute::kinetic_energy(&self.atoms, self.mass);
        self.reset_msd_reference();
        self.forces_current = true;
        debug!(ke = self.kinetic_energy, pe = self.potential_energy, "Initialized calculation");
        Ok(())
    }

    /// Displace every atom by a uniform random offset in `[-k a, k a]` per axis.
    ///
    /// Restarts the momentum flux window. Forces are stale afterwards until
    /// [`AtomicModel::init_calculation`] runs.
    pub fn atoms_displacement(&mut self, k: f64) -> Result<()> {
        self.check_usable()?;
        self.reset_flux();
        let amplitude = k * self.lattice_constant();
        let offsets = self.atoms.random_displacements(&mut self.rng, amplitude)?;

        let container = self.container;
        let mass = self.mass;
        let mut flux = Vector3::default();
        for (atom, dx) in self.atoms.iter_mut().zip(offsets) {
            let (wrapped, crossing) =
                container.periodic(atom.position + dx, atom.velocity * mass);
            atom.position = wrapped;
            atom.unwrapped_position += dx;
            flux += crossing;
        }
        self.momentum_flux += flux;
        self.forces_current = false;
        debug!(amplitude, "Displaced atoms");
        Ok(())
    }

    /// Give every atom the speed `sqrt(3 kB T / m)` in a random direction
    pub fn init_velocity_normalization(&mut self, temperature: f64) -> Result<()> {
        self.check_usable()?;
        check_temperature(temperature)?;
        let speed = (3.0 * KB * temperature * EV / self.mass).sqrt();
        self.atoms.randomize_speeds(&mut self.rng, speed);
        self.kinetic_energy = compute::kinetic_energy(&self.atoms, self.mass);
        debug!(temperature, speed, "Assigned initial velocities");
        Ok(())
    }

    /// Remove the net momentum; returns the number of corrections applied
    pub fn pulse_zeroing(&mut self, eps: f64) -> Result<usize> {
        self.check_usable()?;
        let iterations = self
            .atoms
            .zero_momentum(eps, PULSE_ZEROING_MAX_ITERATIONS);
        let iterations = self.guard(iterations)?;
        if iterations == PULSE_ZEROING_MAX_ITERATIONS {
            warn!(eps, iterations, "Momentum zeroing did not reach tolerance");
        }
        self.kinetic_energy = compute::kinetic_energy(&self.atoms, self.mass);
        Ok(iterations)
    }

    /// Rescale velocities so the kinetic temperature equals `temperature`
    pub fn velocity_normalization(&mut self, temperature: f64) -> Result<()> {
        self.check_usable()?;
        check_temperature(temperature)?;
        let sum = self.atoms.sum_mv2(self.mass);
        let target = 3.0 * self.count_atoms() as f64 * KB * temperature * EV;
        let ratio = checked_div(target, sum, "velocity normalization");
        let beta = self.guard(ratio)?.sqrt();
        self.atoms.scale_velocities(beta);
        self.kinetic_energy = compute::kinetic_energy(&self.atoms, self.mass);
        debug!(temperature, beta, "Rescaled velocities");
        Ok(())
    }

    // Resets

    /// Start a new momentum flux window
    pub fn reset_flux(&mut self) {
        self.momentum_flux = Vector3::default();
        self.flux_steps = 0;
    }
    /// Take the current unwrapped positions as the MSD origin
    pub fn reset_msd_reference(&mut self) {
        self.msd_reference = self.atoms.unwrapped_positions();
    }
    pub fn clear_velocity_history(&mut self) {
        self.velocity_history.clear();
    }

    // Time stepping

    /// Advance the model by one velocity-Verlet step
    pub fn verlet(&mut self) -> Result<()> {
        self.check_usable()?;
        let dt = self.require_timestep()?;
        if !self.forces_current {
            return Err(Error::precondition(
                "Forces are stale, run init_calculation before stepping",
            ));
        }

        Verlet::pre_force(self, dt);
        let forces = self.accel();
        self.guard(forces)?;
        Verlet::post_force(self, dt);

        if self.current_step == 1 {
            self.velocity_history.clear();
        }
        if self.velocity_history.len() < self.acf_settings.capacity() {
            self.velocity_history.push(self.atoms.velocities());
        }
        self.current_step += 1;
        self.flux_steps += 1;
        Ok(())
    }

    /// Pair forces over all unique pairs; sets accelerations and accumulates
    /// potential energy and virial.
    fn accel(&mut self) -> Result<()> {
        let positions = self.atoms.positions();
        let cutoff2 = self.potential.cutoff_distance().map(|r| r * r);
        let scale = EV / self.mass;
        let mut accelerations = vec![Vector3::default(); positions.len()];

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (r2, d) = self.container.separation_squared(&positions[i], &positions[j]);
                if cutoff2.is_some_and(|c2| r2 > c2) {
                    continue;
                }
                let force = self.potential.force(r2, d)?;
                accelerations[i] += force * scale;
                accelerations[j] -= force * scale;
                self.potential_energy += self.potential.potential_energy(r2)?;
                self.virial += d.dot(&force);
            }
        }

        for (atom, acc) in self.atoms.as_mut_slice().iter_mut().zip(accelerations) {
            atom.acceleration = acc;
        }
        Ok(())
    }

    // Private functions

    fn check_usable(&self) -> Result<()> {
        if self.poisoned {
            return Err(Error::precondition(
                "Model was invalidated by an earlier error and must be recreated",
            ));
        }
        Ok(())
    }
    fn require_timestep(&self) -> Result<f64> {
        self.timestep
            .ok_or_else(|| Error::precondition("Time step is not set"))
    }
    /// Mark the model unusable when `result` carries a fatal error
    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_fatal() {
                error!(error = %e, step = self.current_step, "Atomic model invalidated");
                self.poisoned = true;
            }
        }
        result
    }
}

fn check_temperature(temperature: f64) -> Result<()> {
    if !(temperature >= 0.0 && temperature.is_finite()) {
        return Err(Error::config(format!(
            "Temperature should be non-negative, found {}",
            temperature
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn argon(size: usize) -> AtomicModel {
        AtomicModel::with_seed(
            size,
            Species::Ar,
            LatticeType::FaceCentered,
            PotentialKind::LennardJones,
            7,
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_model() {
        assert!(matches!(
            AtomicModel::with_seed(
                0,
                Species::Ar,
                LatticeType::SimpleCubic,
                PotentialKind::LennardJones,
                1
            ),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn construction_state() {
        let model = argon(2);
        assert_eq!(model.count_atoms(), 32);
        assert_eq!(model.current_step(), 1);
        assert_relative_eq!(model.box_size(), 2.0 * 0.526);
        assert_eq!(model.ke(), 0.0);
        assert!(model.pe() < 0.0);
        assert_eq!(model.positions(), model.unwrapped_positions());
        assert_eq!(model.sigma(), 0.3408);
    }

    #[test]
    fn stepping_requires_time_step() {
        let mut model = argon(1);
        assert!(matches!(model.verlet(), Err(Error::Precondition(_))));
        assert!(model.set_time_step(0.0).is_err());
        assert!(model.set_time_step(-1e-15).is_err());
        model.set_time_step(1e-15).unwrap();
        model.verlet().unwrap();
        assert_eq!(model.current_step(), 2);
    }

    #[test]
    fn displacement_makes_forces_stale() {
        let mut model = argon(2);
        model.set_time_step(1e-15).unwrap();
        model.atoms_displacement(0.01).unwrap();
        assert!(matches!(model.verlet(), Err(Error::Precondition(_))));
        model.init_calculation().unwrap();
        model.verlet().unwrap();
        assert!(model
            .positions()
            .iter()
            .all(|p| model.container().contains(p)));
    }

    #[test]
    fn pair_forces_conserve_momentum() {
        let mut model = argon(2);
        model.atoms_displacement(0.02).unwrap();
        model.init_calculation().unwrap();
        let total: Vector3 = model.atoms().iter().map(|a| a.acceleration).sum();
        let scale: f64 = model.atoms().iter().map(|a| a.acceleration.magnitude()).sum();
        assert!(scale > 0.0);
        assert!(total.magnitude() <= 1e-9 * scale);
    }

    #[test]
    fn velocity_normalization_at_rest_poisons_model() {
        let mut model = argon(1);
        assert!(matches!(
            model.velocity_normalization(300.0),
            Err(Error::DivisionByZero { .. })
        ));
        assert!(model.is_poisoned());
        assert!(matches!(model.init_calculation(), Err(Error::Precondition(_))));
        assert!(matches!(model.pulse_zeroing(1.0), Err(Error::Precondition(_))));
    }

    #[test]
    fn temperature_follows_normalization() {
        let mut model = argon(2);
        model.init_velocity_normalization(50.0).unwrap();
        model.velocity_normalization(120.0).unwrap();
        assert_relative_eq!(model.temperature(), 120.0, max_relative = 1e-10);
        assert_relative_eq!(
            model.ke(),
            1.5 * model.count_atoms() as f64 * KB * 120.0,
            max_relative = 1e-10
        );
    }

    #[test]
    fn flux_window_counts_steps() {
        let mut model = argon(1);
        assert!(matches!(model.p2(), Err(Error::Precondition(_))));
        model.set_time_step(1e-15).unwrap();
        model.verlet().unwrap();
        model.verlet().unwrap();
        assert_eq!(model.flux_steps(), 2);
        model.reset_flux();
        assert_eq!(model.flux_steps(), 0);
        assert_eq!(model.p2().unwrap(), 0.0);
    }
}
