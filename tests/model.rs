use approx::assert_relative_eq;
use crystmd::{
    constants::KB,
    lattice::{Cubic, Lattice},
    prelude::*,
};

fn model(size: usize, species: Species, lattice: LatticeType) -> AtomicModel {
    AtomicModel::with_seed(size, species, lattice, PotentialKind::LennardJones, 7).unwrap()
}

fn argon(size: usize) -> AtomicModel {
    model(size, Species::Ar, LatticeType::FaceCentered)
}

#[test]
fn fcc_atom_counts() {
    assert_eq!(argon(1).count_atoms(), 4);
    assert_eq!(argon(3).count_atoms(), 108);
}

#[test]
fn atom_counts_for_every_lattice() {
    assert_eq!(model(3, Species::Ar, LatticeType::SimpleCubic).count_atoms(), 27);
    assert_eq!(model(2, Species::Fe, LatticeType::BodyCentered).count_atoms(), 16);
    assert_eq!(model(2, Species::Si, LatticeType::Diamond).count_atoms(), 64);
}

#[test]
fn positions_after_construction_are_lattice_sites() {
    let model = argon(2);
    let sites = Cubic::new(Species::Ar.lattice_constant(), LatticeType::FaceCentered)
        .unwrap()
        .sites(2);
    assert_eq!(
        model.atoms().ids(),
        sites.iter().map(|(id, _)| *id).collect::<Vec<_>>()
    );
    assert_eq!(
        model.positions(),
        sites.iter().map(|(_, p)| *p).collect::<Vec<_>>()
    );
    assert_eq!(model.positions(), model.unwrapped_positions());
    assert!(model.velocities().iter().all(|v| v.magnitude() == 0.0));
}

#[test]
fn repeated_construction_is_identical() {
    assert_eq!(argon(2).positions(), argon(2).positions());
    assert_eq!(argon(2).atoms().ids(), argon(2).atoms().ids());
}

#[test]
fn half_and_quarter_box_separation() {
    let model = argon(1);
    let l = model.box_size();
    let vec1 = Vector3::splat(0.5 * l);
    let vec2 = Vector3::splat(0.25 * l);
    let (r2, d) = model.separation_squared(&vec1, &vec2);
    assert_eq!(d, vec1 - vec2);
    assert_relative_eq!(r2, 3.0 * (0.25 * l).powi(2), max_relative = 1e-12);
}

#[test]
fn velocity_normalization_sets_kinetic_energy() {
    let mut model = argon(3);
    model.init_velocity_normalization(300.0).unwrap();
    model.velocity_normalization(150.0).unwrap();
    let expected = 1.5 * model.count_atoms() as f64 * KB * 150.0;
    assert_relative_eq!(model.ke(), expected, max_relative = 1e-10);
    assert_relative_eq!(model.temperature(), 150.0, max_relative = 1e-10);
}

#[test]
fn pulse_zeroing_converges_and_is_idempotent() {
    let mut model = argon(3);
    model.init_velocity_normalization(100.0).unwrap();
    // speeds are of order 1e11 nm/s, so 1 nm/s is a tight tolerance
    let eps = 1.0;
    model.pulse_zeroing(eps).unwrap();
    let mean: Vector3 = model.atoms().mean_velocity().unwrap();
    assert!(mean.component_sum().abs() <= eps);

    let before = model.velocities();
    assert_eq!(model.pulse_zeroing(eps).unwrap(), 0);
    assert_eq!(model.velocities(), before);
}

#[test]
fn total_energy_is_conserved() {
    let mut model = argon(3);
    model.init_velocity_normalization(20.0).unwrap();
    model.pulse_zeroing(1.0).unwrap();
    model.init_calculation().unwrap();
    model.set_time_step(2e-15).unwrap();

    let ke0 = model.ke();
    let fe0 = model.fe();
    for _ in 0..100 {
        model.verlet().unwrap();
        assert!((model.fe() - fe0).abs() < 0.05 * ke0);
    }
    assert_eq!(model.current_step(), 101);
    assert!(model
        .positions()
        .iter()
        .all(|p| model.container().contains(p)));
}

#[test]
fn wrapped_and_unwrapped_positions_differ_by_whole_boxes() {
    let mut model = argon(2);
    model.atoms_displacement(0.2).unwrap();
    let l = model.box_size();
    for (p, u) in model.positions().iter().zip(model.unwrapped_positions()) {
        assert!(model.container().contains(p));
        let shift = (u - *p) * (1.0 / l);
        for c in shift.to_array() {
            assert!((c - c.round()).abs() < 1e-9);
        }
    }
}

#[test]
fn momentum_flux_registers_boundary_crossings() {
    let mut model = argon(2);
    model.init_velocity_normalization(300.0).unwrap();
    model.init_calculation().unwrap();
    model.set_time_step(2e-15).unwrap();
    for _ in 0..50 {
        model.verlet().unwrap();
    }
    assert_eq!(model.flux_steps(), 50);
    assert!(model.momentum_flux().magnitude() > 0.0);

    let l = model.box_size();
    for (p, u) in model.positions().iter().zip(model.unwrapped_positions()) {
        assert!(model.container().contains(p));
        for c in ((u - *p) * (1.0 / l)).to_array() {
            assert!((c - c.round()).abs() < 1e-6);
        }
    }

    let positions = model.positions();
    let unwrapped = model.unwrapped_positions();
    let momenta: Vec<Vector3> = model
        .velocities()
        .into_iter()
        .map(|v| v * model.mass())
        .collect();
    model.atoms_displacement(0.3).unwrap();
    assert_eq!(model.flux_steps(), 0);

    // only the wraps made by the displacement itself remain
    let mut expected = [0.0; 3];
    let after = model.positions().into_iter().zip(model.unwrapped_positions());
    for (i, (p, u)) in after.enumerate() {
        let moved = positions[i] + (u - unwrapped[i]) - p;
        let moved = moved.to_array();
        let momentum = momenta[i].to_array();
        for axis in 0..3 {
            expected[axis] += (moved[axis] / l).round() * momentum[axis];
        }
    }
    let flux = model.momentum_flux().to_array();
    for axis in 0..3 {
        assert_relative_eq!(flux[axis], expected[axis], epsilon = 1e-24, max_relative = 1e-9);
    }
}

#[test]
fn mean_square_displacement_tracks_unwrapped_motion() {
    let mut model = argon(2);
    assert_eq!(model.average_square_offset().unwrap(), 0.0);

    let k = 0.05;
    model.atoms_displacement(k).unwrap();
    let msd = model.average_square_offset().unwrap();
    let bound = 3.0 * (k * model.lattice_constant()).powi(2);
    assert!(msd > 0.0 && msd <= bound);

    model.reset_msd_reference();
    assert_eq!(model.average_square_offset().unwrap(), 0.0);
}

#[test]
fn radial_distribution_of_perfect_crystal() {
    let model = argon(3);
    let rdf = model.radial_distribution().unwrap();
    let a = model.lattice_constant();
    let dr = crystmd::compute::BIN_FRACTION * a;
    assert_eq!(rdf.len(), (model.box_size() / dr).floor() as usize);

    let first_peak = rdf.iter().position(|(_, g)| *g > 0.0).unwrap();
    assert_eq!(first_peak, (a / 2f64.sqrt() / dr).floor() as usize);
}

#[test]
fn velocity_autocorrelation_after_enough_steps() {
    let mut model = argon(2);
    let settings = AcfSettings {
        count_number: 5,
        count_repeat: 3,
        step_repeat: 2,
    };
    model.set_acf_settings(settings).unwrap();
    model.init_velocity_normalization(30.0).unwrap();
    model.init_calculation().unwrap();
    model.set_time_step(2e-15).unwrap();

    assert!(matches!(model.acfs(), Err(Error::Precondition(_))));
    for _ in 0..settings.capacity() {
        model.verlet().unwrap();
    }
    assert_eq!(model.velocity_history().len(), settings.capacity());

    let acf = model.acfs().unwrap();
    assert_eq!(acf.len(), 5);
    assert_relative_eq!(acf[0], 1.0);
    assert!(acf[1] > 0.5);

    // history stops growing once the window is filled
    model.verlet().unwrap();
    assert_eq!(model.velocity_history().len(), settings.capacity());
}

#[test]
fn runner_cancellation_keeps_model_consistent() {
    let settings = RunSettings {
        time_step: 2e-15,
        count_step: 1_000_000,
        snapshot_step: 1000,
        msd_step: 1000,
        renormalization: None,
    };
    let runner = Runner::spawn(argon(1), settings);
    runner.cancel();
    let (model, summary) = runner.join().unwrap();

    assert!(summary.cancelled);
    assert!(summary.steps_completed < settings.count_step);
    assert_eq!(model.current_step(), summary.steps_completed + 1);
    assert_eq!(summary.energies.len(), summary.steps_completed);
}
