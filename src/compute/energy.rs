use crate::{atoms::Atoms, constants::EV};

/// Kinetic energy of all atoms (eV)
pub fn kinetic_energy(atoms: &Atoms, mass: f64) -> f64 {
    0.5 * atoms.sum_mv2(mass) / EV
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{atom_type::Species, atoms::Atom, utils::Vector3};
    use approx::assert_relative_eq;

    #[test]
    fn kinetic_energy_of_two_atoms() {
        let mut atoms = Atoms::new();
        let mut a = Atom::new(1, Species::Ar, Vector3::splat(0.0));
        a.velocity = Vector3::new(1.0, 0.0, 0.0);
        let mut b = Atom::new(2, Species::Ar, Vector3::splat(1.0));
        b.velocity = Vector3::new(0.0, 2.0, 0.0);
        atoms.add_atom(a);
        atoms.add_atom(b);
        assert_relative_eq!(kinetic_energy(&atoms, 2.0), 5.0 / EV);
    }
}
