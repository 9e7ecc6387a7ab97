use std::f64::consts::PI;

use crate::{atoms::Atoms, container::Container, error::Result};

/// Bin width as a fraction of the lattice constant
pub const BIN_FRACTION: f64 = 0.05 * 0.726;

/// Radial distribution function as `(r, g(r))` pairs at bin centres.
///
/// Reference atoms are those in the central sub-cube of the box. When none
/// lie there every atom is used as a reference.
pub fn radial_distribution(
    atoms: &Atoms,
    container: &Container,
    lattice_constant: f64,
) -> Result<Vec<(f64, f64)>> {
    let dr = BIN_FRACTION * lattice_constant;
    let num_bins = (container.box_size() / dr).floor() as usize;
    let mut counts = vec![0usize; num_bins];

    let atoms = atoms.as_slice();
    let mut references: Vec<usize> = (0..atoms.len())
        .filter(|&i| container.in_central_region(&atoms[i].position))
        .collect();
    if references.is_empty() {
        references = (0..atoms.len()).collect();
    }

    for &i in &references {
        for (j, other) in atoms.iter().enumerate() {
            if i == j {
                continue;
            }
            let (r2, _) = container.separation_squared(&atoms[i].position, &other.position);
            let bin = (r2.sqrt() / dr).floor() as usize;
            if bin < num_bins {
                counts[bin] += 1;
            }
        }
    }

    let density = atoms.len() as f64 / container.volume();
    let num_refs = references.len() as f64;
    Ok(counts
        .iter()
        .enumerate()
        .map(|(k, &n)| {
            let r = (k as f64 + 0.5) * dr;
            let shell = density * 4.0 * PI * r * r * dr;
            (r, n as f64 / num_refs / shell)
        })
        .collect())
}
