use crate::constants::KB;

/// Kinetic temperature `T = (2/3) KE / (N kB)` (K), with `ke` in eV
pub fn temperature(ke: f64, num_atoms: usize) -> f64 {
    2.0 / 3.0 * ke / (num_atoms as f64 * KB)
}
