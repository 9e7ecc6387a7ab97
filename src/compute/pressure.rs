use crate::{
    constants::{EV, EV_PER_NM3_IN_BAR, KB},
    error::Result,
    utils::{checked_div, Vector3},
};

/// Virial pressure `P1 = (N kB T + W / 3) / V` (eV/nm^3)
pub fn virial_pressure(num_atoms: usize, temperature: f64, virial: f64, volume: f64) -> f64 {
    (num_atoms as f64 * KB * temperature + virial / 3.0) / volume
}

/// Pressure from the momentum carried across the box faces (eV/nm^3).
///
/// `flux` is in kg nm/s, accumulated over `steps` steps of length `dt`.
/// An empty window counts as one step.
pub fn flux_pressure(flux: Vector3, box_size: f64, dt: f64, steps: usize) -> Result<f64> {
    let window = 6.0 * box_size * box_size * dt * steps.max(1) as f64;
    Ok(checked_div(flux.component_sum(), window, "momentum flux pressure")? / EV)
}

/// Convert a pressure from eV/nm^3 to bar
pub fn to_bar(pressure: f64) -> f64 {
    pressure * EV_PER_NM3_IN_BAR
}
