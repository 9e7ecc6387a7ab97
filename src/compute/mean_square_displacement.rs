use crate::{
    error::{Error, Result},
    utils::{checked_div, Vector3},
};

/// Mean over atoms of `|current - reference|^2` (nm^2)
pub fn mean_square_displacement(current: &[Vector3], reference: &[Vector3]) -> Result<f64> {
    if current.len() != reference.len() {
        return Err(Error::precondition(format!(
            "MSD reference holds {} atoms, model holds {}",
            reference.len(),
            current.len()
        )));
    }
    let total: f64 = current
        .iter()
        .zip(reference)
        .map(|(u, u0)| (*u - *u0).squared_magnitude())
        .sum();
    checked_div(total, current.len() as f64, "mean square displacement")
}
