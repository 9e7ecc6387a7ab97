use crate::error::{Error, Result};

/// Divide two scalars, failing on an exact zero divisor.
///
/// ```rust
/// use crystmd::utils::checked_div;
///
/// assert_eq!(checked_div(3.0, 2.0, "ratio").unwrap(), 1.5);
/// assert!(checked_div(3.0, 0.0, "ratio").is_err());
/// ```
pub fn checked_div(numerator: f64, denominator: f64, context: &'static str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(Error::DivisionByZero { context });
    }
    Ok(numerator / denominator)
}
