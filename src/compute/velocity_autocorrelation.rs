use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::{checked_div, Vector3},
};

/// Window of the velocity autocorrelation function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcfSettings {
    /// Number of lags computed
    pub count_number: usize,
    /// Number of time origins averaged over
    pub count_repeat: usize,
    /// Steps between consecutive time origins
    pub step_repeat: usize,
}
impl Default for AcfSettings {
    fn default() -> Self {
        Self {
            count_number: 100,
            count_repeat: 10,
            step_repeat: 10,
        }
    }
}
impl AcfSettings {
    /// Number of velocity snapshots the window needs
    pub fn capacity(&self) -> usize {
        self.count_number + self.count_repeat * self.step_repeat
    }
    pub fn validate(&self) -> Result<()> {
        if self.count_number == 0 || self.count_repeat == 0 || self.step_repeat == 0 {
            return Err(Error::config(format!(
                "Autocorrelation window should be non-empty, found {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Normalized velocity autocorrelation `Z(j) / Z(0)` for `j` in `0..count_number`
pub fn autocorrelation(history: &[Vec<Vector3>], settings: &AcfSettings) -> Result<Vec<f64>> {
    settings.validate()?;
    if history.len() < settings.capacity() {
        return Err(Error::precondition(format!(
            "Autocorrelation needs {} velocity snapshots, {} recorded",
            settings.capacity(),
            history.len()
        )));
    }
    let num_atoms = history[0].len();

    let z: Vec<f64> = (0..settings.count_number)
        .map(|lag| {
            let sum: f64 = (0..settings.count_repeat)
                .map(|rep| {
                    let origin = rep * settings.step_repeat;
                    history[origin]
                        .iter()
                        .zip(&history[origin + lag])
                        .map(|(v0, v)| v0.dot(v))
                        .sum::<f64>()
                })
                .sum();
            sum / (num_atoms * settings.count_repeat) as f64
        })
        .collect();

    let z0 = z[0];
    z.into_iter()
        .map(|zj| checked_div(zj, z0, "velocity autocorrelation"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small() -> AcfSettings {
        AcfSettings {
            count_number: 4,
            count_repeat: 2,
            step_repeat: 3,
        }
    }

    #[test]
    fn capacity() {
        assert_eq!(AcfSettings::default().capacity(), 200);
        assert_eq!(small().capacity(), 10);
    }

    #[test]
    fn constant_velocities_are_fully_correlated() {
        let history = vec![vec![Vector3::new(1.0, -2.0, 0.5); 3]; 10];
        let acf = autocorrelation(&history, &small()).unwrap();
        assert_eq!(acf.len(), 4);
        for value in acf {
            assert_relative_eq!(value, 1.0);
        }
    }

    #[test]
    fn reversing_velocities_anticorrelates() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let history: Vec<Vec<Vector3>> = (0..10)
            .map(|t| vec![if t % 2 == 0 { v } else { -v }; 2])
            .collect();
        let settings = AcfSettings {
            count_number: 3,
            count_repeat: 2,
            step_repeat: 2,
        };
        let acf = autocorrelation(&history, &settings).unwrap();
        assert_relative_eq!(acf[0], 1.0);
        assert_relative_eq!(acf[1], -1.0);
        assert_relative_eq!(acf[2], 1.0);
    }

    #[test]
    fn short_history_is_a_precondition_error() {
        let history = vec![vec![Vector3::splat(1.0)]; 9];
        assert!(matches!(
            autocorrelation(&history, &small()),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn atoms_at_rest_divide_by_zero() {
        let history = vec![vec![Vector3::splat(0.0); 2]; 10];
        assert!(matches!(
            autocorrelation(&history, &small()),
            Err(Error::DivisionByZero { .. })
        ));
    }
}
