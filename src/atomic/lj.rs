use super::PairPotential;
use crate::{
    error::{Error, Result},
    utils::checked_div,
};

/// Lennard-Jones 12-6 potential
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LennardJones {
    well_depth: f64,
    sigma: f64,
    sigma2: f64,
}
impl LennardJones {
    pub fn new(well_depth: f64, sigma: f64) -> Result<Self> {
        if !(well_depth > 0.0 && sigma > 0.0) {
            return Err(Error::config(format!(
                "Lennard-Jones parameters should be positive, found D = {}, sigma = {}",
                well_depth, sigma
            )));
        }
        Ok(Self {
            well_depth,
            sigma,
            sigma2: sigma * sigma,
        })
    }
    pub fn well_depth(&self) -> f64 {
        self.well_depth
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
    /// Separation of the energy minimum, sigma * 2^(1/6)
    pub fn equilibrium_distance(&self) -> f64 {
        self.sigma * 2f64.powf(1.0 / 6.0)
    }

    // (sigma/r)^6 from r^2
    fn sr6(&self, r2: f64, context: &'static str) -> Result<f64> {
        let sr2 = checked_div(self.sigma2, r2, context)?;
        Ok(sr2 * sr2 * sr2)
    }
}

impl PairPotential for LennardJones {
    // F(r) = 24 D (s/r)^6 (2 (s/r)^6 - 1) / r^2
    fn force_coefficient(&self, r2: f64) -> Result<f64> {
        let sr6 = self.sr6(r2, "Lennard-Jones force")?;
        Ok(24.0 * self.well_depth * sr6 * (2.0 * sr6 - 1.0) / r2)
    }
    // U(r) = 4 D ((s/r)^12 - (s/r)^6)
    fn potential_energy(&self, r2: f64) -> Result<f64> {
        let sr6 = self.sr6(r2, "Lennard-Jones energy")?;
        Ok(4.0 * self.well_depth * sr6 * (sr6 - 1.0))
    }
    fn cutoff_distance(&self) -> Option<f64> {
        None
    }
}
