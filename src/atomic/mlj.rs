use super::{LennardJones, PairPotential};
use crate::error::Result;

/// Lennard-Jones potential smoothly switched off between r1 = 1.2 r0 and r2 = 1.8 r0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModifiedLennardJones {
    lj: LennardJones,
    r1: f64,
    r2: f64,
    r1sq: f64,
    r2sq: f64,
}
impl ModifiedLennardJones {
    pub fn new(well_depth: f64, sigma: f64) -> Result<Self> {
        Ok(Self::from_lj(LennardJones::new(well_depth, sigma)?))
    }
    pub fn from_lj(lj: LennardJones) -> Self {
        let r0 = lj.equilibrium_distance();
        let r1 = 1.2 * r0;
        let r2 = 1.8 * r0;
        Self {
            lj,
            r1,
            r2,
            r1sq: r1 * r1,
            r2sq: r2 * r2,
        }
    }
    pub fn sigma(&self) -> f64 {
        self.lj.sigma()
    }
    /// Inner radius where tapering starts
    pub fn r1(&self) -> f64 {
        self.r1
    }
    /// Outer radius where the interaction vanishes
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// K(r) = (1 - (r - r1)^2 / (r1 - r2)^2)^2
    fn taper(&self, r2: f64) -> f64 {
        let r = r2.sqrt();
        let x = (r - self.r1) * (r - self.r1) / ((self.r1 - self.r2) * (self.r1 - self.r2));
        (1.0 - x) * (1.0 - x)
    }

    fn switched(&self, r2: f64, value: impl FnOnce() -> Result<f64>) -> Result<f64> {
        if r2 < self.r1sq {
            value()
        } else if r2 > self.r2sq {
            Ok(0.0)
        } else {
            Ok(value()? * self.taper(r2))
        }
    }
}

impl PairPotential for ModifiedLennardJones {
    fn force_coefficient(&self, r2: f64) -> Result<f64> {
        self.switched(r2, || self.lj.force_coefficient(r2))
    }
    fn potential_energy(&self, r2: f64) -> Result<f64> {
        self.switched(r2, || self.lj.potential_energy(r2))
    }
    fn cutoff_distance(&self) -> Option<f64> {
        Some(self.r2)
    }
}
