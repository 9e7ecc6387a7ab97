pub mod lj;
pub mod mlj;

pub use lj::LennardJones;
pub use mlj::ModifiedLennardJones;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{atom_type::AtomType, error::Result, utils::Vector3, Error};

/// Trait for pairwise central potentials, evaluated from the squared separation
pub trait PairPotential {
    /// Scalar coefficient that multiplies the separation vector to give the force (eV/nm^2)
    fn force_coefficient(&self, r2: f64) -> Result<f64>;

    /// Pair energy (eV)
    fn potential_energy(&self, r2: f64) -> Result<f64>;

    /// Distance beyond which the interaction vanishes, if any
    fn cutoff_distance(&self) -> Option<f64>;

    /// Force on the first atom of a pair separated by `displacement` (eV/nm)
    fn force(&self, r2: f64, displacement: Vector3) -> Result<Vector3> {
        Ok(displacement * self.force_coefficient(r2)?)
    }
}

/// Potential selector used at model construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotentialKind {
    #[serde(rename = "lj", alias = "lennard_jones")]
    LennardJones,
    #[serde(rename = "mlj", alias = "modified_lennard_jones")]
    ModifiedLennardJones,
}
impl FromStr for PotentialKind {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lj" | "lennard_jones" => Ok(PotentialKind::LennardJones),
            "mlj" | "modified_lennard_jones" => Ok(PotentialKind::ModifiedLennardJones),
            other => Err(Error::config(format!("unsupported potential '{}'", other))),
        }
    }
}
impl Display for PotentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PotentialKind::LennardJones => f.write_str("LJ"),
            PotentialKind::ModifiedLennardJones => f.write_str("MLJ"),
        }
    }
}

/// Pair potential bound to the parameters of one species
#[derive(Clone, Debug, PartialEq)]
pub enum Potential {
    LennardJones(LennardJones),
    ModifiedLennardJones(ModifiedLennardJones),
}
impl Potential {
    /// Bind the selected potential to the species parameter table
    pub fn for_species<T: AtomType>(kind: PotentialKind, atom_type: &T) -> Result<Self> {
        let lj = LennardJones::new(atom_type.well_depth(), atom_type.sigma())?;
        Ok(match kind {
            PotentialKind::LennardJones => Potential::LennardJones(lj),
            PotentialKind::ModifiedLennardJones => {
                Potential::ModifiedLennardJones(ModifiedLennardJones::from_lj(lj))
            }
        })
    }
    pub fn kind(&self) -> PotentialKind {
        match self {
            Potential::LennardJones(_) => PotentialKind::LennardJones,
            Potential::ModifiedLennardJones(_) => PotentialKind::ModifiedLennardJones,
        }
    }
    pub fn sigma(&self) -> f64 {
        match self {
            Potential::LennardJones(p) => p.sigma(),
            Potential::ModifiedLennardJones(p) => p.sigma(),
        }
    }
}
impl PairPotential for Potential {
    fn force_coefficient(&self, r2: f64) -> Result<f64> {
        match self {
            Potential::LennardJones(p) => p.force_coefficient(r2),
            Potential::ModifiedLennardJones(p) => p.force_coefficient(r2),
        }
    }
    fn potential_energy(&self, r2: f64) -> Result<f64> {
        match self {
            Potential::LennardJones(p) => p.potential_energy(r2),
            Potential::ModifiedLennardJones(p) => p.potential_energy(r2),
        }
    }
    fn cutoff_distance(&self) -> Option<f64> {
        match self {
            Potential::LennardJones(p) => p.cutoff_distance(),
            Potential::ModifiedLennardJones(p) => p.cutoff_distance(),
        }
    }
}
