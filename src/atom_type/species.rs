use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::AtomType;
use crate::{constants::AMU, Error};

/// Supported atom species
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Ar,
    Cu,
    Fe,
    Au,
    Si,
    Ge,
}

struct SpeciesParams {
    lattice_constant: f64,
    atomic_weight: f64,
    well_depth: f64,
    sigma: f64,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Ar,
        Species::Cu,
        Species::Fe,
        Species::Au,
        Species::Si,
        Species::Ge,
    ];

    fn params(&self) -> SpeciesParams {
        match self {
            Species::Ar => SpeciesParams {
                lattice_constant: 0.526,
                atomic_weight: 39.948,
                well_depth: 0.01029,
                sigma: 0.3408,
            },
            Species::Cu => SpeciesParams {
                lattice_constant: 0.3615,
                atomic_weight: 63.546,
                well_depth: 0.00102,
                sigma: 0.34635,
            },
            Species::Fe => SpeciesParams {
                lattice_constant: 0.2866,
                atomic_weight: 55.845,
                well_depth: 0.00172,
                sigma: 0.25,
            },
            Species::Au => SpeciesParams {
                lattice_constant: 0.40781,
                atomic_weight: 196.966,
                well_depth: 0.00198,
                sigma: 0.288,
            },
            Species::Si => SpeciesParams {
                lattice_constant: 0.54307,
                atomic_weight: 28.086,
                well_depth: 0.00916,
                sigma: 0.372,
            },
            Species::Ge => SpeciesParams {
                lattice_constant: 0.566,
                atomic_weight: 72.63,
                well_depth: 0.0053,
                sigma: 0.378,
            },
        }
    }
}

impl AtomType for Species {
    fn mass(&self) -> f64 {
        self.params().atomic_weight * AMU
    }
    fn lattice_constant(&self) -> f64 {
        self.params().lattice_constant
    }
    fn well_depth(&self) -> f64 {
        self.params().well_depth
    }
    fn sigma(&self) -> f64 {
        self.params().sigma
    }
}

impl FromStr for Species {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unsupported species '{}'", s)))
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Species::Ar => "Ar",
            Species::Cu => "Cu",
            Species::Fe => "Fe",
            Species::Au => "Au",
            Species::Si => "Si",
            Species::Ge => "Ge",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total_and_positive() {
        for species in Species::ALL {
            assert!(species.mass() > 0.0);
            assert!(species.lattice_constant() > 0.0);
            assert!(species.well_depth() > 0.0);
            assert!(species.sigma() > 0.0);
        }
    }

    #[test]
    fn parse_species() {
        assert_eq!("ar".parse::<Species>(), Ok(Species::Ar));
        assert_eq!(" Ge ".parse::<Species>(), Ok(Species::Ge));
        assert!(matches!(
            "Xe".parse::<Species>(),
            Err(Error::Configuration(_))
        ));
    }
}
