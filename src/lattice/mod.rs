mod cubic;

pub use cubic::Cubic;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, utils::Vector3};

/// Crystal structure of the initial configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatticeType {
    #[serde(rename = "sc")]
    SimpleCubic,
    #[serde(rename = "bcc")]
    BodyCentered,
    #[serde(rename = "fcc")]
    FaceCentered,
    #[serde(rename = "diamond")]
    Diamond,
}
impl LatticeType {
    pub const ALL: [LatticeType; 4] = [
        LatticeType::SimpleCubic,
        LatticeType::BodyCentered,
        LatticeType::FaceCentered,
        LatticeType::Diamond,
    ];

    /// Fractional coordinates of the basis atoms within one unit cell
    pub fn basis(&self) -> &'static [[f64; 3]] {
        const SC: [[f64; 3]; 1] = [[0.0, 0.0, 0.0]];
        const BCC: [[f64; 3]; 2] = [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        const FCC: [[f64; 3]; 4] = [
            [0.0, 0.0, 0.0],
            [0.5, 0.0, 0.5],
            [0.0, 0.5, 0.5],
            [0.5, 0.5, 0.0],
        ];
        const DIAMOND: [[f64; 3]; 8] = [
            [0.0, 0.0, 0.0],
            [0.5, 0.0, 0.5],
            [0.0, 0.5, 0.5],
            [0.5, 0.5, 0.0],
            [0.25, 0.25, 0.25],
            [0.25, 0.75, 0.75],
            [0.75, 0.25, 0.75],
            [0.75, 0.75, 0.25],
        ];
        match self {
            LatticeType::SimpleCubic => &SC,
            LatticeType::BodyCentered => &BCC,
            LatticeType::FaceCentered => &FCC,
            LatticeType::Diamond => &DIAMOND,
        }
    }
}
impl FromStr for LatticeType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sc" => Ok(LatticeType::SimpleCubic),
            "bcc" => Ok(LatticeType::BodyCentered),
            "fcc" => Ok(LatticeType::FaceCentered),
            "diamond" => Ok(LatticeType::Diamond),
            other => Err(Error::config(format!("unsupported lattice '{}'", other))),
        }
    }
}
impl Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LatticeType::SimpleCubic => "SC",
            LatticeType::BodyCentered => "BCC",
            LatticeType::FaceCentered => "FCC",
            LatticeType::Diamond => "Diamond",
        };
        f.write_str(name)
    }
}

pub trait Lattice {
    /// Sites of a `size`^3 block of unit cells anchored at the origin, as `(id, position)`
    fn sites(&self, size: usize) -> Vec<(usize, Vector3)>;
}
