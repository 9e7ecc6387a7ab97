use super::{Lattice, LatticeType};
use crate::{
    error::{Error, Result},
    utils::Vector3,
};

/// Cubic lattice with an arbitrary basis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cubic {
    a: f64,
    lattice_type: LatticeType,
}
impl Cubic {
    pub fn new(a: f64, lattice_type: LatticeType) -> Result<Self> {
        if !(a > 0.0 && a.is_finite()) {
            return Err(Error::config(format!(
                "Lattice constant should be positive, found {}",
                a
            )));
        }
        Ok(Self { a, lattice_type })
    }
    pub fn lattice_constant(&self) -> f64 {
        self.a
    }
    pub fn lattice_type(&self) -> LatticeType {
        self.lattice_type
    }
}
impl Lattice for Cubic {
    /// Ids are `n_basis * (size * (size * i + j) + k) + b + 1` for cell `(i, j, k)` and basis atom `b`
    fn sites(&self, size: usize) -> Vec<(usize, Vector3)> {
        let basis = self.lattice_type.basis();
        let nbasis = basis.len();
        let mut sites = Vec::with_capacity(nbasis * size * size * size);

        for i in 0..size {
            for j in 0..size {
                for k in 0..size {
                    let cell = nbasis * (size * (size * i + j) + k);
                    for (b, offset) in basis.iter().enumerate() {
                        let pos = Vector3::new(
                            (i as f64 + offset[0]) * self.a,
                            (j as f64 + offset[1]) * self.a,
                            (k as f64 + offset[2]) * self.a,
                        );
                        sites.push((cell + b + 1, pos));
                    }
                }
            }
        }
        sites
    }
}
