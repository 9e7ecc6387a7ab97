pub use super::atom_type::{AtomType, Species};
pub use super::atomic::{PairPotential, PotentialKind};
pub use super::compute::{AcfSettings, Compute};
pub use super::config::Config;
pub use super::container::Container;
pub use super::error::{Error, Result};
pub use super::lattice::{Lattice, LatticeType};
pub use super::output::Output;
pub use super::runner::{run_batch, Report, Renormalization, RunSettings, Runner};
pub use super::simulation::{AtomicModel, PULSE_ZEROING_EPS};
pub use super::utils::Vector3;
