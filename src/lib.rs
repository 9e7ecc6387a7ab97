pub mod atom_type;
pub mod atomic;
pub mod atoms;
pub mod compute;
pub mod config;
pub mod constants;
pub mod container;
pub mod error;
pub mod integrators;
pub mod lattice;
pub mod output;
pub mod prelude;
pub mod runner;
pub mod simulation;
pub mod utils;

pub use atom_type::{AtomType, Species};
pub use atomic::{PairPotential, Potential, PotentialKind};
pub use atoms::{Atom, Atoms};
pub use compute::{AcfSettings, Compute};
pub use config::{Config, ModelConfig};
pub use container::Container;
pub use error::{Error, Result};
pub use lattice::LatticeType;
pub use runner::{run_batch, Report, RunSettings, RunSummary, Runner};
pub use simulation::AtomicModel;
pub use utils::{Axis, Vector3};
