//! YAML run files
//!
//! ```yaml
//! model:
//!   size: 3
//!   species: Ar
//!   lattice: fcc
//!   potential: lj
//!   seed: 42
//!   displacement: 0.01
//! run:
//!   time_step: 2.0e-15
//!   count_step: 1000
//!   snapshot_step: 100
//!   msd_step: 50
//!   renormalization:
//!     temperature: 80.0
//!     every: 10
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    atom_type::Species,
    atomic::PotentialKind,
    compute::AcfSettings,
    error::{Error, Result},
    lattice::LatticeType,
    runner::RunSettings,
    AtomicModel,
};

/// Model construction parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Unit cells per axis
    pub size: usize,
    pub species: Species,
    pub lattice: LatticeType,
    pub potential: PotentialKind,
    /// Seed of the model random generator; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Random displacement amplitude in units of the lattice constant
    #[serde(default)]
    pub displacement: Option<f64>,
    #[serde(default)]
    pub acf: AcfSettings,
}
impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::config("model.size should be at least 1"));
        }
        if let Some(k) = self.displacement {
            if !(k >= 0.0 && k.is_finite()) {
                return Err(Error::config(format!(
                    "model.displacement should be non-negative, found {}",
                    k
                )));
            }
        }
        self.acf.validate()
    }

    /// Build the model, applying the configured displacement
    pub fn build(&self) -> Result<AtomicModel> {
        self.validate()?;
        let mut model = match self.seed {
            Some(seed) => AtomicModel::with_seed(
                self.size,
                self.species,
                self.lattice,
                self.potential,
                seed,
            )?,
            None => AtomicModel::new(self.size, self.species, self.lattice, self.potential)?,
        };
        model.set_acf_settings(self.acf)?;
        if let Some(k) = self.displacement {
            model.atoms_displacement(k)?;
            model.init_calculation()?;
        }
        Ok(model)
    }
}

/// Complete run file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub run: RunSettings,
}
impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Unable to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Read configuration file");
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self)
            .map_err(|e| Error::config(format!("Failed to write configuration: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.run.validate()
    }
}
