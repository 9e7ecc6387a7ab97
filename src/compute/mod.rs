mod energy;
mod mean_square_displacement;
mod pressure;
mod radial_distribution;
mod temperature;
mod velocity_autocorrelation;

pub use energy::kinetic_energy;
pub use mean_square_displacement::mean_square_displacement;
pub use pressure::{flux_pressure, to_bar, virial_pressure};
pub use radial_distribution::{radial_distribution, BIN_FRACTION};
pub use temperature::temperature;
pub use velocity_autocorrelation::{autocorrelation, AcfSettings};

use crate::{error::Result, AtomicModel};

/// Scalar observables of a model, as shown in the information table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compute {
    KineticEnergy,
    PotentialEnergy,
    TotalEnergy,
    Temperature,
    Volume,
    VirialPressure,
    FluxPressure,
}
impl Compute {
    pub const ALL: [Compute; 7] = [
        Compute::KineticEnergy,
        Compute::PotentialEnergy,
        Compute::TotalEnergy,
        Compute::Temperature,
        Compute::Volume,
        Compute::VirialPressure,
        Compute::FluxPressure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Compute::KineticEnergy => "KE",
            Compute::PotentialEnergy => "PE",
            Compute::TotalEnergy => "FE",
            Compute::Temperature => "T",
            Compute::Volume => "V",
            Compute::VirialPressure => "P1",
            Compute::FluxPressure => "P2",
        }
    }

    pub fn compute(&self, model: &AtomicModel) -> Result<f64> {
        Ok(match self {
            Compute::KineticEnergy => model.ke(),
            Compute::PotentialEnergy => model.pe(),
            Compute::TotalEnergy => model.fe(),
            Compute::Temperature => model.temperature(),
            Compute::Volume => model.volume(),
            Compute::VirialPressure => model.p1(),
            Compute::FluxPressure => model.p2()?,
        })
    }
}
