use std::fmt::Display;

use crate::{compute::Compute, error::Result, runner::Snapshot, AtomicModel};

/// One column of the information table
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputSpec {
    Step,
    Compute(Compute),
}
impl Display for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputSpec::Step => "step",
            OutputSpec::Compute(c) => c.name(),
        };
        write!(f, "{:>14}", s)
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Usize(usize),
    Float(f64),
}
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Usize(v) => write!(f, "{:>14}", v),
            Value::Float(v) => write!(f, "{:>14.6e}", v),
        }
    }
}

/// Fixed-width table of model observables
#[derive(Clone, Debug)]
pub struct Output {
    pub values: Vec<OutputSpec>,
}
impl Default for Output {
    /// step, KE, PE, FE, T, V, P1
    fn default() -> Self {
        Self {
            values: vec![
                OutputSpec::Step,
                OutputSpec::Compute(Compute::KineticEnergy),
                OutputSpec::Compute(Compute::PotentialEnergy),
                OutputSpec::Compute(Compute::TotalEnergy),
                OutputSpec::Compute(Compute::Temperature),
                OutputSpec::Compute(Compute::Volume),
                OutputSpec::Compute(Compute::VirialPressure),
            ],
        }
    }
}
impl Output {
    pub fn new(values: Vec<OutputSpec>) -> Self {
        Self { values }
    }
    pub fn header(&self) -> String {
        self.values.iter().map(|v| v.to_string()).collect()
    }

    /// Row computed from the live model
    pub fn row(&self, step: usize, model: &AtomicModel) -> Result<String> {
        let mut line = String::new();
        for spec in &self.values {
            let value = match spec {
                OutputSpec::Step => Value::Usize(step),
                OutputSpec::Compute(c) => Value::Float(c.compute(model)?),
            };
            line.push_str(&value.to_string());
        }
        Ok(line)
    }

    /// Row from a batch snapshot; columns a snapshot does not carry are left blank
    pub fn snapshot_row(&self, snapshot: &Snapshot) -> String {
        self.values
            .iter()
            .map(|spec| {
                let value = match spec {
                    OutputSpec::Step => Some(Value::Usize(snapshot.step)),
                    OutputSpec::Compute(c) => match c {
                        Compute::KineticEnergy => Some(snapshot.ke),
                        Compute::PotentialEnergy => Some(snapshot.pe),
                        Compute::TotalEnergy => Some(snapshot.fe),
                        Compute::Temperature => Some(snapshot.temperature),
                        Compute::Volume => Some(snapshot.volume),
                        Compute::VirialPressure => Some(snapshot.p1),
                        Compute::FluxPressure => None,
                    }
                    .map(Value::Float),
                };
                value.map_or_else(|| format!("{:>14}", "-"), |v| v.to_string())
            })
            .collect()
    }
}
