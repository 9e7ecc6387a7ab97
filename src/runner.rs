use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc,
};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{Error, Result},
    simulation::PULSE_ZEROING_EPS,
    utils::Vector3,
    AtomicModel,
};

/// Velocity rescaling applied while a batch runs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Renormalization {
    /// Target temperature (K)
    pub temperature: f64,
    /// Rescale whenever the model's step count is a multiple of `every`
    pub every: usize,
    /// Tolerance of the momentum zeroing done before the first step (nm/s)
    #[serde(default = "default_pulse_eps")]
    pub pulse_eps: f64,
}
fn default_pulse_eps() -> f64 {
    PULSE_ZEROING_EPS
}

/// Settings of one batch of steps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Time step (s)
    pub time_step: f64,
    pub count_step: usize,
    pub snapshot_step: usize,
    pub msd_step: usize,
    #[serde(default)]
    pub renormalization: Option<Renormalization>,
}
impl RunSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(Error::config(format!(
                "time_step should be positive, found {}",
                self.time_step
            )));
        }
        if self.snapshot_step == 0 || self.msd_step == 0 {
            return Err(Error::config("snapshot_step and msd_step should be positive"));
        }
        if let Some(r) = &self.renormalization {
            if r.every == 0 {
                return Err(Error::config("renormalization.every should be positive"));
            }
            if !(r.temperature >= 0.0 && r.temperature.is_finite()) {
                return Err(Error::config(format!(
                    "renormalization.temperature should be non-negative, found {}",
                    r.temperature
                )));
            }
        }
        Ok(())
    }
}

/// Copy of the model state taken during a batch
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub ke: f64,
    pub pe: f64,
    pub fe: f64,
    pub temperature: f64,
    pub volume: f64,
    pub p1: f64,
    pub positions: Vec<Vector3>,
    /// Radial distribution function as `(r, g(r))` pairs
    pub rdf: Vec<(f64, f64)>,
}
impl Snapshot {
    fn of(model: &AtomicModel, step: usize) -> Result<Self> {
        Ok(Self {
            step,
            ke: model.ke(),
            pe: model.pe(),
            fe: model.fe(),
            temperature: model.temperature(),
            volume: model.volume(),
            p1: model.p1(),
            positions: model.positions(),
            rdf: model.radial_distribution()?,
        })
    }
}

/// Messages sent while a batch runs
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// Percent of the batch completed
    Progress(usize),
    Snapshot(Snapshot),
    Msd { step: usize, value: f64 },
}

/// Energies after one step (eV)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergySample {
    pub step: usize,
    pub ke: f64,
    pub pe: f64,
    pub fe: f64,
}

/// Outcome of a batch
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub steps_completed: usize,
    pub cancelled: bool,
    /// Mean kinetic temperature over completed steps, zero when none completed
    pub average_temperature: f64,
    pub energies: Vec<EnergySample>,
    /// `(step, msd)` samples
    pub msd: Vec<(usize, f64)>,
}

/// Run `settings.count_step` Verlet steps on the calling thread.
///
/// `cancel` is checked between steps; a cancelled batch returns the steps done
/// so far with `cancelled` set. Steps in reports are counted from the batch start.
pub fn run_batch<F>(
    model: &mut AtomicModel,
    settings: &RunSettings,
    cancel: &AtomicBool,
    mut on_report: F,
) -> Result<RunSummary>
where
    F: FnMut(Report),
{
    settings.validate()?;
    model.set_time_step(settings.time_step)?;

    if let Some(r) = &settings.renormalization {
        model.init_velocity_normalization(r.temperature)?;
        model.pulse_zeroing(r.pulse_eps)?;
    }
    model.init_calculation()?;

    info!(
        steps = settings.count_step,
        dt = settings.time_step,
        atoms = model.count_atoms(),
        "Starting batch"
    );

    let mut summary = RunSummary::default();
    let mut temperature_sum = 0.0;
    let mut last_percent = 0;

    for step in 1..=settings.count_step {
        if cancel.load(Ordering::Relaxed) {
            warn!(step, "Batch cancelled");
            summary.cancelled = true;
            break;
        }

        model.verlet()?;
        if let Some(r) = &settings.renormalization {
            if (model.current_step() - 1) % r.every == 0 {
                model.velocity_normalization(r.temperature)?;
            }
        }

        summary.energies.push(EnergySample {
            step,
            ke: model.ke(),
            pe: model.pe(),
            fe: model.fe(),
        });
        temperature_sum += model.temperature();
        summary.steps_completed = step;

        let last = step == settings.count_step;
        if step % settings.snapshot_step == 0 || last {
            on_report(Report::Snapshot(Snapshot::of(model, step)?));
        }
        if step % settings.msd_step == 0 || last {
            let value = model.average_square_offset()?;
            summary.msd.push((step, value));
            on_report(Report::Msd { step, value });
        }

        let percent = step * 100 / settings.count_step;
        if percent > last_percent {
            last_percent = percent;
            on_report(Report::Progress(percent));
        }
    }

    if summary.steps_completed > 0 {
        summary.average_temperature = temperature_sum / summary.steps_completed as f64;
    }
    info!(
        steps = summary.steps_completed,
        cancelled = summary.cancelled,
        average_temperature = summary.average_temperature,
        "Batch finished"
    );
    Ok(summary)
}

/// Batch running on a worker thread, reporting over a channel
pub struct Runner {
    rx: mpsc::Receiver<Report>,
    cancel: Arc<AtomicBool>,
    handle: thread::JoinHandle<Result<(AtomicModel, RunSummary)>>,
}
impl Runner {
    /// Move the model to a worker thread and start the batch
    pub fn spawn(mut model: AtomicModel, settings: RunSettings) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = thread::spawn(move || -> Result<(AtomicModel, RunSummary)> {
            let summary = run_batch(&mut model, &settings, &flag, |report| {
                // the receiver may be gone; the batch still completes
                let _ = tx.send(report);
            })?;
            Ok((model, summary))
        });
        Self { rx, cancel, handle }
    }

    /// Ask the worker to stop after the current step
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
    pub fn reports(&self) -> &mpsc::Receiver<Report> {
        &self.rx
    }

    /// Wait for the worker and take back the model
    pub fn join(self) -> Result<(AtomicModel, RunSummary)> {
        self.handle
            .join()
            .map_err(|_| Error::precondition("Batch worker thread panicked"))?
    }
}
