//! Command-line driver: build a crystal from a YAML run file and step it on a
//! worker thread, printing the information table as snapshots arrive.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use crystmd::{
    compute::to_bar,
    output::Output,
    runner::{Renormalization, Report, Runner},
    Config,
};

#[derive(Parser, Debug)]
#[command(name = "crystmd")]
#[command(about = "Molecular dynamics of crystalline solids", long_about = None)]
struct Args {
    /// Path to the YAML run file
    #[arg(short, long, default_value = "demos/argon_fcc.yaml")]
    config_file: String,

    /// Unit cells per axis (overrides config file)
    #[arg(long)]
    size: Option<usize>,

    /// Species: Ar, Cu, Fe, Au, Si, Ge (overrides config file)
    #[arg(long)]
    species: Option<String>,

    /// Lattice: sc, bcc, fcc, diamond (overrides config file)
    #[arg(long)]
    lattice: Option<String>,

    /// Potential: lj, mlj (overrides config file)
    #[arg(long)]
    potential: Option<String>,

    /// Random seed (overrides config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps (overrides config file)
    #[arg(long)]
    steps: Option<usize>,

    /// Time step in seconds (overrides config file)
    #[arg(long)]
    time_step: Option<f64>,

    /// Thermostat temperature in K, rescaling every 10 steps unless configured
    #[arg(long)]
    temperature: Option<f64>,
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(size) = args.size {
        config.model.size = size;
    }
    if let Some(species) = &args.species {
        config.model.species = species.parse()?;
    }
    if let Some(lattice) = &args.lattice {
        config.model.lattice = lattice.parse()?;
    }
    if let Some(potential) = &args.potential {
        config.model.potential = potential.parse()?;
    }
    if args.seed.is_some() {
        config.model.seed = args.seed;
    }
    if let Some(steps) = args.steps {
        config.run.count_step = steps;
    }
    if let Some(dt) = args.time_step {
        config.run.time_step = dt;
    }
    if let Some(temperature) = args.temperature {
        let renormalization = config.run.renormalization.get_or_insert(Renormalization {
            temperature,
            every: 10,
            pulse_eps: crystmd::simulation::PULSE_ZEROING_EPS,
        });
        renormalization.temperature = temperature;
    }
    config.validate()?;
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Reading configuration from: {}", args.config_file);
    let mut config = Config::from_file(&args.config_file)
        .wrap_err_with(|| format!("Unable to load run file {}", args.config_file))?;
    apply_overrides(&mut config, &args)?;

    let model = config.model.build().wrap_err("Failed to build model")?;
    let output = Output::default();
    println!("{}", output.header());
    println!("{}", output.row(0, &model)?);

    let runner = Runner::spawn(model, config.run);
    let mut rdf = Vec::new();
    for report in runner.reports() {
        match report {
            Report::Snapshot(snapshot) => {
                println!("{}", output.snapshot_row(&snapshot));
                rdf = snapshot.rdf;
            }
            Report::Msd { step, value } => info!(step, msd = value, "Mean square displacement"),
            Report::Progress(percent) if percent % 10 == 0 => info!("{}% complete", percent),
            Report::Progress(_) => {}
        }
    }
    let (model, summary) = runner.join()?;

    let p2 = model.p2()?;
    info!(
        steps = summary.steps_completed,
        average_temperature = summary.average_temperature,
        "Run complete"
    );
    println!();
    println!("Average temperature: {:.3} K", summary.average_temperature);
    println!(
        "P1: {:.6e} eV/nm^3 ({:.3} bar)",
        model.p1(),
        to_bar(model.p1())
    );
    println!("P2: {:.6e} eV/nm^3 ({:.3} bar)", p2, to_bar(p2));
    if let Some((_, msd)) = summary.msd.last() {
        println!("MSD: {:.6e} nm^2", msd);
    }
    if let Some((r, g)) = rdf.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)) {
        println!("RDF peak: g({:.4} nm) = {:.3}", r, g);
    }
    Ok(())
}
