//! flock-run — headless predator/prey run.
//!
//! Seeds a prey flock and a column of predators, runs the simulation to
//! `max_time` and prints one line:
//!
//! ```text
//! steps prey_alive predators elapsed_time
//! ```
//!
//! Parameters come from an optional JSON file (`--config`); individual flags
//! override it.  Set `RUST_LOG=debug` to see catches and state changes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::info;

use flock_agent::{BoidParams, Predator};
use flock_behavior::{HuntConfig, PredatorStrategy, PreyConfig, WeightedPreyBehavior};
use flock_core::{SimConfig, SimRng, ensure_in_range};
use flock_output::{CsvWriter, SimOutputObserver};
use flock_sim::{
    SimBuilder, Telemetry, seed_predator_column, seed_prey_grid, seed_prey_scatter,
};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_N_PREY:        u32 = 200;
const DEFAULT_N_PREDATORS:   u32 = 3;
const DEFAULT_REST_DURATION: f64 = 1.0;

// ── Run configuration ─────────────────────────────────────────────────────────

/// Initial prey placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
enum Layout {
    #[default]
    Grid,
    Scatter,
}

/// Everything needed for one run, as loaded from `--config`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct RunConfig {
    sim:             SimConfig,
    prey:            PreyConfig,
    hunt:            HuntConfig,
    prey_params:     BoidParams,
    predator_params: BoidParams,
    strategy:        PredatorStrategy,
    layout:          Layout,
    n_prey:          u32,
    n_predators:     u32,
    rest_duration:   f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim:             SimConfig::default(),
            prey:            PreyConfig::default(),
            hunt:            HuntConfig::default(),
            prey_params:     BoidParams::prey(),
            predator_params: BoidParams::predator(),
            strategy:        PredatorStrategy::default(),
            layout:          Layout::default(),
            n_prey:          DEFAULT_N_PREY,
            n_predators:     DEFAULT_N_PREDATORS,
            rest_duration:   DEFAULT_REST_DURATION,
        }
    }
}

impl RunConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Checks not covered by the engine and behavior constructors.
    /// A zero rest returns the predator to SCOUT on its next hunting update.
    fn validate(&self) -> Result<()> {
        ensure_in_range("rest_duration", self.rest_duration, 0.0, f64::MAX)?;
        Ok(())
    }
}

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flock-run", version, about = "Run a headless predator/prey flocking simulation")]
struct Cli {
    /// JSON run configuration; flags below override its values.
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Directory for step_summaries.csv and agent_snapshots.csv.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    #[arg(long)]
    n_prey: Option<u32>,

    #[arg(long)]
    n_predators: Option<u32>,

    /// nearest, centroid, random or peripheral.
    #[arg(long)]
    predator_strategy: Option<PredatorStrategy>,

    #[arg(long)]
    separation_coef: Option<f64>,

    #[arg(long)]
    cohesion_coef: Option<f64>,

    #[arg(long)]
    alignment_coef: Option<f64>,

    #[arg(long)]
    dodge_coef: Option<f64>,

    #[arg(long)]
    repel_coef: Option<f64>,

    #[arg(long)]
    wiggle_coef: Option<f64>,

    /// Simulated seconds to run.
    #[arg(long)]
    max_time: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    layout: Option<Layout>,
}

impl Cli {
    /// Apply every flag that was given on top of `config`.
    fn apply(&self, config: &mut RunConfig) {
        fn set<T: Copy>(slot: &mut T, flag: Option<T>) {
            if let Some(v) = flag {
                *slot = v;
            }
        }

        set(&mut config.n_prey, self.n_prey);
        set(&mut config.n_predators, self.n_predators);
        set(&mut config.strategy, self.predator_strategy);
        set(&mut config.layout, self.layout);
        set(&mut config.sim.max_time, self.max_time);
        set(&mut config.sim.seed, self.seed);
        set(&mut config.prey.separation_coef, self.separation_coef);
        set(&mut config.prey.cohesion_coef, self.cohesion_coef);
        set(&mut config.prey.alignment_coef, self.alignment_coef);
        set(&mut config.prey.dodge_coef, self.dodge_coef);
        set(&mut config.prey.repel_coef, self.repel_coef);
        set(&mut config.prey.wiggle_coef, self.wiggle_coef);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let sim_config = config.sim.clone();
    let world = &sim_config.world;

    // 1. Populations.
    let prey = match config.layout {
        Layout::Grid => seed_prey_grid(config.n_prey, world, &config.prey_params)?,
        Layout::Scatter => {
            let mut rng = SimRng::new(sim_config.seed);
            seed_prey_scatter(config.n_prey, world, &config.prey_params, &mut rng)?
        }
    };
    let predators: Vec<Predator> =
        seed_predator_column(config.n_predators, world, &config.predator_params, sim_config.seed)?
            .into_iter()
            .map(|p| p.with_rest_duration(config.rest_duration))
            .collect();

    // 2. Engine.
    let mut sim = SimBuilder::new(
        sim_config.clone(),
        WeightedPreyBehavior::new(config.prey.clone())?,
        config.strategy.build(config.hunt.clone())?,
    )
    .prey(prey)
    .predators(predators)
    .build()?;

    info!(
        n_prey      = config.n_prey,
        n_predators = config.n_predators,
        strategy    = %config.strategy,
        layout      = ?config.layout,
        seed        = sim_config.seed,
        "run configured",
    );

    // 3. Output.
    let output = match &cli.output {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            Some(SimOutputObserver::new(CsvWriter::new(dir)?))
        }
        None => None,
    };

    // 4. Run.
    let mut obs = (Telemetry::new(), output);
    sim.run(sim_config.max_time, &mut obs)?;

    let (telemetry, output) = &mut obs;
    if let Some(e) = output.as_mut().and_then(|o| o.take_error()) {
        bail!("output error: {e}");
    }
    info!(
        caught = telemetry.total_caught(),
        turns  = telemetry.turns().len(),
        "run complete",
    );

    println!(
        "{} {} {} {}",
        sim.step().0,
        sim.prey().len(),
        sim.predators().len(),
        sim.time(),
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
