//! mission — command-line runner for the search-and-rescue simulation.
//!
//! Loads a grid world from a directory of CSV files, launches N explorers
//! and M rescuers (the first rescuer is the master), optionally trains the
//! victim predictor on a labelled dataset, runs the mission to completion,
//! writes every artefact to the output directory and prints the summary.
//!
//! ```text
//! cargo run -p mission -- --world demos/mission/data \
//!     --dataset demos/mission/data/training.csv \
//!     --config demos/mission/data/config.json --output out
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::RescuerAssignment;
use sar_core::{AgentProfile, MissionConfig, NeighborPolicy, Tick};
use sar_map::FusionOutcome;
use sar_output::{DirectoryWriter, MissionOutputObserver};
use sar_predict::{VictimPredictor, load_dataset};
use sar_sim::{MissionBuilder, MissionObserver, MissionReport, Phase};
use sar_world::load_world_dir;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Random,
    Rotated,
}

impl From<PolicyArg> for NeighborPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random  => NeighborPolicy::Random,
            PolicyArg::Rotated => NeighborPolicy::RotatedPreference,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mission")]
#[command(about = "Explore a grid, fuse the maps, and rescue the victims found")]
struct Cli {
    /// Directory holding world.csv, and optionally cells.csv and victims.csv
    #[arg(long, short)]
    world: PathBuf,

    /// Labelled training data (features..., tri, sobr) for the victim predictor
    #[arg(long, short)]
    dataset: Option<PathBuf>,

    /// JSON mission config; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Number of exploration agents
    #[arg(long, default_value = "3")]
    explorers: usize,

    /// Number of rescue agents (one master plus workers)
    #[arg(long, default_value = "2")]
    rescuers: usize,

    /// Time budget of every explorer
    #[arg(long, default_value = "400")]
    explorer_time: f64,

    /// Time budget of every rescuer
    #[arg(long, default_value = "600")]
    rescuer_time: f64,

    /// Number of victim clusters
    #[arg(long)]
    clusters: Option<usize>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How explorers pick among unvisited neighbours
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Fuse maps of explorers that ran out of time
    #[arg(long)]
    fuse_dead: bool,

    /// Output directory for maps, cluster files and summaries
    #[arg(long, short, default_value = "output")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    fn mission_config(&self) -> Result<MissionConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => MissionConfig::default(),
        };
        if let Some(clusters) = self.clusters {
            config.clusters = clusters;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(policy) = self.policy {
            config.neighbor_policy = policy.into();
        }
        if self.fuse_dead {
            config.fuse_dead_reports = true;
        }
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<MissionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs phase progress and forwards every hook to the output observer.
struct ProgressObserver<O: MissionObserver> {
    inner:   O,
    started: Instant,
    ticks:   u64,
}

impl<O: MissionObserver> ProgressObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, started: Instant::now(), ticks: 0 }
    }
}

impl<O: MissionObserver> MissionObserver for ProgressObserver<O> {
    fn on_phase_start(&mut self, phase: Phase) {
        info!(%phase, "phase started");
        self.inner.on_phase_start(phase);
    }

    fn on_tick_end(&mut self, phase: Phase, tick: Tick, stepped: usize) {
        self.ticks += 1;
        self.inner.on_tick_end(phase, tick, stepped);
    }

    fn on_phase_end(&mut self, phase: Phase, ticks: u64) {
        info!(%phase, ticks, elapsed_ms = self.started.elapsed().as_millis() as u64, "phase finished");
        self.inner.on_phase_end(phase, ticks);
    }

    fn on_explorer_report(&mut self, report: &ExplorerReport) {
        self.inner.on_explorer_report(report);
    }

    fn on_fusion(&mut self, fusion: &FusionOutcome) {
        info!(
            victims  = fusion.metrics.unique_victims,
            coverage = fusion.metrics.coverage,
            "maps fused"
        );
        self.inner.on_fusion(fusion);
    }

    fn on_assignments(&mut self, assignments: &[RescuerAssignment]) {
        self.inner.on_assignments(assignments);
    }

    fn on_rescue_report(&mut self, report: &RescueReport) {
        self.inner.on_rescue_report(report);
    }

    fn on_mission_end(&mut self, report: &MissionReport) {
        self.inner.on_mission_end(report);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    if cli.rescuers == 0 {
        bail!("at least one rescuer is required");
    }
    let config = cli.mission_config()?;
    info!(?config, "mission config");

    // 1. World.
    let world = load_world_dir(&cli.world)
        .with_context(|| format!("loading world from {}", cli.world.display()))?;

    // 2. Mission: explorers first, then the master and its workers.
    let mut builder = MissionBuilder::new(config.clone(), world)
        .explorers(cli.explorers, AgentProfile::new("explorer", cli.explorer_time))
        .rescuer(AgentProfile::new("master", cli.rescuer_time));
    for i in 1..cli.rescuers {
        builder = builder.rescuer(AgentProfile::new(format!("worker-{i}"), cli.rescuer_time));
    }

    // 3. Optional predictor.
    if let Some(path) = &cli.dataset {
        let dataset = load_dataset(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        let predictor = VictimPredictor::train(&dataset, config.knn_k, config.seed)?;
        builder = builder.predictor(predictor);
    }

    let mut mission = builder.build()?;

    // 4. Run with file output.
    let writer = DirectoryWriter::new(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;
    let mut observer = ProgressObserver::new(MissionOutputObserver::new(writer));
    let report = mission.run(&mut observer)?;

    println!("{report}");
    println!("Run time: {:.2?}  |  scheduler ticks: {}", observer.started.elapsed(), observer.ticks);

    if let Some(e) = observer.inner.take_error() {
        return Err(e).context("writing mission output");
    }
    println!("Output written to {}", observer.inner.writer().dir().display());
    Ok(())
}
