//! Headless frame runner for scenario files.
//!
//! Loads `config.toml`, the scenario's map and the scenario itself from a data
//! directory, then steps the world and prints what happened each frame.
//!
//! ```bash
//! cargo run -p arpg-sim -- --data-dir data ambush --frames 120
//! RUST_LOG=arpg_runtime=debug cargo run -p arpg-sim -- ambush
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use arpg_content::ContentFactory;
use arpg_runtime::{CommandOutcome, FrameReport, Scenario, World};
use clap::Parser;

/// Run a scenario for a number of frames
#[derive(Parser)]
#[command(name = "arpg-sim")]
#[command(about = "Step a scenario and print frame reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario name under `scenarios/` (without extension)
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Data directory holding config.toml, maps/ and scenarios/
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 60)]
    frames: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per frame with something to report
    Summary,
    /// Only the final switches and variables, as JSON
    Json,
    /// Every frame report in debug format
    Debug,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let mut world = load_world(&cli)?;

    for _ in 0..cli.frames {
        let report = world.step();
        match cli.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Debug => println!("{report:#?}"),
            OutputFormat::Json => {}
        }
    }

    match cli.format {
        OutputFormat::Json => {
            let slots = serde_json::to_string_pretty(world.slots())
                .context("Failed to serialize result slots")?;
            println!("{slots}");
        }
        OutputFormat::Summary | OutputFormat::Debug => print_slots(&world),
    }
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_world(cli: &Cli) -> Result<World> {
    let factory = ContentFactory::new(&cli.data_dir);
    let config = factory
        .load_config()
        .with_context(|| format!("Failed to load config from {}", cli.data_dir.display()))?;

    let scenario_path = factory.scenario_path(&cli.scenario);
    let scenario = Scenario::load_from_file(&scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;

    let map = factory
        .load_map(&scenario.map_id)
        .with_context(|| format!("Failed to load map '{}'", scenario.map_id))?;

    let world = scenario.create_world(map, config)?;
    tracing::info!(
        scenario = %cli.scenario,
        characters = world.len(),
        frames = cli.frames,
        "scenario loaded"
    );
    Ok(world)
}

fn print_summary(report: &FrameReport) {
    let mut parts = Vec::new();
    for (id, layer) in &report.layer_changes {
        parts.push(format!("{id} -> {layer}"));
    }
    for (id, key) in &report.finished_timers {
        parts.push(format!("{id} timer '{key}' done"));
    }
    for (agent, outcome) in &report.commands {
        match outcome {
            CommandOutcome::Throttled | CommandOutcome::Ignored => {}
            CommandOutcome::Searched(search) if search.found => parts.push(format!(
                "{agent} found kind {} event {} at {:.1}",
                search.kind_code, search.event_id, search.distance
            )),
            CommandOutcome::Searched(_) => parts.push(format!("{agent} found nothing")),
            CommandOutcome::Found(Some(event)) => {
                parts.push(format!("{agent} tagged event {event}"));
            }
            CommandOutcome::Found(None) => parts.push(format!("{agent} no tagged event")),
            CommandOutcome::Checked(met) => parts.push(format!("{agent} check {met}")),
            CommandOutcome::TimerStarted { key, frames } => {
                parts.push(format!("{agent} timer '{key}' {frames}f"));
            }
            CommandOutcome::TimerCooling { .. } => {}
            CommandOutcome::StateChanged {
                target,
                state,
                applied,
            } => parts.push(format!("{agent} state {state} on {target}: {applied}")),
        }
    }
    if report.failures > 0 {
        parts.push(format!("{} failed", report.failures));
    }

    if !parts.is_empty() {
        println!("[{:>5}] {}", report.frame, parts.join("; "));
    }
}

fn print_slots(world: &World) {
    println!("switches:");
    for (id, value) in world.slots().switches() {
        println!("  {id:>4} = {value}");
    }
    println!("variables:");
    for (id, value) in world.slots().variables() {
        println!("  {id:>4} = {value}");
    }
}
