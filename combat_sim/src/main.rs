//! combat_sim - Headless duel runner for the combat engine
//!
//! Loads a combat config and a duel scenario, resolves every scripted hit with
//! a seeded RNG and prints the totals.

mod scenario;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::config::{default_config, load_combat_config};
use combat_core::CombatEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scenario::Scenario;
use simulation::DuelSimulation;
use std::path::PathBuf;

/// Run a duel scenario through the combat engine
#[derive(Parser)]
#[command(name = "combat_sim")]
#[command(about = "Headless duel simulator for the combat engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Combat config TOML (defaults to the bundled config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Duel scenario TOML
    #[arg(short, long, default_value = "combat_sim/scenarios/duel.toml")]
    scenario: PathBuf,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the scenario's hit count
    #[arg(long)]
    hits: Option<u32>,

    /// Print the report as JSON, including per-hit outcomes
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_combat_config(path)
            .with_context(|| format!("loading combat config from {}", path.display()))?,
        None => default_config(),
    };
    let mut engine = CombatEngine::new(config).context("combat config failed validation")?;

    let mut scenario = Scenario::load(&cli.scenario)
        .with_context(|| format!("loading scenario from {}", cli.scenario.display()))?;
    if let Some(hits) = cli.hits {
        scenario.attack.hits = hits;
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(scenario = %scenario.name, seed, hits = scenario.attack.hits, "starting duel");

    let report = DuelSimulation::run(&mut engine, &scenario, cli.json, &mut rng);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }

    Ok(())
}
