//! Runs one crawler defense session headlessly and prints its summary.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cavecrawl_app::config;
use cavecrawl_app::demo;
use cavecrawl_app::game_loop::{self, LoopConfig, Session};
use cavecrawl_core::constants::TICK_RATE;
use cavecrawl_core::rules::GameRules;
use cavecrawl_sim::{SimConfig, SimulationEngine};

/// Defend the crawler against the cave's crawlers
#[derive(Parser, Debug)]
#[command(name = "cavecrawl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many seconds of simulated time
    #[arg(short = 't', long, default_value_t = 120)]
    seconds: u64,

    /// Level JSON file (default: built-in demo level)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Rules JSON file; missing fields keep their defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Floor height in pixels for custom levels
    #[arg(long, default_value_t = demo::FLOOR_Y)]
    floor_y: f64,

    /// Rock delivered by the drill per second
    #[arg(long, default_value_t = 1.0)]
    rock_per_second: f64,

    /// Pace the loop to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Tick budget for a run of `seconds` simulated seconds.
fn ticks_for(seconds: u64) -> u64 {
    seconds.saturating_mul(u64::from(TICK_RATE))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let (level, hazard) = match &args.level {
        Some(path) => (config::load_level(path)?, None),
        None => (demo::demo_level(), Some(demo::wheel_zone())),
    };
    let rules = match &args.rules {
        Some(path) => config::load_rules(path)?,
        None => GameRules::default(),
    };

    let engine = SimulationEngine::new(
        SimConfig {
            seed: args.seed,
            rules,
        },
        &level,
    )
    .context("failed to start session")?;
    tracing::info!(seed = args.seed, walls = level.walls.len(), "session started");

    let mut session = Session::new(engine, &level, args.floor_y, hazard);
    let summary = game_loop::run(
        &mut session,
        &LoopConfig {
            max_ticks: ticks_for(args.seconds),
            realtime: args.realtime,
            rock_per_second: args.rock_per_second,
        },
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("phase:           {:?}", summary.phase);
        println!("survived:        {:.1}s", summary.survived_secs);
        println!("crawler health:  {}", summary.crawler_health);
        println!("processed rock:  {:.2}", summary.processed_rock);
        println!(
            "enemies:         {} spawned, {} died",
            summary.enemies_spawned, summary.enemies_died
        );
        println!(
            "walls:           {} destroyed, {} repaired",
            summary.tiles_destroyed, summary.tiles_repaired
        );
        if let Some(score) = summary.final_score {
            println!("final score:     {score}");
        }
    }

    Ok(())
}
