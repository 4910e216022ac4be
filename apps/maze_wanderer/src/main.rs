use anyhow::Context;
use clap::Parser;
use maze_wanderer::{MazeSimNode, WanderConfig, WandererNode};
use std::path::PathBuf;
use zigzag::prelude::*;

/// Bump-and-turn maze wandering robot
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Control loop rate in Hz
    #[arg(long)]
    rate_hz: Option<f64>,

    /// Suppress per-message topic logging
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WanderConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => WanderConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rate_hz) = args.rate_hz {
        config.rate_hz = rate_hz;
    }

    println!("=== Maze Wanderer ===");
    println!(
        "goal region: x [{:.2}, {:.2}], y [{:.2}, {:.2}]",
        config.goal.x_min, config.goal.x_max, config.goal.y_min, config.goal.y_max
    );
    println!("control rate: {:.1} Hz", config.rate_hz);
    println!("=====================\n");

    let mut sched = Scheduler::new()
        .with_name("MazeWandererScheduler")
        .with_rate_hz(config.rate_hz);

    let sim_node = MazeSimNode::new(&config)?;
    let mut wanderer_node = WandererNode::new(&config)?;
    wanderer_node.attach_scheduler(sched.handle());

    // The environment ticks before the controller so each decision sees
    // this tick's sensor data.
    sched.add(Box::new(sim_node), 0, Some(!args.quiet));
    sched.add(Box::new(wanderer_node), 1, Some(!args.quiet));

    sched.run()?;
    Ok(())
}
