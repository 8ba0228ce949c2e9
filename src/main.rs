//! Stack Robots - Entry Point
//!
//! Drives a storage simulation: steps while loose boxes remain (within a
//! tick and wall-clock budget), runs the forced collection pass, then
//! prints the run summary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stack_robots::core::config::{CapacityPolicy, MovementStrategy, StorageConfig};
use stack_robots::core::error::Result;
use stack_robots::simulation::StorageSimulation;
use tracing_subscriber::EnvFilter;

/// Warehouse robots consolidating scattered boxes into stacks
#[derive(Parser, Debug)]
#[command(name = "stack_robots")]
#[command(about = "Simulate robots collecting loose boxes into stacks")]
struct Args {
    /// TOML config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Floor width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Floor height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Loose boxes scattered at start
    #[arg(long)]
    boxes: Option<u32>,

    /// Number of robots
    #[arg(long)]
    robots: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Movement strategy: random-walk or targeted-search
    #[arg(long)]
    strategy: Option<MovementStrategy>,

    /// Fixed per-robot capacity instead of the derived one
    #[arg(long)]
    capacity: Option<u32>,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

impl Args {
    fn to_config(&self) -> Result<StorageConfig> {
        let mut config = match &self.config {
            Some(path) => StorageConfig::load(path)?,
            None => StorageConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(boxes) = self.boxes {
            config.total_boxes = boxes;
        }
        if let Some(robots) = self.robots {
            config.robot_count = robots;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(strategy) = self.strategy {
            config.movement = strategy;
        }
        if let Some(capacity) = self.capacity {
            config.capacity = CapacityPolicy::Fixed(capacity);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stack_robots=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let mut sim = StorageSimulation::with_config(config)?;
    let budget = args.time_budget_ms.map(Duration::from_millis);
    let summary = sim.run_with_budget(args.max_ticks, budget)?;

    match args.format.as_str() {
        "text" => {
            println!("{}", summary.summary());
            println!();
            println!("{}", summary.final_floor.render_text());
        }
        _ => println!("{}", summary.to_json()),
    }

    Ok(())
}
