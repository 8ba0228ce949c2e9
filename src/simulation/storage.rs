//! StorageSimulation - the top-level stepping and query API

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::StorageConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::Tick;
use crate::entity::{Robot, Tile};
use crate::simulation::collection::collect_loads;
use crate::simulation::decision::DecisionRules;
use crate::simulation::goal;
use crate::simulation::output::{CollectSummary, RunSummary, TickReport};
use crate::simulation::tick::run_tick;
use crate::world::{Floor, FloorSnapshot};

/// A warehouse floor with its robots, clock and random source
pub struct StorageSimulation {
    config: StorageConfig,
    floor: Floor,
    /// Seeded once from `config.seed`; the only source of randomness
    rng: ChaCha8Rng,
    rules: DecisionRules,
    capacity: u32,
    /// K: boxes on the floor at construction, fixed for the whole run
    total_boxes: u32,
    tick: Tick,
    last_report: Option<TickReport>,
}

impl StorageSimulation {
    /// Default configuration on a `width` x `height` floor with `total_boxes`
    /// loose boxes
    pub fn new(width: u32, height: u32, total_boxes: u32) -> Result<Self> {
        Self::with_config(StorageConfig::new(width, height, total_boxes))
    }

    pub fn with_config(config: StorageConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let capacity = config.robot_capacity();
        let floor = Floor::generate(&config, capacity, &mut rng)?;

        tracing::info!(
            width = config.width,
            height = config.height,
            total_boxes = config.total_boxes,
            robots = config.robot_count,
            capacity,
            movement = ?config.movement,
            seed = config.seed,
            "storage simulation constructed"
        );

        Ok(Self {
            rules: DecisionRules::from_config(&config),
            total_boxes: config.total_boxes,
            config,
            floor,
            rng,
            capacity,
            tick: 0,
            last_report: None,
        })
    }

    /// Run on a hand-built floor. K is taken from the boxes already on it and
    /// capacity from the config, though robots keep the capacity they carry.
    pub fn from_floor(config: StorageConfig, floor: Floor) -> Result<Self> {
        config.validate()?;
        if floor.grid.width() != config.width || floor.grid.height() != config.height {
            return Err(SimError::InvalidConfig(format!(
                "floor is {}x{} but the config describes {}x{}",
                floor.grid.width(),
                floor.grid.height(),
                config.width,
                config.height
            )));
        }
        let total_boxes = u32::try_from(floor.total_stored())
            .map_err(|_| SimError::InvalidConfig("floor holds more boxes than fit in u32".into()))?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rules: DecisionRules::from_config(&config),
            capacity: config.robot_capacity(),
            total_boxes,
            config,
            floor,
            tick: 0,
            last_report: None,
        })
    }

    /// Advance exactly one tick
    pub fn step(&mut self) -> Result<()> {
        let next = self.tick + 1;
        let report = run_tick(&mut self.floor, &self.rules, &mut self.rng, next)?;
        self.tick = next;

        tracing::debug!(
            tick = report.tick,
            deposits = report.deposits,
            pickups = report.pickups,
            moves = report.moves,
            claims = report.claims,
            idles = report.idles,
            conflicts = report.conflicts,
            "tick complete"
        );

        self.last_report = Some(report);
        Ok(())
    }

    /// A loose box is still waiting to be picked up
    pub fn boxes_available(&self) -> bool {
        goal::boxes_available(&self.floor)
    }

    /// Enough stacks exist to hold every box
    pub fn stacks_formed(&self) -> bool {
        goal::stacks_formed(&self.floor, self.total_boxes, self.capacity)
    }

    /// Terminal cleanup: unload every partially loaded robot
    pub fn force_collect(&mut self) -> Result<CollectSummary> {
        let summary = collect_loads(&mut self.floor)?;
        tracing::debug!(
            unloaded = summary.robots_unloaded,
            deposited = summary.boxes_deposited,
            stranded = summary.robots_stranded,
            "forced collection"
        );
        Ok(summary)
    }

    /// Step while loose boxes remain and the tick budget allows, then run
    /// the forced collection
    pub fn run(&mut self, max_ticks: u64) -> Result<RunSummary> {
        self.run_with_budget(max_ticks, None)
    }

    /// Like `run`, additionally stopping once `time_budget` has elapsed
    pub fn run_with_budget(&mut self, max_ticks: u64, time_budget: Option<Duration>) -> Result<RunSummary> {
        let start = Instant::now();
        let mut stepped = 0;

        while self.boxes_available() && stepped < max_ticks {
            if time_budget.is_some_and(|budget| start.elapsed() >= budget) {
                tracing::info!(tick = self.tick, "time budget exhausted");
                break;
            }
            self.step()?;
            stepped += 1;
        }

        let completed = !self.boxes_available();
        let collect = self.force_collect()?;
        let elapsed = start.elapsed();

        tracing::info!(
            ticks = self.tick,
            completed,
            stacks = self.stack_count(),
            "run finished"
        );

        Ok(RunSummary {
            ticks: self.tick,
            completed,
            stacks_formed: self.stacks_formed(),
            stack_count: self.stack_count(),
            capacity: self.capacity,
            total_boxes: self.total_boxes,
            move_counts: self.move_counts(),
            collect,
            simulation_time_ms: elapsed.as_millis() as u64,
            final_floor: self.snapshot(),
        })
    }

    /// Per-cell codes for visualisation
    pub fn snapshot(&self) -> FloorSnapshot {
        self.floor.snapshot()
    }

    /// Move counters indexed by robot id
    pub fn move_counts(&self) -> Vec<u64> {
        self.floor.robots().iter().map(|r| r.move_count).collect()
    }

    pub fn stack_count(&self) -> u32 {
        goal::stack_count(&self.floor, self.capacity)
    }

    pub fn total_stored(&self) -> u64 {
        self.floor.total_stored()
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn robots(&self) -> &[Robot] {
        self.floor.robots()
    }

    pub fn tiles(&self) -> &[Tile] {
        self.floor.tiles()
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn total_boxes(&self) -> u32 {
        self.total_boxes
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }
}
