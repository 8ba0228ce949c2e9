//! Storage simulation: decisions, ticks, goals and the top-level API

pub mod collection;
pub mod decision;
pub mod goal;
pub mod movement;
pub mod output;
pub mod storage;
pub mod tick;

pub use decision::{decide, DecisionRules, Intent};
pub use goal::{boxes_available, required_stacks, stack_count, stacks_formed};
pub use output::{CollectSummary, RunSummary, TickReport};
pub use storage::StorageSimulation;
pub use tick::run_tick;
