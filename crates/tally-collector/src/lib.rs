//! Metric sampling sources for the tally agent.
//!
//! Each [`Collector`] implementation gathers one category of gauge readings
//! (host memory, load, the agent's own process, a random sample) and returns
//! them as [`GaugeSample`]s. The agent's poller merges every collector's
//! output into one snapshot per tick.

pub mod load;
pub mod memory;
pub mod process;
pub mod random;

use anyhow::Result;
use tally_common::types::GaugeSample;

/// A gauge source sampled by the agent's poll loop.
///
/// Implementations are called once per poll tick from a single task, so
/// `collect` takes `&mut self` and may keep state between ticks. The trait
/// requires `Send` so the boxed collectors can move into the poll task.
pub trait Collector: Send {
    /// Returns the collector name (e.g., `"memory"`), used for logging.
    fn name(&self) -> &str;

    /// Samples current values.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying system API call fails.
    fn collect(&mut self) -> Result<Vec<GaugeSample>>;
}

/// The collectors the agent binary runs by default.
pub fn default_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(memory::MemoryCollector::new()),
        Box::new(load::LoadCollector::new()),
        Box::new(process::ProcessCollector::new()),
        Box::new(random::RandomCollector::new()),
    ]
}
