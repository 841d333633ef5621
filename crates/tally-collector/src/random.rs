use crate::Collector;
use anyhow::Result;
use rand::Rng;
use tally_common::types::GaugeSample;

/// Emits `RandomValue`, a uniform sample in `[0, 1)` that changes every
/// poll. Useful for checking end-to-end that fresh snapshots arrive.
pub struct RandomCollector;

impl RandomCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for RandomCollector {
    fn name(&self) -> &str {
        "random"
    }

    fn collect(&mut self) -> Result<Vec<GaugeSample>> {
        let value: f64 = rand::thread_rng().gen();
        Ok(vec![GaugeSample::new("RandomValue", value)])
    }
}
