use crate::Collector;
use anyhow::Result;
use sysinfo::System;
use tally_common::types::GaugeSample;

pub struct LoadCollector;

impl LoadCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoadCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for LoadCollector {
    fn name(&self) -> &str {
        "load"
    }

    fn collect(&mut self) -> Result<Vec<GaugeSample>> {
        let load_avg = System::load_average();

        Ok(vec![
            GaugeSample::new("LoadAverage1", load_avg.one),
            GaugeSample::new("LoadAverage5", load_avg.five),
            GaugeSample::new("LoadAverage15", load_avg.fifteen),
            GaugeSample::new("Uptime", System::uptime() as f64),
        ])
    }
}
