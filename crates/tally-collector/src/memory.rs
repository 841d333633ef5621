use crate::Collector;
use anyhow::Result;
use sysinfo::System;
use tally_common::types::GaugeSample;

pub struct MemoryCollector {
    system: System,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for MemoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for MemoryCollector {
    fn name(&self) -> &str {
        "memory"
    }

    fn collect(&mut self) -> Result<Vec<GaugeSample>> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let used_pct = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        // Swap
        let swap_total = self.system.total_swap();
        let swap_used = self.system.used_swap();

        Ok(vec![
            GaugeSample::new("TotalMemory", total as f64),
            GaugeSample::new("UsedMemory", used as f64),
            GaugeSample::new("FreeMemory", self.system.free_memory() as f64),
            GaugeSample::new("AvailableMemory", self.system.available_memory() as f64),
            GaugeSample::new("UsedMemoryPercent", used_pct),
            GaugeSample::new("SwapTotal", swap_total as f64),
            GaugeSample::new("SwapUsed", swap_used as f64),
        ])
    }
}
