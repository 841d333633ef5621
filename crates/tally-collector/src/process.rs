use crate::Collector;
use anyhow::{anyhow, Result};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tally_common::types::GaugeSample;

/// Samples the agent's own process: memory footprint, CPU share, run time
/// and cumulative disk I/O.
pub struct ProcessCollector {
    system: System,
    pid: Option<Pid>,
}

impl ProcessCollector {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for ProcessCollector {
    fn name(&self) -> &str {
        "process"
    }

    fn collect(&mut self) -> Result<Vec<GaugeSample>> {
        let pid = self
            .pid
            .ok_or_else(|| anyhow!("current pid is not available on this platform"))?;
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = self
            .system
            .process(pid)
            .ok_or_else(|| anyhow!("process {pid} not found"))?;

        let disk = process.disk_usage();
        Ok(vec![
            GaugeSample::new("ProcessResidentMemory", process.memory() as f64),
            GaugeSample::new("ProcessVirtualMemory", process.virtual_memory() as f64),
            GaugeSample::new("ProcessCPUUsage", process.cpu_usage() as f64),
            GaugeSample::new("ProcessRunTime", process.run_time() as f64),
            GaugeSample::new("ProcessDiskRead", disk.total_read_bytes as f64),
            GaugeSample::new("ProcessDiskWritten", disk.total_written_bytes as f64),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_own_process() {
        let mut collector = ProcessCollector::new();
        let samples = collector.collect().unwrap();

        let rss = samples
            .iter()
            .find(|s| s.name == "ProcessResidentMemory")
            .unwrap();
        assert!(rss.value > 0.0);
    }
}
