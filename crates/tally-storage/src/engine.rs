use crate::MetricStore;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tally_common::types::MetricsSnapshot;

#[derive(Debug, Default)]
struct Series {
    gauges: HashMap<String, f64>,
    counters: HashMap<String, i64>,
}

/// Process-memory metric store.
///
/// Each mutation is a single map operation performed under the write lock,
/// so a poisoned lock still guards a valid map and is recovered rather than
/// propagated.
#[derive(Debug, Default)]
pub struct MemStorage {
    series: RwLock<Series>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored series across both namespaces.
    pub fn len(&self) -> usize {
        let series = self.read();
        series.gauges.len() + series.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Series> {
        self.series.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Series> {
        self.series.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MetricStore for MemStorage {
    fn update_gauge(&self, name: &str, value: f64) {
        let mut series = self.write();
        match series.gauges.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                tracing::debug!(name, "gauge series created");
                series.gauges.insert(name.to_string(), value);
            }
        }
    }

    fn update_counter(&self, name: &str, delta: i64) -> i64 {
        let mut series = self.write();
        match series.counters.get_mut(name) {
            Some(total) => {
                // Overflow wraps so an update can never fail half-way.
                *total = total.wrapping_add(delta);
                *total
            }
            None => {
                tracing::debug!(name, "counter series created");
                series.counters.insert(name.to_string(), delta);
                delta
            }
        }
    }

    fn get_gauge(&self, name: &str) -> Option<f64> {
        self.read().gauges.get(name).copied()
    }

    fn get_counter(&self, name: &str) -> Option<i64> {
        self.read().counters.get(name).copied()
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let series = self.read();
        MetricsSnapshot {
            gauges: series
                .gauges
                .iter()
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
            counters: series
                .counters
                .iter()
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
        }
    }
}
