//! In-memory metric storage for the tally server.
//!
//! Gauges and counters live in two independent namespaces. The default
//! implementation ([`engine::MemStorage`]) guards both maps with a single
//! read-write lock, which linearizes updates to the same key and lets
//! [`MetricStore::snapshot`] observe both namespaces at one instant.

pub mod engine;


use tally_common::types::{MetricKind, MetricValue, MetricsSnapshot};

pub use engine::MemStorage;

/// Authoritative store of current metric values.
///
/// Implementations must be safe to share across threads (`Send + Sync`)
/// because every inbound HTTP request runs its own task against the same
/// store.
pub trait MetricStore: Send + Sync {
    /// Replaces the gauge `name` with `value`.
    fn update_gauge(&self, name: &str, value: f64);

    /// Adds `delta` to the counter `name` (absent counts as zero) and returns
    /// the new total.
    fn update_counter(&self, name: &str, delta: i64) -> i64;

    fn get_gauge(&self, name: &str) -> Option<f64>;

    fn get_counter(&self, name: &str) -> Option<i64>;

    /// Returns a consistent copy of every stored series.
    fn snapshot(&self) -> MetricsSnapshot;

    /// Applies `value` using the update policy of its kind and returns the
    /// value now stored under `name`.
    fn update(&self, name: &str, value: MetricValue) -> MetricValue {
        match value {
            MetricValue::Gauge(v) => {
                self.update_gauge(name, v);
                MetricValue::Gauge(v)
            }
            MetricValue::Counter(delta) => MetricValue::Counter(self.update_counter(name, delta)),
        }
    }

    fn get(&self, kind: MetricKind, name: &str) -> Option<MetricValue> {
        match kind {
            MetricKind::Gauge => self.get_gauge(name).map(MetricValue::Gauge),
            MetricKind::Counter => self.get_counter(name).map(MetricValue::Counter),
        }
    }
}
