use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tally_collector::Collector;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// The gauges from one completed poll together with the number of polls
/// completed so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub gauges: BTreeMap<String, f64>,
    pub poll_count: i64,
}

/// The (snapshot, poll count) pair shared between the poller and the
/// reporter. Both halves change together under one lock, so a reader never
/// sees gauges from one tick paired with the count of another.
#[derive(Debug, Clone, Default)]
pub struct SharedSnapshot {
    inner: Arc<Mutex<Snapshot>>,
}

impl SharedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the gauges wholesale and bumps the poll count. Returns the
    /// new count.
    pub fn publish(&self, gauges: BTreeMap<String, f64>) -> i64 {
        let mut current = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        current.gauges = gauges;
        current.poll_count += 1;
        current.poll_count
    }

    /// Copies the current pair out so no lock is held while sending.
    pub fn load(&self) -> Snapshot {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub struct Poller {
    collectors: Vec<Box<dyn Collector>>,
    shared: SharedSnapshot,
    interval: Duration,
}

impl Poller {
    pub fn new(
        collectors: Vec<Box<dyn Collector>>,
        shared: SharedSnapshot,
        interval: Duration,
    ) -> Self {
        Self {
            collectors,
            shared,
            interval,
        }
    }

    /// Samples every collector and publishes the result as the new snapshot.
    /// A failing collector is skipped for this tick; the others still count.
    pub fn poll_once(&mut self) -> i64 {
        let mut gauges = BTreeMap::new();
        for collector in &mut self.collectors {
            match collector.collect() {
                Ok(samples) => {
                    gauges.extend(samples.into_iter().map(|s| (s.name, s.value)));
                }
                Err(e) => {
                    tracing::warn!(collector = collector.name(), error = %e, "Collection failed")
                }
            }
        }

        let count = gauges.len();
        let poll_count = self.shared.publish(gauges);
        tracing::debug!(count, poll_count, "Collected metrics");
        poll_count
    }

    /// Polls on every tick until `shutdown` is cancelled. The first poll
    /// happens one interval after start.
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            collectors = self.collectors.len(),
            "Poller started"
        );

        let mut tick = interval_at(Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.poll_once();
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("Poller stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use tally_common::types::GaugeSample;

    /// Emits `tick` = number of calls so far, plus `only_first` on the
    /// first call.
    struct ScriptedCollector {
        calls: u32,
    }

    impl Collector for ScriptedCollector {
        fn name(&self) -> &str {
            "scripted"
        }

        fn collect(&mut self) -> Result<Vec<GaugeSample>> {
            self.calls += 1;
            let mut samples = vec![GaugeSample::new("tick", self.calls as f64)];
            if self.calls == 1 {
                samples.push(GaugeSample::new("only_first", 1.0));
            }
            Ok(samples)
        }
    }

    struct BrokenCollector;

    impl Collector for BrokenCollector {
        fn name(&self) -> &str {
            "broken"
        }

        fn collect(&mut self) -> Result<Vec<GaugeSample>> {
            Err(anyhow!("sensor unavailable"))
        }
    }

    fn poller(collectors: Vec<Box<dyn Collector>>) -> (Poller, SharedSnapshot) {
        let shared = SharedSnapshot::new();
        let poller = Poller::new(collectors, shared.clone(), Duration::from_secs(1));
        (poller, shared)
    }

    #[test]
    fn starts_empty() {
        let shared = SharedSnapshot::new();
        assert_eq!(shared.load(), Snapshot::default());
    }

    #[test]
    fn each_poll_increments_count_once() {
        let (mut poller, shared) = poller(vec![Box::new(ScriptedCollector { calls: 0 })]);

        assert_eq!(poller.poll_once(), 1);
        assert_eq!(poller.poll_once(), 2);
        assert_eq!(poller.poll_once(), 3);

        assert_eq!(shared.load().poll_count, 3);
    }

    #[test]
    fn snapshot_is_replaced_not_merged() {
        let (mut poller, shared) = poller(vec![Box::new(ScriptedCollector { calls: 0 })]);

        poller.poll_once();
        assert!(shared.load().gauges.contains_key("only_first"));

        poller.poll_once();
        let snapshot = shared.load();
        assert!(!snapshot.gauges.contains_key("only_first"));
        assert_eq!(snapshot.gauges["tick"], 2.0);
    }

    #[test]
    fn gauges_and_count_come_from_the_same_tick() {
        let (mut poller, shared) = poller(vec![Box::new(ScriptedCollector { calls: 0 })]);

        for _ in 0..5 {
            poller.poll_once();
            let snapshot = shared.load();
            assert_eq!(snapshot.gauges["tick"], snapshot.poll_count as f64);
        }
    }

    #[test]
    fn failing_collector_is_skipped() {
        let (mut poller, shared) = poller(vec![
            Box::new(BrokenCollector),
            Box::new(ScriptedCollector { calls: 0 }),
        ]);

        assert_eq!(poller.poll_once(), 1);

        let snapshot = shared.load();
        assert_eq!(snapshot.gauges.len(), 2);
        assert_eq!(snapshot.poll_count, 1);
    }

    #[test]
    fn concurrent_readers_see_monotonic_counts() {
        let shared = SharedSnapshot::new();
        let reader = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let mut last = 0;
                for _ in 0..1000 {
                    let snapshot = shared.load();
                    assert!(snapshot.poll_count >= last);
                    if snapshot.poll_count > 0 {
                        assert_eq!(snapshot.gauges["n"], snapshot.poll_count as f64);
                    }
                    last = snapshot.poll_count;
                }
            })
        };

        for n in 1..=1000 {
            shared.publish(BTreeMap::from([("n".to_string(), n as f64)]));
        }
        reader.join().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_on_each_tick_until_cancelled() {
        let shared = SharedSnapshot::new();
        let poller = Poller::new(
            vec![Box::new(ScriptedCollector { calls: 0 })],
            shared.clone(),
            Duration::from_secs(2),
        );
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(poller.run(shutdown.clone()));

        tokio::time::sleep(Duration::from_millis(6_500)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(shared.load().poll_count, 3);
    }
}
