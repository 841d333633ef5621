use crate::error::CycleAborted;
use crate::poller::SharedSnapshot;
use crate::sender::MetricSender;
use std::time::Duration;
use tally_common::types::{MetricValue, POLL_COUNT};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Pushes the latest snapshot to the collector, one request per metric.
///
/// Delivery is at-most-once: the first failed push ends the cycle and the
/// rest of that cycle's metrics are dropped, never retried or carried over.
pub struct Reporter<S> {
    sender: S,
    shared: SharedSnapshot,
    interval: Duration,
}

impl<S: MetricSender> Reporter<S> {
    pub fn new(sender: S, shared: SharedSnapshot, interval: Duration) -> Self {
        Self {
            sender,
            shared,
            interval,
        }
    }

    /// Sends every gauge in name order, then `PollCount`. Returns how many
    /// metrics were sent; nothing is sent before the first poll completes.
    pub async fn report_once(&self) -> Result<usize, CycleAborted> {
        let snapshot = self.shared.load();
        if snapshot.poll_count == 0 {
            return Ok(0);
        }

        let metrics = snapshot
            .gauges
            .into_iter()
            .map(|(name, value)| (name, MetricValue::Gauge(value)))
            .chain(std::iter::once((
                POLL_COUNT.to_string(),
                MetricValue::Counter(snapshot.poll_count),
            )));

        let mut sent = 0;
        for (name, value) in metrics {
            if let Err(source) = self.sender.send(&name, value).await {
                return Err(CycleAborted {
                    kind: value.kind(),
                    name,
                    sent,
                    source,
                });
            }
            sent += 1;
        }
        Ok(sent)
    }

    /// Reports on every tick until `shutdown` is cancelled. A cycle in
    /// flight is abandoned on cancellation.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Reporter started"
        );

        let mut tick = interval_at(Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.cancelled() => break,
            }
            tokio::select! {
                result = self.report_once() => match result {
                    Ok(0) => tracing::debug!("Nothing collected yet, skipping report"),
                    Ok(count) => tracing::info!(count, "Metrics reported"),
                    Err(e) => tracing::warn!(
                        kind = %e.kind,
                        name = %e.name,
                        sent = e.sent,
                        error = %e.source,
                        "Report cycle aborted"
                    ),
                },
                _ = shutdown.cancelled() => break,
            }
        }
        tracing::info!("Reporter stopped");
    }
}
