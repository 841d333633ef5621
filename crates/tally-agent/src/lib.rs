//! The tally agent: samples gauges on one schedule and pushes them to the
//! collector on another.
//!
//! [`poller::Poller`] publishes a fresh [`poller::Snapshot`] every poll
//! interval; [`reporter::Reporter`] reads the latest one every report
//! interval and sends it metric by metric through a
//! [`sender::MetricSender`]. The two loops share nothing but the snapshot.

pub mod config;
pub mod error;
pub mod poller;
pub mod reporter;
pub mod sender;

use anyhow::Result;
use std::time::Duration;
use tally_collector::Collector;
use tokio_util::sync::CancellationToken;

use crate::config::AgentConfig;
use crate::poller::{Poller, SharedSnapshot};
use crate::reporter::Reporter;
use crate::sender::{HttpSender, MetricSender};

pub struct Agent<S> {
    poller: Poller,
    reporter: Reporter<S>,
}

impl Agent<HttpSender> {
    /// Builds an agent that reports over HTTP to the configured server.
    pub fn from_config(config: &AgentConfig, collectors: Vec<Box<dyn Collector>>) -> Result<Self> {
        config.validate()?;
        let sender = HttpSender::new(&config.server_url(), config.request_timeout())?;
        Ok(Self::new(
            sender,
            collectors,
            config.poll_interval(),
            config.report_interval(),
        ))
    }
}

impl<S: MetricSender + 'static> Agent<S> {
    pub fn new(
        sender: S,
        collectors: Vec<Box<dyn Collector>>,
        poll_interval: Duration,
        report_interval: Duration,
    ) -> Self {
        let shared = SharedSnapshot::new();
        Self {
            poller: Poller::new(collectors, shared.clone(), poll_interval),
            reporter: Reporter::new(sender, shared, report_interval),
        }
    }

    /// Runs both loops as separate tasks and returns once `shutdown` is
    /// cancelled and both have stopped.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let poll_handle = tokio::spawn(self.poller.run(shutdown.clone()));
        let report_handle = tokio::spawn(self.reporter.run(shutdown));

        let (polled, reported) = tokio::join!(poll_handle, report_handle);
        polled?;
        reported?;
        Ok(())
    }
}
