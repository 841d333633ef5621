//! HTTP collector for the tally telemetry pipeline.
//!
//! Agents push one metric per `POST /update/{kind}/{name}/{value}` request;
//! the server applies it to a shared [`tally_storage::MetricStore`] and
//! serves current values back through `GET /value/{kind}/{name}` and an
//! HTML listing at `/`.

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod state;
