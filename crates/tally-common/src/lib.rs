//! Shared metric types for the tally agent and server.
//!
//! [`types::MetricValue`] carries the tag that selects the update policy
//! (gauges overwrite, counters accumulate) and owns the wire parse/format
//! rules used on both sides of the HTTP protocol.

pub mod error;
pub mod types;
