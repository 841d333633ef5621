use tally_common::types::MetricKind;

/// A single metric push that did not succeed.
///
/// # Examples
///
/// ```rust
/// use tally_agent::error::ReportError;
///
/// let err = ReportError::Status { status: 400 };
/// assert!(err.to_string().contains("400"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Connection refused, timeout, or another transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than `200 OK`.
    #[error("server returned non-200 status: {status}")]
    Status { status: u16 },

    /// The configured server address cannot carry a metric path.
    #[error("invalid server url: {0}")]
    Url(String),
}

/// A report cycle stopped at its first failed push. Metrics before it were
/// applied; the failed one and everything after it were dropped.
#[derive(Debug, thiserror::Error)]
#[error("failed to send {kind} '{name}' after {sent} successful sends: {source}")]
pub struct CycleAborted {
    pub kind: MetricKind,
    pub name: String,
    pub sent: usize,
    #[source]
    pub source: ReportError,
}
