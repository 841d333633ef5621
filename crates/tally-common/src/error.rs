use crate::types::MetricKind;

/// Errors raised while validating or resolving a metric request.
///
/// Every variant is a client-side problem; the store itself never fails.
///
/// # Examples
///
/// ```rust
/// use tally_common::error::MetricError;
///
/// let err = MetricError::InvalidKind("bogus".to_string());
/// assert!(err.to_string().contains("bogus"));
/// assert!(err.is_bad_request());
/// assert!(!MetricError::MissingName.is_bad_request());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// The kind segment is neither `gauge` nor `counter`.
    #[error("invalid metric kind '{0}'")]
    InvalidKind(String),

    /// The metric name is empty or missing.
    #[error("metric name required")]
    MissingName,

    /// The request path has missing or extra segments.
    #[error("malformed metric path")]
    MalformedPath,

    /// The raw value does not parse as the kind's numeric type.
    #[error("invalid {kind} value '{raw}'")]
    InvalidValue { kind: MetricKind, raw: String },

    /// No series exists under this kind and name.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: MetricKind, name: String },
}

impl MetricError {
    /// Validation failures that should surface as `400 Bad Request`;
    /// everything else is reported as not found.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            MetricError::InvalidKind(_) | MetricError::InvalidValue { .. }
        )
    }
}

/// Convenience `Result` alias for metric validation.
pub type Result<T> = std::result::Result<T, MetricError>;
