use crate::error::MetricError;
use std::collections::BTreeMap;

/// Name of the counter the agent uses to report completed poll cycles.
pub const POLL_COUNT: &str = "PollCount";

/// The two independent metric namespaces.
///
/// # Examples
///
/// ```
/// use tally_common::types::MetricKind;
///
/// let kind: MetricKind = "counter".parse().unwrap();
/// assert_eq!(kind, MetricKind::Counter);
/// assert_eq!(kind.to_string(), "counter");
/// assert!("Gauge".parse::<MetricKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            _ => Err(MetricError::InvalidKind(s.to_string())),
        }
    }
}

/// A typed metric value.
///
/// Gauges replace the stored value on update, counters add to it.
/// `Display` renders the wire format: gauges as the shortest decimal that
/// round-trips (`95.5`, `1024`), counters as a base-10 integer.
///
/// # Examples
///
/// ```
/// use tally_common::types::{MetricKind, MetricValue};
///
/// let v = MetricValue::parse(MetricKind::Gauge, "95.50").unwrap();
/// assert_eq!(v, MetricValue::Gauge(95.5));
/// assert_eq!(v.to_string(), "95.5");
/// assert_eq!(MetricValue::Gauge(1024.0).to_string(), "1024");
/// assert_eq!(MetricValue::Counter(-3).to_string(), "-3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl MetricValue {
    /// Parses a raw wire value according to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidValue`] when `raw` is not a finite `f64`
    /// (gauge) or an `i64` (counter). `NaN` and infinities are rejected
    /// because they do not read back as the value written.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self, MetricError> {
        let invalid = || MetricError::InvalidValue {
            kind,
            raw: raw.to_string(),
        };
        match kind {
            MetricKind::Gauge => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(MetricValue::Gauge(v)),
                _ => Err(invalid()),
            },
            MetricKind::Counter => raw.parse::<i64>().map(MetricValue::Counter).map_err(|_| invalid()),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64's Display is the shortest round-trip form and never switches
            // to exponent notation.
            MetricValue::Gauge(v) => write!(f, "{v}"),
            MetricValue::Counter(v) => write!(f, "{v}"),
        }
    }
}

/// One named gauge reading produced by a collector.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub name: String,
    pub value: f64,
}

impl GaugeSample {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Point-in-time copy of every stored series, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub gauges: BTreeMap<String, f64>,
    pub counters: BTreeMap<String, i64>,
}

impl MetricsSnapshot {
    pub fn len(&self) -> usize {
        self.gauges.len() + self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty() && self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gauge_accepts_float_forms() {
        assert_eq!(
            MetricValue::parse(MetricKind::Gauge, "1").unwrap(),
            MetricValue::Gauge(1.0)
        );
        assert_eq!(
            MetricValue::parse(MetricKind::Gauge, "-0.25").unwrap(),
            MetricValue::Gauge(-0.25)
        );
        assert_eq!(
            MetricValue::parse(MetricKind::Gauge, "1e3").unwrap(),
            MetricValue::Gauge(1000.0)
        );
    }

    #[test]
    fn parse_counter_rejects_fractions() {
        let err = MetricValue::parse(MetricKind::Counter, "1.5").unwrap_err();
        assert!(matches!(
            err,
            MetricError::InvalidValue {
                kind: MetricKind::Counter,
                ..
            }
        ));
        assert!(MetricValue::parse(MetricKind::Counter, "").is_err());
        assert!(MetricValue::parse(MetricKind::Counter, "99999999999999999999").is_err());
    }

    #[test]
    fn parse_gauge_rejects_garbage() {
        assert!(MetricValue::parse(MetricKind::Gauge, "notanumber").is_err());
        assert!(MetricValue::parse(MetricKind::Gauge, "").is_err());
        assert!(MetricValue::parse(MetricKind::Gauge, "1,5").is_err());
    }

    #[test]
    fn parse_gauge_rejects_non_finite() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "+Infinity", "1e400"] {
            let err = MetricValue::parse(MetricKind::Gauge, raw).unwrap_err();
            assert_eq!(
                err,
                MetricError::InvalidValue {
                    kind: MetricKind::Gauge,
                    raw: raw.to_string(),
                },
                "{raw}"
            );
        }
    }

    #[test]
    fn gauge_formatting_is_minimal_decimal() {
        assert_eq!(MetricValue::Gauge(0.1).to_string(), "0.1");
        assert_eq!(MetricValue::Gauge(75.5).to_string(), "75.5");
        assert_eq!(MetricValue::Gauge(-2.0).to_string(), "-2");
        assert_eq!(MetricValue::Gauge(123456789.0).to_string(), "123456789");
        assert_eq!(MetricValue::Gauge(0.000123).to_string(), "0.000123");
    }

    #[test]
    fn counter_formatting_is_plain_integer() {
        assert_eq!(MetricValue::Counter(0).to_string(), "0");
        assert_eq!(MetricValue::Counter(i64::MAX).to_string(), "9223372036854775807");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(MetricValue::Gauge(1.0).kind(), MetricKind::Gauge);
        assert_eq!(MetricValue::Counter(1).kind(), MetricKind::Counter);
    }

    #[test]
    fn kind_parsing_is_case_sensitive() {
        assert!("gauge".parse::<MetricKind>().is_ok());
        assert!("GAUGE".parse::<MetricKind>().is_err());
        assert!("".parse::<MetricKind>().is_err());
    }

    #[test]
    fn snapshot_len_counts_both_namespaces() {
        let mut snapshot = MetricsSnapshot::default();
        assert!(snapshot.is_empty());
        snapshot.gauges.insert("x".to_string(), 1.0);
        snapshot.counters.insert("x".to_string(), 1);
        assert_eq!(snapshot.len(), 2);
    }
}
