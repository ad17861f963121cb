//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(!b.is_before(&a));
    }

    #[test]
    fn ordering_works() {
        let early = Timestamp::from_datetime("2026-01-01T00:00:00Z".parse().unwrap());
        let late = Timestamp::from_datetime("2026-06-01T00:00:00Z".parse().unwrap());
        assert!(early.is_before(&late));
        assert!(late.is_after(&early));
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::from_datetime("2026-01-01T00:00:00Z".parse().unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2026-01-01"));
    }
}
