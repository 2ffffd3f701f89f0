use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::fmt;

/// How far back each run looks for deliveries, in hours.
pub const LOOKBACK_HOURS: i64 = 3;

pub fn lookback() -> Duration {
    Duration::hours(LOOKBACK_HOURS)
}

/// Oldest instant a run considers. Deliveries at or before it are out of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookbackBoundary(DateTime<Utc>);

impl LookbackBoundary {
    /// Boundary for a run starting at `now`.
    pub fn since(now: DateTime<Utc>) -> Self {
        Self(now - lookback())
    }

    pub fn now() -> Self {
        Self::since(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// True when `ts` falls strictly after the boundary.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts > self.0
    }
}

impl fmt::Display for LookbackBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}
