use chrono::{DateTime, SecondsFormat, Utc};

use std::fmt;

use crate::clock::Clock;

/// The instant a cron invocation ran.
///
/// Renders as RFC 3339 in UTC with millisecond precision and a `Z` suffix,
/// e.g. `2024-01-01T00:00:00.000Z`. That form sorts lexically in time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExecutionTimestamp(DateTime<Utc>);

impl ExecutionTimestamp {
    pub fn now(clock: &dyn Clock) -> Self {
        Self(clock.now())
    }

    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for ExecutionTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for ExecutionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // chrono truncates to millis here, it does not round
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
