//! Time window for filtering a calendar's events.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{CalHubError, CalHubResult};
use crate::event::Event;

/// Keep events with `start < before` and `end > after`.
/// `None` bounds accept everything in that direction.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub before: Option<NaiveDateTime>,
    pub after: Option<NaiveDateTime>,
}

impl EventFilter {
    /// Build a filter from raw `before` / `after` strings.
    pub fn from_args(before: Option<&str>, after: Option<&str>) -> CalHubResult<Self> {
        Ok(EventFilter {
            before: before.map(parse_timestamp).transpose()?,
            after: after.map(parse_timestamp).transpose()?,
        })
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.before.is_none_or(|before| event.start() < before)
            && self.after.is_none_or(|after| event.end() > after)
    }
}

/// Parse a timestamp.
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.f]`, or RFC 3339
/// (converted to its UTC wall-clock time).
pub fn parse_timestamp(s: &str) -> CalHubResult<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    Err(CalHubError::validation(format!(
        "Invalid timestamp '{s}'. Expected YYYY-MM-DDTHH:MM[:SS]"
    )))
}
