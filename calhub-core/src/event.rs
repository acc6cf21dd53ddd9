//! Calendar events.
//!
//! An `Event` is an immutable value: an edit produces a new `Event` under the
//! same identifier (see [`Event::patched`]). Ordering of `start` and `end` is
//! not enforced here; callers validate it before constructing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CalHubError;
use crate::identifier::Identifier;

pub const DEFAULT_EVENT_TITLE: &str = "Untitled event";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[default]
    Regular,
    AllDay,
}

impl FromStr for EventType {
    type Err = CalHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGULAR" => Ok(EventType::Regular),
            "ALL_DAY" => Ok(EventType::AllDay),
            _ => Err(CalHubError::validation(format!(
                "Unknown event type '{s}'. Expected REGULAR or ALL_DAY"
            ))),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Regular => write!(f, "REGULAR"),
            EventType::AllDay => write!(f, "ALL_DAY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: Identifier,
    title: String,
    description: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    color: Color,
    #[serde(rename = "type")]
    event_type: EventType,
}

/// Field values for creating or editing an event.
/// `None` means "keep the current value" (or the default, for a new event).
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub color: Option<Color>,
    pub event_type: Option<EventType>,
}

impl Event {
    /// A new event with a fresh identifier and default title, color and type.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Event {
            id: Identifier::new(),
            title: DEFAULT_EVENT_TITLE.to_string(),
            description: String::new(),
            start,
            end,
            color: Color::default(),
            event_type: EventType::default(),
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Build the replacement for this event: same identifier, with every
    /// field the patch sets overriding the current value.
    pub fn patched(&self, patch: &EventPatch) -> Event {
        Event {
            id: self.id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            start: patch.start.unwrap_or(self.start),
            end: patch.end.unwrap_or(self.end),
            color: patch.color.unwrap_or(self.color),
            event_type: patch.event_type.unwrap_or(self.event_type),
        }
    }
}
