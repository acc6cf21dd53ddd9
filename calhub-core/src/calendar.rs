//! Calendars and their event collections.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::identifier::Identifier;
use crate::time_filter::EventFilter;

pub const DEFAULT_CALENDAR_NAME: &str = "Unnamed calendar";

/// A named, ordered collection of events.
///
/// Events keep their insertion order. Accessors hand out copies; the only way
/// to change the collection is through `add_event`, `remove_event` and
/// `replace_event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    id: Identifier,
    name: String,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new(name: Option<&str>) -> Self {
        Calendar {
            id: Identifier::new(),
            name: name.unwrap_or(DEFAULT_CALENDAR_NAME).to_string(),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn event(&self, id: Identifier) -> Option<Event> {
        self.events.iter().find(|e| e.id() == id).cloned()
    }

    /// Events matching `filter`, in insertion order.
    pub fn events_matching(&self, filter: &EventFilter) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Remove the event with the given identifier, returning it if present.
    pub fn remove_event(&mut self, id: Identifier) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id() == id)?;
        Some(self.events.remove(pos))
    }

    /// Swap in a new value for the event sharing `event`'s identifier,
    /// keeping its position. Returns false if no such event exists.
    pub fn replace_event(&mut self, event: Event) -> bool {
        match self.events.iter_mut().find(|e| e.id() == event.id()) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }
}
