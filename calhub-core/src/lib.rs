//! Core types for calhub.
//!
//! This crate holds everything the server needs that isn't HTTP:
//! - the domain model (`User`, `Calendar`, `Event`) and the `UserIndex`
//! - the `codec` module for identifier and color encodings
//! - `snapshot` persistence of the whole index to a JSON file

pub mod calendar;
pub mod codec;
pub mod color;
pub mod error;
pub mod event;
pub mod identifier;
pub mod index;
pub mod snapshot;
pub mod time_filter;
pub mod user;

pub use calendar::Calendar;
pub use color::Color;
pub use error::{CalHubError, CalHubResult};
pub use event::{Event, EventPatch, EventType};
pub use identifier::Identifier;
pub use index::{UserIndex, UserKey};
pub use time_filter::{EventFilter, parse_timestamp};
pub use user::{User, UserSettings, UserView};
