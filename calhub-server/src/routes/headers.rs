//! Request parameters carried in headers.
//!
//! The protocol has no request bodies: credentials, filters and event
//! fields all arrive as headers.

use axum::http::HeaderMap;
use calhub_core::{
    CalHubError, CalHubResult, EventPatch, EventType, Identifier, UserIndex, codec,
    parse_timestamp,
};
use chrono::NaiveDateTime;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const NAME: &str = "name";
pub const BEFORE: &str = "before";
pub const AFTER: &str = "after";
pub const START: &str = "start";
pub const END: &str = "end";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const COLOR: &str = "color";
pub const TYPE: &str = "type";
pub const TIMEZONE: &str = "timezone";
pub const TWENTY_FOUR_HOUR: &str = "twenty-four-hour";
pub const SHOW_WEEK_NUMBER: &str = "show-week-number";

/// An optional header as UTF-8 text. Other byte sequences are rejected.
pub fn optional<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> CalHubResult<Option<&'a str>> {
    headers
        .get(name)
        .map(|value| {
            std::str::from_utf8(value.as_bytes())
                .map_err(|_| CalHubError::validation(format!("Header '{name}' is not valid UTF-8")))
        })
        .transpose()
}

pub fn required<'a>(headers: &'a HeaderMap, name: &'static str) -> CalHubResult<&'a str> {
    optional(headers, name)?.ok_or(CalHubError::MissingField(name))
}

pub fn required_timestamp(headers: &HeaderMap, name: &'static str) -> CalHubResult<NaiveDateTime> {
    parse_timestamp(required(headers, name)?)
}

/// Parse a path segment as an identifier.
pub fn path_id(segment: &str) -> CalHubResult<Identifier> {
    codec::decode_identifier(segment)
}

/// Username and password from the request headers.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both headers are required; a missing one is a validation error.
    pub fn from_headers(headers: &HeaderMap) -> CalHubResult<Self> {
        Ok(Credentials {
            username: required(headers, USERNAME)?.to_string(),
            password: required(headers, PASSWORD)?.to_string(),
        })
    }

    pub fn authenticate(&self, index: &UserIndex) -> CalHubResult<Identifier> {
        index.authenticate(&self.username, &self.password)
    }
}

/// Event fields from headers. Absent headers stay `None`.
pub fn event_patch(headers: &HeaderMap) -> CalHubResult<EventPatch> {
    Ok(EventPatch {
        title: optional(headers, TITLE)?.map(str::to_string),
        description: optional(headers, DESCRIPTION)?.map(str::to_string),
        start: optional(headers, START)?.map(parse_timestamp).transpose()?,
        end: optional(headers, END)?.map(parse_timestamp).transpose()?,
        color: optional(headers, COLOR)?.map(codec::parse_color).transpose()?,
        event_type: optional(headers, TYPE)?
            .map(str::parse::<EventType>)
            .transpose()?,
    })
}

pub fn parse_bool(name: &'static str, value: &str) -> CalHubResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CalHubError::validation(format!(
            "Header '{name}' must be true or false, got '{value}'"
        ))),
    }
}
