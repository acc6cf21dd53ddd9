//! Text encodings for identifiers and colors.
//!
//! Both the snapshot file and the HTTP protocol go through these functions,
//! so an identifier or color always has exactly one textual form:
//! - identifiers are canonical hyphenated lowercase UUID strings
//! - colors are `{"red": f, "green": f, "blue": f}` objects

use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::color::Color;
use crate::error::{CalHubError, CalHubResult};
use crate::identifier::Identifier;

const CHANNELS: [&str; 3] = ["red", "green", "blue"];

pub fn encode_identifier(id: &Identifier) -> String {
    id.as_uuid().hyphenated().to_string()
}

/// Parse an identifier. Only the canonical hyphenated form is accepted.
pub fn decode_identifier(s: &str) -> CalHubResult<Identifier> {
    // Uuid::parse_str also accepts simple, braced and urn forms
    if s.len() != 36 {
        return Err(CalHubError::MalformedIdentifier(s.to_string()));
    }
    Uuid::try_parse(s)
        .map(Identifier::from_uuid)
        .map_err(|_| CalHubError::MalformedIdentifier(s.to_string()))
}

pub fn encode_color(color: &Color) -> Value {
    json!({
        "red": color.red(),
        "green": color.green(),
        "blue": color.blue(),
    })
}

/// Decode a color triple.
///
/// A missing channel reports `MissingField`, a channel outside `[0, 1]`
/// reports `ChannelOutOfRange`, anything else malformed is `Validation`.
pub fn decode_color(value: &Value) -> CalHubResult<Color> {
    let object = value
        .as_object()
        .ok_or_else(|| CalHubError::validation(format!("Color must be an object, got {value}")))?;

    let [red, green, blue] = CHANNELS.map(|channel| channel_value(object, channel));
    Color::new(red?, green?, blue?)
}

fn channel_value(object: &Map<String, Value>, channel: &'static str) -> CalHubResult<f64> {
    let value = object
        .get(channel)
        .ok_or(CalHubError::MissingField(channel))?;

    value.as_f64().ok_or_else(|| {
        CalHubError::validation(format!(
            "Color channel '{channel}' must be a number, got {value}"
        ))
    })
}

/// Parse a color from its JSON text form (as sent in the `color` header).
pub fn parse_color(text: &str) -> CalHubResult<Color> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CalHubError::validation(format!("Invalid color '{text}': {e}")))?;
    decode_color(&value)
}
