//! RGB colors attached to events.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::{CalHubError, CalHubResult};

/// An RGB color with each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    pub const BLUE: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 1.0,
    };

    pub fn new(red: f64, green: f64, blue: f64) -> CalHubResult<Self> {
        Ok(Color {
            red: check_channel("red", red)?,
            green: check_channel("green", green)?,
            blue: check_channel("blue", blue)?,
        })
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

// NaN fails the range check as well.
fn check_channel(channel: &'static str, value: f64) -> CalHubResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CalHubError::ChannelOutOfRange { channel, value })
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        codec::encode_color(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        codec::decode_color(&value).map_err(|e| match e {
            CalHubError::MissingField(field) => serde::de::Error::missing_field(field),
            other => serde::de::Error::custom(other),
        })
    }
}
