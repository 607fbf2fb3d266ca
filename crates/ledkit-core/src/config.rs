//! Serializable LED configuration and JSON loading helpers.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{LedError, LedResult};
use crate::led::{DEFAULT_DARK_FACTOR, LedShape};

/// Configuration of a single LED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    /// Caption shown next to the LED.
    pub label: Option<String>,
    pub color: Rgb,
    pub shape: LedShape,
    /// Width to height ratio for rectangular LEDs.
    pub ratio: f64,
    pub dark_factor: i32,
    pub framed: bool,
    /// Initial state.
    pub on: bool,
    /// Whether the LED reacts to clicks.
    pub clickable: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            label: None,
            color: Rgb::GREEN,
            shape: LedShape::Circular,
            ratio: 1.0,
            dark_factor: DEFAULT_DARK_FACTOR,
            framed: true,
            on: true,
            clickable: false,
        }
    }
}

impl LedConfig {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> LedResult<()> {
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(LedError::InvalidRatio(self.ratio));
        }
        Ok(())
    }
}

/// Parse a JSON document.
pub fn from_json<T: DeserializeOwned>(json: &str) -> LedResult<T> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> LedResult<T> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    log::info!("Loaded configuration from {}", path.display());
    from_json(&json)
}

/// Write a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> LedResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
