//! Application configuration.

use std::path::Path;

use ledkit_core::{LedConfig, LedResult, LedShape, Rgb, load_json};
use serde::{Deserialize, Serialize};

/// Application configuration, optionally loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Canvas color behind the status strip.
    pub background: Rgb,
    pub leds: Vec<LedConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "LedKit".to_string(),
            width: 640,
            height: 420,
            background: Rgb::new(250, 250, 250),
            leds: vec![
                LedConfig {
                    label: Some("Power".to_string()),
                    clickable: true,
                    ..Default::default()
                },
                LedConfig {
                    label: Some("Network".to_string()),
                    color: Rgb::YELLOW,
                    clickable: true,
                    ..Default::default()
                },
                LedConfig {
                    label: Some("Error".to_string()),
                    color: Rgb::RED,
                    on: false,
                    ..Default::default()
                },
                LedConfig {
                    label: Some("Activity".to_string()),
                    color: Rgb::BLUE,
                    shape: LedShape::Rectangular,
                    ratio: 2.0,
                    clickable: true,
                    ..Default::default()
                },
            ],
        }
    }
}

impl AppConfig {
    /// Load the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> LedResult<Self> {
        let config: AppConfig = load_json(path)?;
        for led in &config.leds {
            led.validate()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledkit_core::LedError;

    #[test]
    fn test_default_leds_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.leds.len(), 4);
        assert!(config.leds.iter().all(|led| led.validate().is_ok()));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        std::fs::write(
            &path,
            r##"{ "title": "Rack", "leds": [ { "color": "#00ff00", "label": "A" } ] }"##,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.title, "Rack");
        assert_eq!(config.width, 640);
        assert_eq!(config.leds[0].color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_load_rejects_bad_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        std::fs::write(&path, r#"{ "leds": [ { "ratio": -2.0 } ] }"#).unwrap();
        assert!(matches!(AppConfig::load(&path), Err(LedError::InvalidRatio(_))));
    }
}
