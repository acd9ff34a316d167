use crate::error::{DiaryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Configuration for diarist, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiaristConfig {
    /// Drawing buffer size in pixels
    pub canvas_width: u32,
    pub canvas_height: u32,

    /// Stroke color as `#rrggbb`
    pub stroke_color: String,
    pub stroke_width: f32,

    /// Color given to diaries created without one
    pub default_color: String,

    /// chrono format string for entry timestamps
    pub time_format: String,

    /// Show the newest entries first
    pub newest_first: bool,

    /// How many times an interactive PIN prompt is repeated
    pub pin_attempts: u32,
}

impl Default for DiaristConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 400,
            stroke_color: "#000000".to_string(),
            stroke_width: 2.0,
            default_color: "#ff0000".to_string(),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            newest_first: false,
            pin_attempts: 3,
        }
    }
}

pub const CONFIG_KEYS: &[&str] = &[
    "canvas-width",
    "canvas-height",
    "stroke-color",
    "stroke-width",
    "default-color",
    "time-format",
    "newest-first",
    "pin-attempts",
];

impl DiaristConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DiaryError::Io)?;
        let config: DiaristConfig =
            serde_json::from_str(&content).map_err(DiaryError::Serialization)?;
        Ok(config.sanitized())
    }

    /// Replaces hand-edited values that `set` would have rejected with their
    /// defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !is_valid_dimension(self.canvas_width) {
            tracing::warn!(value = self.canvas_width, "canvas-width out of range, using default");
            self.canvas_width = defaults.canvas_width;
        }
        if !is_valid_dimension(self.canvas_height) {
            tracing::warn!(value = self.canvas_height, "canvas-height out of range, using default");
            self.canvas_height = defaults.canvas_height;
        }
        if !(self.stroke_width > 0.0 && self.stroke_width.is_finite()) {
            tracing::warn!(value = self.stroke_width, "stroke-width out of range, using default");
            self.stroke_width = defaults.stroke_width;
        }
        self
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DiaryError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DiaryError::Serialization)?;
        fs::write(config_path, content).map_err(DiaryError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "canvas-width" => self.canvas_width.to_string(),
            "canvas-height" => self.canvas_height.to_string(),
            "stroke-color" => self.stroke_color.clone(),
            "stroke-width" => self.stroke_width.to_string(),
            "default-color" => self.default_color.clone(),
            "time-format" => self.time_format.clone(),
            "newest-first" => self.newest_first.to_string(),
            "pin-attempts" => self.pin_attempts.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "canvas-width" => self.canvas_width = parse_dimension(key, value)?,
            "canvas-height" => self.canvas_height = parse_dimension(key, value)?,
            "stroke-color" => {
                parse_hex_color(value).ok_or_else(|| format!("Invalid color: {}", value))?;
                self.stroke_color = value.to_string();
            }
            "stroke-width" => {
                let width: f32 = value
                    .parse()
                    .map_err(|_| format!("Invalid stroke width: {}", value))?;
                if !(width > 0.0 && width.is_finite()) {
                    return Err(format!("Stroke width must be positive: {}", value));
                }
                self.stroke_width = width;
            }
            "default-color" => self.default_color = value.to_string(),
            "time-format" => {
                if !crate::render::is_valid_time_format(value) {
                    return Err(format!("Invalid time format: {}", value));
                }
                self.time_format = value.to_string();
            }
            "newest-first" => {
                self.newest_first = value
                    .parse()
                    .map_err(|_| format!("Expected true or false: {}", value))?;
            }
            "pin-attempts" => {
                let attempts: u32 = value
                    .parse()
                    .map_err(|_| format!("Invalid number: {}", value))?;
                self.pin_attempts = attempts.max(1);
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn is_valid_dimension(n: u32) -> bool {
    (1..=MAX_CANVAS_SIDE).contains(&n)
}

fn parse_dimension(key: &str, value: &str) -> std::result::Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if is_valid_dimension(n) => Ok(n),
        _ => Err(format!(
            "{} must be an integer between 1 and {}: {}",
            key, MAX_CANVAS_SIDE, value
        )),
    }
}

/// Parses `#rgb` or `#rrggbb` into its components.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(rgb)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiaristConfig::default();
        assert_eq!(config.canvas_width, 600);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.stroke_color, "#000000");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DiaristConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, DiaristConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = DiaristConfig::default();
        config.set("canvas-width", "320").unwrap();
        config.set("newest-first", "true").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = DiaristConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.canvas_width, 320);
        assert!(loaded.newest_first);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"canvas-height": 200}"#,
        )
        .unwrap();

        let loaded = DiaristConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.canvas_height, 200);
        assert_eq!(loaded.canvas_width, 600);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = DiaristConfig::default();
        assert!(config.set("canvas-width", "0").is_err());
        assert!(config.set("stroke-color", "black").is_err());
        assert!(config.set("stroke-width", "-1").is_err());
        assert!(config.set("nope", "1").is_err());
        assert_eq!(config, DiaristConfig::default());
    }

    #[test]
    fn test_set_rejects_oversized_canvas() {
        let mut config = DiaristConfig::default();
        assert!(config.set("canvas-width", "4000000000").is_err());
        assert!(config.set("canvas-height", "8193").is_err());
        config.set("canvas-height", "8192").unwrap();
        assert_eq!(config.canvas_width, 600);
        assert_eq!(config.canvas_height, MAX_CANVAS_SIDE);
    }

    #[test]
    fn test_load_resets_out_of_range_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"canvas-width": 4000000000, "canvas-height": 0, "stroke-width": -3.0}"#,
        )
        .unwrap();

        let loaded = DiaristConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.canvas_width, 600);
        assert_eq!(loaded.canvas_height, 400);
        assert_eq!(loaded.stroke_width, 2.0);
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = DiaristConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#000"), Some([0, 0, 0]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
