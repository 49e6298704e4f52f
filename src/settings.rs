//! Game settings
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_RADIUS, PIXELS_PER_METER, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Settings loading/validation errors
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "Malformed settings: {}", e),
            SettingsError::Invalid(reason) => write!(f, "Invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Physics ===
    /// Gravity (m/s², converted to px/s²)
    pub gravity_mps2: f64,
    /// Wind is drawn per throw from [-max, +max] (m/s²)
    pub max_wind_mps2: f64,
    pub pixels_per_meter: f64,
    /// Radius used when carving buildings (pixels)
    pub explosion_radius: f64,

    // === Throw jitter ===
    /// Random angle offset range (± degrees)
    pub angle_jitter_deg: f64,
    /// Random power offset range (± units)
    pub power_jitter: f64,

    // === Presentation ===
    /// Banana spin rate (rotations per minute)
    pub banana_rpm: f64,

    // === Session ===
    /// Fixed seed for reproducible matches; random when absent
    pub seed: Option<u64>,
    /// Frame step used by the headless driver (seconds)
    pub frame_dt: f64,
    /// Throws before the headless driver abandons a round
    pub max_throws_per_round: u32,
    /// Rounds played by the headless driver
    pub rounds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            gravity_mps2: 9.8,
            max_wind_mps2: 2.0,
            pixels_per_meter: PIXELS_PER_METER,
            explosion_radius: EXPLOSION_RADIUS,

            angle_jitter_deg: 5.0,
            power_jitter: 5.0,

            banana_rpm: 120.0,

            seed: None,
            frame_dt: 1.0 / 60.0,
            max_throws_per_round: 40,
            rounds: 3,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if !(self.pixels_per_meter > 0.0) {
            return Err(SettingsError::Invalid("pixels_per_meter must be positive".into()));
        }
        if !(self.banana_rpm > 0.0) {
            return Err(SettingsError::Invalid("banana_rpm must be positive".into()));
        }
        if !(self.frame_dt > 0.0) {
            return Err(SettingsError::Invalid("frame_dt must be positive".into()));
        }
        if self.explosion_radius < 0.0 || self.max_wind_mps2 < 0.0 {
            return Err(SettingsError::Invalid(
                "explosion_radius and max_wind_mps2 must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Gravity in px/s²
    pub fn gravity_px(&self) -> f64 {
        crate::meters_to_pixels(self.gravity_mps2, self.pixels_per_meter)
    }
}
