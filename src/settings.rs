//! Game settings
//!
//! Every gameplay constant lives here so a layout can be tuned from JSON.
//! Persisted in LocalStorage on the web; read from a file by the native runner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON is malformed
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but describe an impossible layout
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// How directional key events map to paddle velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyHandling {
    /// Any press sets the direction, any release stops the paddle
    #[default]
    LastEventWins,
    /// Track held keys; the newest still-held direction wins
    HeldKeys,
}

impl KeyHandling {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyHandling::LastEventWins => "last_event_wins",
            KeyHandling::HeldKeys => "held_keys",
        }
    }
}

/// Playing field bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
}

impl FieldSettings {
    /// CSS size declaration so the page shows the field 1:1 in CSS pixels
    pub fn css_size(&self) -> String {
        format!("width: {}px; height: {}px;", self.width, self.height)
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Ball size and velocities (pixels per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub launch_speed: f32,
    pub start_dx: f32,
    pub start_dy: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            launch_speed: BALL_LAUNCH_SPEED,
            start_dx: BALL_START_DX,
            start_dy: BALL_START_DY,
        }
    }
}

/// Paddle size and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    pub floor_gap: f32,
    pub speed: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            floor_gap: PADDLE_FLOOR_GAP,
            speed: PADDLE_SPEED,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickSettings {
    pub columns: u32,
    pub rows: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for BrickSettings {
    fn default() -> Self {
        Self {
            columns: BRICK_COLUMNS,
            rows: BRICK_ROWS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_x: BRICK_OFFSET_X,
            offset_y: BRICK_OFFSET_Y,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
    pub bricks: BrickSettings,
    /// Pause after a full clear before the automatic reset (ms)
    pub celebration_delay_ms: f64,
    pub key_handling: KeyHandling,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            ball: BallSettings::default(),
            paddle: PaddleSettings::default(),
            bricks: BrickSettings::default(),
            celebration_delay_ms: CELEBRATION_DELAY_MS,
            key_handling: KeyHandling::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "breakout_settings";

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of bricks in the grid
    pub fn brick_count(&self) -> usize {
        (self.bricks.columns as usize).saturating_mul(self.bricks.rows as usize)
    }

    /// Reject layouts the simulation cannot represent
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("ball.radius", self.ball.radius),
            ("paddle.width", self.paddle.width),
            ("paddle.height", self.paddle.height),
            ("bricks.width", self.bricks.width),
            ("bricks.height", self.bricks.height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("ball.launch_speed", self.ball.launch_speed),
            ("paddle.floor_gap", self.paddle.floor_gap),
            ("paddle.speed", self.paddle.speed),
            ("bricks.padding", self.bricks.padding),
            ("bricks.offset_x", self.bricks.offset_x),
            ("bricks.offset_y", self.bricks.offset_y),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !(self.ball.start_dx.is_finite() && self.ball.start_dy.is_finite()) {
            return Err(SettingsError::Invalid(
                "ball start velocity must be finite".to_string(),
            ));
        }

        if self.bricks.columns == 0 || self.bricks.rows == 0 {
            return Err(SettingsError::Invalid(format!(
                "brick grid must have at least one brick, got {}x{}",
                self.bricks.columns, self.bricks.rows
            )));
        }

        let bricks = u64::from(self.bricks.columns) * u64::from(self.bricks.rows);
        if bricks > MAX_BRICKS as u64 {
            return Err(SettingsError::Invalid(format!(
                "bricks.columns x bricks.rows is {bricks}, limit is {MAX_BRICKS}"
            )));
        }

        if self.paddle.floor_gap > self.field.height {
            return Err(SettingsError::Invalid(format!(
                "paddle.floor_gap {} exceeds field.height {}",
                self.paddle.floor_gap, self.field.height
            )));
        }

        if self.paddle.width > self.field.width {
            return Err(SettingsError::Invalid(format!(
                "paddle.width {} exceeds field.width {}",
                self.paddle.width, self.field.width
            )));
        }

        if !(self.celebration_delay_ms.is_finite() && self.celebration_delay_ms >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "celebration_delay_ms must not be negative, got {}",
                self.celebration_delay_ms
            )));
        }

        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not save settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings store for key {}", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
