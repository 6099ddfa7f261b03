//! Breakout - A classic single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (entities, physics step, scoring/lifecycle, input)
//! - `driver`: Per-frame loop that serializes input, physics and rendering
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Data-driven game constants
//! - `autopilot`: Demo mode that plays the game through regular input events

pub mod autopilot;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use driver::{FrameDriver, FrameSink, InputEvent};
pub use settings::{KeyHandling, Settings, SettingsError};

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Playing field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults - starts at the field centre heading up and right
    pub const BALL_RADIUS: f32 = 10.0;
    /// Fixed |dy| applied on every paddle bounce (pixels per frame)
    pub const BALL_LAUNCH_SPEED: f32 = 4.0;
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = -4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the paddle's top edge to the field floor
    pub const PADDLE_FLOOR_GAP: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: u32 = 9;
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_X: f32 = 45.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;
    /// Upper bound on columns x rows accepted from settings
    pub const MAX_BRICKS: usize = 4096;

    /// Pause between a full clear and the automatic reset (milliseconds)
    pub const CELEBRATION_DELAY_MS: f64 = 500.0;

    /// Nominal frame length used by the headless runner (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
