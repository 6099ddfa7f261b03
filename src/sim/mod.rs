//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - One tick per rendered frame, velocities in pixels per frame
//! - Stable iteration order (brick grid is column-major)
//! - Time enters only through the driver clock passed to `tick`

pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use geometry::Aabb;
pub use input::{Controls, Direction};
pub use lifecycle::{ResetScheduler, ScheduledReset};
pub use state::{
    Ball, Brick, BrickGrid, GameEvent, GamePhase, GameState, Paddle, ResetReason,
};
pub use tick::tick;
