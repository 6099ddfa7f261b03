//! Demo mode: steers the paddle toward the ball
//!
//! Works purely through press/release events, so it obeys whatever key
//! handling mode the game is configured with.

use crate::driver::InputEvent;
use crate::sim::{Direction, GameState};

/// Paddle centre within this distance of the ball is "close enough"
const DEAD_ZONE: f32 = 6.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: Option<Direction>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the autopilot is currently holding
    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Direction that moves the paddle centre toward the ball
    fn desired(state: &GameState) -> Option<Direction> {
        let paddle_center = state.paddle.pos.x + state.paddle.width / 2.0;
        let offset = state.ball.pos.x - paddle_center;
        if offset > DEAD_ZONE {
            Some(Direction::Right)
        } else if offset < -DEAD_ZONE {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Events needed to move from the held direction to the desired one.
    /// Empty when nothing changes.
    pub fn steer(&mut self, state: &GameState) -> Vec<InputEvent> {
        let desired = Self::desired(state);
        if desired == self.held {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.held {
            events.push(InputEvent::Released(previous));
        }
        if let Some(next) = desired {
            events.push(InputEvent::Pressed(next));
        }
        self.held = desired;
        events
    }

    /// Release anything still held (when the player takes over)
    pub fn disengage(&mut self) -> Option<InputEvent> {
        self.held.take().map(InputEvent::Released)
    }
}
