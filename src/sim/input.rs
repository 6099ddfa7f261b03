//! Directional input → paddle velocity intent

use serde::{Deserialize, Serialize};

use crate::settings::KeyHandling;

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a browser `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Right" | "ArrowRight" => Some(Direction::Right),
            "Left" | "ArrowLeft" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Unit sign of the direction along x
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Tracks key state and resolves it into a single direction intent
#[derive(Debug, Clone)]
pub struct Controls {
    mode: KeyHandling,
    /// Held directions, oldest first (HeldKeys mode only)
    held: Vec<Direction>,
    intent: Option<Direction>,
}

impl Controls {
    pub fn new(mode: KeyHandling) -> Self {
        Self {
            mode,
            held: Vec::with_capacity(2),
            intent: None,
        }
    }

    /// Current direction intent
    pub fn intent(&self) -> Option<Direction> {
        self.intent
    }

    /// Key-down for a direction; returns the new intent
    pub fn press(&mut self, direction: Direction) -> Option<Direction> {
        match self.mode {
            KeyHandling::LastEventWins => {
                self.intent = Some(direction);
            }
            KeyHandling::HeldKeys => {
                // Key repeat re-sends presses; keep one entry, newest last
                self.held.retain(|d| *d != direction);
                self.held.push(direction);
                self.intent = self.held.last().copied();
            }
        }
        self.intent
    }

    /// Key-up for a direction; returns the new intent
    pub fn release(&mut self, direction: Direction) -> Option<Direction> {
        match self.mode {
            KeyHandling::LastEventWins => {
                // Either key stops the paddle, even if the other is still held
                self.intent = None;
            }
            KeyHandling::HeldKeys => {
                self.held.retain(|d| *d != direction);
                self.intent = self.held.last().copied();
            }
        }
        self.intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Right"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("Left"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowUp"), None);
        assert_eq!(Direction::from_key("a"), None);
    }

    #[test]
    fn test_last_event_wins() {
        let mut controls = Controls::new(KeyHandling::LastEventWins);
        assert_eq!(controls.press(Direction::Right), Some(Direction::Right));
        assert_eq!(controls.press(Direction::Left), Some(Direction::Left));

        // Releasing the older key still stops the paddle
        assert_eq!(controls.release(Direction::Right), None);
        assert_eq!(controls.intent(), None);
    }

    #[test]
    fn test_last_event_wins_release_of_unheld_key_stops() {
        let mut controls = Controls::new(KeyHandling::LastEventWins);
        controls.press(Direction::Left);
        assert_eq!(controls.release(Direction::Right), None);
    }

    #[test]
    fn test_held_keys_falls_back_to_still_held() {
        let mut controls = Controls::new(KeyHandling::HeldKeys);
        controls.press(Direction::Right);
        assert_eq!(controls.press(Direction::Left), Some(Direction::Left));
        assert_eq!(controls.release(Direction::Left), Some(Direction::Right));
        assert_eq!(controls.release(Direction::Right), None);
    }

    #[test]
    fn test_held_keys_repeat_press_is_single_entry() {
        let mut controls = Controls::new(KeyHandling::HeldKeys);
        controls.press(Direction::Right);
        controls.press(Direction::Right);
        controls.press(Direction::Right);
        assert_eq!(controls.release(Direction::Right), None);
    }

    #[test]
    fn test_held_keys_release_older_keeps_newer() {
        let mut controls = Controls::new(KeyHandling::HeldKeys);
        controls.press(Direction::Right);
        controls.press(Direction::Left);
        assert_eq!(controls.release(Direction::Right), Some(Direction::Left));
    }
}
