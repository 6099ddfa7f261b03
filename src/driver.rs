//! Frame driver
//!
//! One frame = drain queued input, run one simulation tick, hand the state to
//! the render sink. Input that arrives between frames is queued in arrival
//! order, so it is always serialized against the tick.

use serde::Serialize;

use crate::autopilot::Autopilot;
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GameState, tick};

/// Input events the driver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A direction key went down
    Pressed(Direction),
    /// A direction key went up
    Released(Direction),
    /// "Try again" or any other external new-game trigger
    Reset,
}

/// Queue of input events, written by event handlers and drained each frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Receives the state once per frame, after the tick
pub trait FrameSink {
    fn present(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> FrameSink for F {
    fn present(&mut self, state: &GameState) {
        self(state)
    }
}

/// Sink that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _state: &GameState) {}
}

/// Owns the game state and runs frames
#[derive(Debug)]
pub struct FrameDriver {
    state: GameState,
    input: InputQueue,
    frames: u64,
}

impl FrameDriver {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(settings),
            input: InputQueue::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Queue an input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Run one frame at platform time `now_ms`. Returns the events the
    /// frame produced.
    pub fn frame(&mut self, now_ms: f64, sink: &mut impl FrameSink) -> Vec<GameEvent> {
        for event in self.input.drain() {
            self.apply_input(event);
        }

        tick(&mut self.state, now_ms);
        self.frames += 1;

        sink.present(&self.state);
        self.state.drain_events()
    }

    fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(direction) => self.state.direction_pressed(direction),
            InputEvent::Released(direction) => self.state.direction_released(direction),
            InputEvent::Reset => self.state.reset(),
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub bricks_destroyed: u32,
    pub full_clears: u32,
    pub balls_lost: u32,
    pub resets: u32,
    pub final_score: u32,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BrickDestroyed { .. } => self.bricks_destroyed += 1,
            GameEvent::FullClear { .. } => self.full_clears += 1,
            GameEvent::BallLost { .. } => self.balls_lost += 1,
            GameEvent::Reset { .. } => self.resets += 1,
        }
    }
}

/// Run `frames` frames on a simulated clock with the autopilot playing
pub fn run_headless(settings: Settings, frames: u64, frame_ms: f64) -> RunSummary {
    let mut driver = FrameDriver::new(settings);
    let mut pilot = Autopilot::new();
    let mut summary = RunSummary::default();

    for frame in 0..frames {
        for event in pilot.steer(driver.state()) {
            driver.push_input(event);
        }
        let now_ms = frame as f64 * frame_ms;
        for event in driver.frame(now_ms, &mut NullSink) {
            summary.record(&event);
        }
    }

    summary.frames = driver.frames();
    summary.final_score = driver.state().score;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ResetReason;
    use glam::Vec2;

    #[test]
    fn test_queue_push_and_drain() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Pressed(Direction::Left));
        queue.push(InputEvent::Reset);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![InputEvent::Pressed(Direction::Left), InputEvent::Reset]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_frame_renders_once_after_tick() {
        let mut driver = FrameDriver::new(Settings::default());
        let mut seen = Vec::new();
        let mut sink = |state: &GameState| seen.push((state.time_ticks, state.ball.pos));

        driver.frame(16.0, &mut sink);
        driver.frame(32.0, &mut sink);

        assert_eq!(
            seen,
            vec![
                (1, Vec2::new(404.0, 296.0)),
                (2, Vec2::new(408.0, 292.0)),
            ]
        );
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_input_applied_in_arrival_order_before_tick() {
        let mut driver = FrameDriver::new(Settings::default());
        driver.push_input(InputEvent::Pressed(Direction::Right));
        driver.push_input(InputEvent::Pressed(Direction::Left));
        assert_eq!(driver.pending_input(), 2);

        driver.frame(16.0, &mut NullSink);
        assert_eq!(driver.pending_input(), 0);
        assert_eq!(driver.state().paddle.pos.x, 352.0);

        // Releasing the other key still stops the paddle
        driver.push_input(InputEvent::Released(Direction::Right));
        driver.frame(32.0, &mut NullSink);
        assert_eq!(driver.state().paddle.pos.x, 352.0);
    }

    #[test]
    fn test_held_keys_paddle_falls_back_to_held_direction() {
        let settings = Settings {
            key_handling: crate::KeyHandling::HeldKeys,
            ..Settings::default()
        };
        let mut driver = FrameDriver::new(settings);
        driver.push_input(InputEvent::Pressed(Direction::Right));
        driver.push_input(InputEvent::Pressed(Direction::Left));
        driver.frame(16.0, &mut NullSink);
        assert_eq!(driver.state().paddle.dx, -8.0);
        assert_eq!(driver.state().paddle.pos.x, 352.0);

        // Right is still down, so releasing Left turns the paddle around
        driver.push_input(InputEvent::Released(Direction::Left));
        driver.frame(32.0, &mut NullSink);
        assert_eq!(driver.state().paddle.dx, 8.0);
        assert_eq!(driver.state().paddle.pos.x, 360.0);

        driver.push_input(InputEvent::Released(Direction::Right));
        driver.frame(48.0, &mut NullSink);
        assert_eq!(driver.state().paddle.dx, 0.0);
        assert_eq!(driver.state().paddle.pos.x, 360.0);
    }

    #[test]
    fn test_reset_input_returns_reset_event() {
        let mut driver = FrameDriver::new(Settings::default());
        driver.frame(16.0, &mut NullSink);

        driver.push_input(InputEvent::Reset);
        let events = driver.frame(32.0, &mut NullSink);
        assert_eq!(
            events,
            vec![GameEvent::Reset {
                reason: ResetReason::Manual
            }]
        );
        // Reset, then one tick of flight
        assert_eq!(driver.state().ball.pos, Vec2::new(404.0, 296.0));
    }

    #[test]
    fn test_headless_run_clears_grid() {
        let summary = run_headless(Settings::default(), 20_000, crate::consts::FRAME_MS);
        assert_eq!(summary.frames, 20_000);
        assert_eq!(summary.balls_lost, 0);
        assert!(summary.full_clears >= 1);
        // Every full clear is followed by its scheduled reset
        assert!(summary.resets >= summary.full_clears.saturating_sub(1));
        assert!(summary.bricks_destroyed >= 45);
    }
}
