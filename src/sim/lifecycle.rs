//! Scoring and lifecycle state machine
//!
//! `Playing --brick--> Playing` (score + 1)
//! `Playing --full clear--> Celebrating` (ball/paddle hidden, reset scheduled)
//! `Celebrating --delay elapsed--> Playing` (reset)
//! `Playing --floor--> Playing` (score 0, bricks shown, "try again" raised)

use super::state::{Ball, GameEvent, GamePhase, GameState, Paddle, ResetReason};

/// A reset waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledReset {
    pub token: u64,
    pub due_ms: f64,
}

/// One-shot deferred reset with monotonic tokens.
///
/// Cancelling drops the pending entry, so a manual reset issued during the
/// celebration pause is never followed by a second, scheduled one.
#[derive(Debug, Clone, Default)]
pub struct ResetScheduler {
    next_token: u64,
    pending: Option<ScheduledReset>,
}

impl ResetScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reset `delay_ms` after `now_ms`, replacing any pending one
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.pending = Some(ScheduledReset {
            token,
            due_ms: now_ms + delay_ms,
        });
        token
    }

    pub fn cancel(&mut self) -> Option<ScheduledReset> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<ScheduledReset> {
        self.pending
    }

    /// Take the pending reset if it is due at `now_ms`
    pub fn take_due(&mut self, now_ms: f64) -> Option<ScheduledReset> {
        match self.pending {
            Some(reset) if now_ms >= reset.due_ms => self.pending.take(),
            _ => None,
        }
    }
}

impl GameState {
    /// Scoring callback for a destroyed brick
    pub(crate) fn on_brick_destroyed(&mut self, column: u32, row: u32) {
        self.score += 1;
        log::debug!("Brick ({}, {}) destroyed, score {}", column, row, self.score);
        self.push_event(GameEvent::BrickDestroyed {
            column,
            row,
            score: self.score,
        });

        let total = self.total_bricks();
        if total > 0 && self.score as usize == total && self.phase == GamePhase::Playing {
            self.begin_celebration();
        }
    }

    fn begin_celebration(&mut self) {
        debug_assert!(self.bricks.is_cleared(), "score reached total with bricks left");
        self.phase = GamePhase::Celebrating;
        self.ball.visible = false;
        self.paddle.visible = false;
        let token = self
            .scheduler
            .schedule(self.now_ms, self.settings.celebration_delay_ms);
        log::info!(
            "Full clear! score {} - reset #{} in {} ms",
            self.score,
            token,
            self.settings.celebration_delay_ms
        );
        self.push_event(GameEvent::FullClear { score: self.score });
    }

    /// Floor contact. Ball and paddle keep their positions until an
    /// explicit reset.
    pub(crate) fn on_ball_lost(&mut self) {
        let lost = self.score;
        self.bricks.show_all();
        self.score = 0;
        self.try_again_visible = true;

        // Effects repeat while the ball stays below the floor; report once
        if !self.ball_below_floor {
            log::info!("Ball lost with score {}", lost);
            self.push_event(GameEvent::BallLost { score: lost });
        }
    }

    /// Start a new game. Cancels any pending scheduled reset.
    pub fn reset(&mut self) {
        if let Some(pending) = self.scheduler.cancel() {
            log::debug!("Manual reset cancels scheduled reset #{}", pending.token);
        }
        self.restore_initial();
        log::info!("Game reset");
        self.push_event(GameEvent::Reset {
            reason: ResetReason::Manual,
        });
    }

    /// Run the scheduled reset if its delay has elapsed
    pub(crate) fn poll_scheduled_reset(&mut self) -> bool {
        match self.scheduler.take_due(self.now_ms) {
            Some(fired) => {
                self.restore_initial();
                log::info!("Scheduled reset #{} fired", fired.token);
                self.push_event(GameEvent::Reset {
                    reason: ResetReason::Scheduled,
                });
                true
            }
            None => false,
        }
    }

    /// Restore every entity to its starting values. Paddle velocity intent is
    /// left alone so a held key keeps working across the reset.
    pub(crate) fn restore_initial(&mut self) {
        let paddle_dx = self.paddle.dx;
        self.paddle = Paddle::new(&self.settings);
        self.paddle.dx = paddle_dx;
        self.ball = Ball::new(&self.settings);
        self.score = 0;
        self.bricks.show_all();
        self.try_again_visible = false;
        self.phase = GamePhase::Playing;
        self.ball_below_floor = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    /// State right before scoring the last brick: the tick has already
    /// hidden every brick, one point is still to be awarded
    fn last_brick_hit(state: &mut GameState) {
        for brick in state.bricks.iter_mut() {
            brick.visible = false;
        }
        state.score = state.total_bricks() as u32 - 1;
    }

    #[test]
    fn test_scheduler_fires_only_when_due() {
        let mut scheduler = ResetScheduler::new();
        let token = scheduler.schedule(1000.0, 500.0);
        assert_eq!(token, 1);
        assert!(scheduler.take_due(1499.0).is_none());
        let fired = scheduler.take_due(1500.0).unwrap();
        assert_eq!(fired.token, 1);
        assert!(scheduler.take_due(2000.0).is_none());
    }

    #[test]
    fn test_scheduler_tokens_are_monotonic() {
        let mut scheduler = ResetScheduler::new();
        let a = scheduler.schedule(0.0, 10.0);
        scheduler.cancel();
        let b = scheduler.schedule(0.0, 10.0);
        assert!(b > a);
        assert_eq!(scheduler.pending().unwrap().token, b);
    }

    #[test]
    fn test_brick_awards_one_point() {
        let mut state = GameState::new(Settings::default());
        state.on_brick_destroyed(2, 3);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            state.events(),
            &[GameEvent::BrickDestroyed {
                column: 2,
                row: 3,
                score: 1
            }]
        );
    }

    #[test]
    fn test_full_clear_enters_celebration() {
        let mut state = GameState::new(Settings::default());
        state.now_ms = 1000.0;
        last_brick_hit(&mut state);

        state.on_brick_destroyed(8, 4);
        assert_eq!(state.score, 45);
        assert_eq!(state.phase, GamePhase::Celebrating);
        assert!(!state.ball.visible);
        assert!(!state.paddle.visible);
        assert_eq!(state.scheduler.pending().unwrap().due_ms, 1500.0);
        assert_eq!(
            state.drain_events().last(),
            Some(&GameEvent::FullClear { score: 45 })
        );
    }

    #[test]
    fn test_scheduled_reset_restores_game() {
        let mut state = GameState::new(Settings::default());
        state.now_ms = 1000.0;
        last_brick_hit(&mut state);
        state.on_brick_destroyed(8, 4);
        state.drain_events();

        state.now_ms = 1400.0;
        assert!(!state.poll_scheduled_reset());
        assert_eq!(state.phase, GamePhase::Celebrating);

        state.now_ms = 1500.0;
        assert!(state.poll_scheduled_reset());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.ball.visible && state.paddle.visible);
        assert_eq!(state.bricks.visible_count(), 45);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Reset {
                reason: ResetReason::Scheduled
            }]
        );
    }

    #[test]
    fn test_manual_reset_cancels_scheduled_reset() {
        let mut state = GameState::new(Settings::default());
        state.now_ms = 1000.0;
        last_brick_hit(&mut state);
        state.on_brick_destroyed(8, 4);

        state.reset();
        assert!(state.scheduler.pending().is_none());
        state.drain_events();

        state.now_ms = 5000.0;
        assert!(!state.poll_scheduled_reset());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_ball_lost_keeps_positions() {
        let mut state = GameState::new(Settings::default());
        state.score = 7;
        state.bricks.iter_mut().take(7).for_each(|b| b.visible = false);
        state.ball.pos = Vec2::new(200.0, 595.0);
        let paddle_pos = state.paddle.pos;

        state.on_ball_lost();
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.visible_count(), 45);
        assert!(state.try_again_visible);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 595.0));
        assert_eq!(state.paddle.pos, paddle_pos);
        assert_eq!(state.events(), &[GameEvent::BallLost { score: 7 }]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(Settings::default());
        state.ball.pos = Vec2::new(12.0, 34.0);
        state.paddle.pos.x = 0.0;
        state.score = 3;
        state.try_again_visible = true;

        state.reset();
        let once = (
            state.ball.clone(),
            state.paddle.clone(),
            state.bricks.clone(),
            state.score,
            state.phase,
            state.try_again_visible,
        );
        state.reset();
        let twice = (
            state.ball.clone(),
            state.paddle.clone(),
            state.bricks.clone(),
            state.score,
            state.phase,
            state.try_again_visible,
        );
        assert_eq!(once, twice);
        assert!(!state.try_again_visible);
    }

    #[test]
    fn test_reset_keeps_paddle_intent() {
        let mut state = GameState::new(Settings::default());
        state.direction_pressed(crate::sim::Direction::Left);
        state.reset();
        assert_eq!(state.paddle.dx, -8.0);
    }
}
