//! Per-frame simulation tick
//!
//! Velocities are in pixels per frame, so one tick is one rendered frame.
//! There is no fixed-timestep correction.

use super::state::{GamePhase, GameState};

/// Advance the game by one frame at driver time `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) {
    state.now_ms = now_ms;
    state.time_ticks += 1;

    if state.poll_scheduled_reset() {
        return;
    }

    // Celebration freezes the (hidden) ball and paddle until the reset
    if state.phase == GamePhase::Celebrating {
        return;
    }

    move_paddle(state);
    move_ball(state);
}

/// Apply paddle velocity and clamp into the field
fn move_paddle(state: &mut GameState) {
    let field_width = state.settings.field.width;
    let paddle = &mut state.paddle;
    paddle.pos.x += paddle.dx;
    paddle.clamp_to_field(field_width);
}

/// Apply ball velocity and resolve collisions in order:
/// side walls, top wall, paddle, bricks, floor
fn move_ball(state: &mut GameState) {
    let field = state.settings.field;

    state.ball.pos += state.ball.vel;

    let bounds = state.ball.bounds();

    if bounds.crosses_side_walls(field.width) {
        state.ball.vel.x = -state.ball.vel.x;
    }

    if bounds.crosses_top() {
        state.ball.vel.y = -state.ball.vel.y;
    }

    // Paddle bounce always launches upward at a fixed speed
    let paddle = state.paddle.bounds();
    if bounds.within_span_x(&paddle) && bounds.bottom_past(&paddle) {
        state.ball.vel.y = -state.ball.launch_speed;
    }

    // Every overlapping brick counts, even several in the same tick
    let mut destroyed = Vec::new();
    for brick in state.bricks.iter_mut().filter(|b| b.visible) {
        if bounds.hits(&brick.bounds()) {
            state.ball.vel.y = -state.ball.vel.y;
            brick.visible = false;
            destroyed.push((brick.column, brick.row));
        }
    }
    for (column, row) in destroyed {
        state.on_brick_destroyed(column, row);
    }

    let below_floor = bounds.crosses_floor(field.height);
    if below_floor {
        state.on_ball_lost();
    }
    state.ball_below_floor = below_floor;
}
