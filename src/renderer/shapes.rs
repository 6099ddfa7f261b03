//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in field coordinates
//! (origin top-left, y down). The pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Segments used for the ball outline
pub const BALL_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(top_left: Vec2, width: f32, height: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (x0 + width, y0 + height);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Build the frame: visible bricks, paddle and ball. Hidden entities are
/// skipped entirely.
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices =
        Vec::with_capacity(state.bricks.visible_count() * 6 + 6 + (BALL_SEGMENTS * 3) as usize);

    for brick in state.bricks.iter().filter(|b| b.visible) {
        vertices.extend(rect(brick.pos, brick.width, brick.height, colors::BRICK));
    }

    let paddle = &state.paddle;
    if paddle.visible {
        vertices.extend(rect(paddle.pos, paddle.width, paddle.height, colors::PADDLE));
    }

    let ball = &state.ball;
    if ball.visible {
        vertices.extend(circle(ball.pos, ball.radius, colors::BALL, BALL_SEGMENTS));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), 30.0, 5.0, colors::BRICK);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 100.0);
        let v = circle(center, 10.0, colors::BALL, 16);
        assert_eq!(v.len(), 48);
        for vertex in v {
            let p = Vec2::from(vertex.position);
            assert!((p - center).length() <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_scene_skips_hidden_entities() {
        let mut state = GameState::new(Settings::default());
        let full = scene(&state).len();
        assert_eq!(full, 45 * 6 + 6 + (BALL_SEGMENTS * 3) as usize);

        state.ball.visible = false;
        state.paddle.visible = false;
        for brick in state.bricks.iter_mut().take(10) {
            brick.visible = false;
        }
        assert_eq!(scene(&state).len(), 35 * 6);
    }
}
