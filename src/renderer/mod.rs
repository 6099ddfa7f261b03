//! WebGPU rendering module
//!
//! Draws flat-colored triangles: rectangles for bricks and paddle, a fan for
//! the ball. Score and "try again" live in the DOM HUD, not here.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
