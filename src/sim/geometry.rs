//! Axis-aligned box tests shared by every collision check
//!
//! The ball is treated as its bounding box `[x-r, x+r] × [y-r, y+r]`.
//! All comparisons are strict: touching edges never count as contact.

use glam::Vec2;

/// Axis-aligned bounding box in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn from_rect(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + width,
            bottom: pos.y + height,
        }
    }

    /// Bounding box of a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            right: center.x + radius,
            bottom: center.y + radius,
        }
    }

    /// True if this box lies strictly within `other`'s horizontal span
    #[inline]
    pub fn within_span_x(&self, other: &Aabb) -> bool {
        self.left > other.left && self.right < other.right
    }

    /// True if this box's bottom edge is below `other`'s top edge
    #[inline]
    pub fn bottom_past(&self, other: &Aabb) -> bool {
        self.bottom > other.top
    }

    /// True if the two boxes overlap vertically
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.bottom > other.top && self.top < other.bottom
    }

    /// Contact test used for bricks: horizontally inside the target and
    /// overlapping it vertically
    #[inline]
    pub fn hits(&self, other: &Aabb) -> bool {
        self.within_span_x(other) && self.overlaps_y(other)
    }

    /// True if the box pokes out of the left or right side of `[0, width]`
    #[inline]
    pub fn crosses_side_walls(&self, width: f32) -> bool {
        self.right > width || self.left < 0.0
    }

    /// True if the box pokes above `y = 0`
    #[inline]
    pub fn crosses_top(&self) -> bool {
        self.top < 0.0
    }

    /// True if the box pokes below `y = height`
    #[inline]
    pub fn crosses_floor(&self, height: f32) -> bool {
        self.bottom > height
    }
}
