//! Flat-colored vertex consumed by `shader.wgsl`
//!
//! Shapes are built in field coordinates; the pipeline rewrites `position`
//! into NDC right before upload.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// `@location(0)` position, `@location(1)` color
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same color at a new position
    pub fn moved_to(self, (x, y): (f32, f32)) -> Self {
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Palette: one accent for everything that moves or breaks, on a light field
pub mod colors {
    const ACCENT: [f32; 4] = [0.0, 0.584, 0.867, 1.0];

    pub const BALL: [f32; 4] = ACCENT;
    pub const PADDLE: [f32; 4] = ACCENT;
    pub const BRICK: [f32; 4] = ACCENT;
    pub const BACKGROUND: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(10.0, 20.0, colors::BRICK).moved_to((-0.5, 0.25));
        assert_eq!(v.position, [-0.5, 0.25]);
        assert_eq!(v.color, colors::BRICK);
    }
}
