//! Board vertex format and palette

use bytemuck::{Pod, Zeroable};

/// Board-pixel position plus RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `VertexInput` in `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// `0xRRGGBB` to linear-ish RGBA floats
const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Retro palette
pub mod colors {
    use super::hex;

    pub const BACKGROUND: [f32; 4] = hex(0x12102c);
    pub const GRID_LINE: [f32; 4] = hex(0x1a1640);

    pub const HEAD_TOP: [f32; 4] = hex(0xb8a0ff);
    pub const HEAD_BASE: [f32; 4] = hex(0x8a72d6);
    pub const HEAD_OUTLINE: [f32; 4] = hex(0x2a1854);
    pub const BODY_TOP: [f32; 4] = hex(0x9b8aff);
    pub const BODY_BASE: [f32; 4] = hex(0x6b5cbe);
    pub const BODY_DARK: [f32; 4] = hex(0x4a3d8f);
    pub const BODY_OUTLINE: [f32; 4] = hex(0x1e1545);
    pub const BODY_GLINT: [f32; 4] = [200.0 / 255.0, 190.0 / 255.0, 1.0, 0.3];
    pub const EYE_WHITE: [f32; 4] = hex(0xf0ecff);
    pub const PUPIL: [f32; 4] = hex(0x1e1545);

    pub const EGG_SHELL: [f32; 4] = hex(0xf5f0e0);
    pub const EGG_OUTLINE: [f32; 4] = hex(0xb0a080);
    pub const EGG_YOLK: [f32; 4] = hex(0xe8943a);
    pub const EGG_YOLK_LIGHT: [f32; 4] = hex(0xf5c542);
    pub const EGG_HIGHLIGHT: [f32; 4] = hex(0xfffef5);
}
