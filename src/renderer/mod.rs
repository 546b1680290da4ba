//! Rendering
//!
//! The frame builder turns a [`FrameSnapshot`] into pixel-art triangles in
//! board pixels; [`RenderState`] uploads and draws them with wgpu.

pub mod frame;
pub mod pipeline;
pub mod sprites;
pub mod text;
pub mod vertex;

pub use frame::{FrameSnapshot, FrameStyle, build_frame};
pub use pipeline::RenderState;
pub use text::render_text;
pub use vertex::Vertex;
