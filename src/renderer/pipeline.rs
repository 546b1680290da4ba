//! wgpu setup for drawing board-pixel triangles
//!
//! Vertices stay in board pixels; the vertex shader maps them to clip space
//! with a small view uniform so the board stays centered and square.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::vertex::{Vertex, colors};

/// Vertices the buffer starts with; grows by doubling
const INITIAL_VERTEX_CAPACITY: u64 = 4096;

/// Viewport mapping shared with `shader.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    /// Surface size in pixels
    pub viewport: [f32; 2],
    /// Top-left corner of the board inside the surface
    pub origin: [f32; 2],
}

impl ViewUniform {
    pub fn new(size: (u32, u32)) -> Self {
        let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
        let board = w.min(h);
        Self {
            viewport: [w, h],
            origin: [((w - board) / 2.0).floor(), ((h - board) / 2.0).floor()],
        }
    }

    /// CPU copy of the shader's mapping
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let px = (x + self.origin[0]) / self.viewport[0];
        let py = (y + self.origin[1]) / self.viewport[1];
        (px * 2.0 - 1.0, 1.0 - py * 2.0)
    }
}

/// GPU objects for the board
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    view_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
    vertices: wgpu::Buffer,
    vertex_capacity: u64,
    vertex_count: u32,
    /// Surface size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("snake_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        // Palette values are already sRGB-encoded
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: Vec::new(),
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &surface_config);

        let size = (surface_config.width, surface_config.height);
        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("view_uniform"),
            contents: bytemuck::bytes_of(&ViewUniform::new(size)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let view_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("view_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("view_bind_group"),
            layout: &view_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        let pipeline = build_pipeline(&device, format, &view_layout);
        let vertices = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            view_buffer,
            view_bind_group,
            vertices,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            size,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::bytes_of(&ViewUniform::new(self.size)),
        );
    }

    /// Side of the square board in surface pixels
    pub fn board_px(&self) -> f32 {
        self.size.0.min(self.size.1) as f32
    }

    fn upload(&mut self, frame: &[Vertex]) {
        let needed = frame.len() as u64;
        if needed > self.vertex_capacity {
            let mut capacity = self.vertex_capacity;
            while capacity < needed {
                capacity *= 2;
            }
            log::debug!("Growing vertex buffer to {} vertices", capacity);
            self.vertices = vertex_buffer(&self.device, capacity);
            self.vertex_capacity = capacity;
        }
        self.queue
            .write_buffer(&self.vertices, 0, bytemuck::cast_slice(frame));
        self.vertex_count = frame.len() as u32;
    }

    /// Draw one frame of board-pixel triangles
    pub fn render(&mut self, frame: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.upload(frame);

        let target = self.surface.get_current_texture()?;
        let view = target.texture.create_view(&Default::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("board_encoder"),
            });

        let [r, g, b, _] = colors::BACKGROUND;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("board_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.view_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertices.slice(..));
                pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        target.present();
        Ok(())
    }
}

fn vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("board_vertices"),
        size: capacity * std::mem::size_of::<Vertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    view_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("board_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("board_layout"),
        bind_group_layouts: &[view_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("board_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        // Triangle list, no culling
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_viewport() {
        let view = ViewUniform::new((400, 400));
        assert_eq!(view.origin, [0.0, 0.0]);
        assert_eq!(view.to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(view.to_ndc(400.0, 400.0), (1.0, -1.0));
        assert_eq!(view.to_ndc(200.0, 200.0), (0.0, 0.0));
    }

    #[test]
    fn test_wide_viewport_centers_board() {
        let view = ViewUniform::new((800, 400));
        assert_eq!(view.origin, [200.0, 0.0]);
        assert_eq!(view.to_ndc(0.0, 0.0), (-0.5, 1.0));
        assert_eq!(view.to_ndc(400.0, 0.0).0, 0.5);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<ViewUniform>(), 16);
    }
}
