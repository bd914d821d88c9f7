//! WebGPU render pipeline setup

use wgpu::util::DeviceExt;

use super::scene::Scene;
use super::shapes;
use super::vertex::Vertex;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Map a play-field point (top-left origin, y down) to normalized device
/// coordinates for a `width x height` viewport. The field is letterboxed so
/// it keeps its aspect ratio.
pub fn field_to_ndc(x: f32, y: f32, width: u32, height: u32) -> (f32, f32) {
    let viewport_aspect = width as f32 / height.max(1) as f32;
    let field_aspect = SCREEN_WIDTH / SCREEN_HEIGHT;

    // Fraction of each NDC axis the field occupies
    let (sx, sy) = if viewport_aspect > field_aspect {
        // Wider than the field: bars left and right
        (field_aspect / viewport_aspect, 1.0)
    } else {
        // Taller than the field: bars top and bottom
        (1.0, viewport_aspect / field_aspect)
    };

    let nx = (x / SCREEN_WIDTH) * 2.0 - 1.0;
    let ny = 1.0 - (y / SCREEN_HEIGHT) * 2.0;
    (nx * sx, ny * sy)
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
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
                label: Some("arcade-shooter-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Placeholder; replaced every frame
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the scene's rectangles and draw them
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let (w, h) = self.size;
        let ndc_vertices: Vec<Vertex> = shapes::scene_vertices(scene)
            .into_iter()
            .map(|v| {
                let (x, y) = field_to_ndc(v.position[0], v.position[1], w, h);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // wgpu rejects zero-sized buffers; keep the old one when nothing is drawn
        if !ndc_vertices.is_empty() {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        let [r, g, b, a] = scene.clear_color;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
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
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
    }

    #[test]
    fn test_ndc_matching_aspect() {
        assert!(close(field_to_ndc(0.0, 0.0, 800, 600), (-1.0, 1.0)));
        assert!(close(field_to_ndc(800.0, 600.0, 800, 600), (1.0, -1.0)));
        assert!(close(field_to_ndc(400.0, 300.0, 1600, 1200), (0.0, 0.0)));
    }

    #[test]
    fn test_ndc_letterbox_wide_viewport() {
        // 16:10 viewport, 4:3 field: horizontal bars
        let (x, y) = field_to_ndc(0.0, 0.0, 1600, 1000);
        assert!(x > -1.0);
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ndc_letterbox_tall_viewport() {
        let (x, y) = field_to_ndc(800.0, 600.0, 600, 800);
        assert!((x - 1.0).abs() < 1e-5);
        assert!(y > -1.0);
    }
}
