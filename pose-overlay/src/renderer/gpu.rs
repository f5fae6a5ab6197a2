//! WebGPU surface - batches skeleton shapes into one render pass
//!
//! Lines and joint markers are accumulated as vertices between `clear` and
//! `present`, then drawn in a single pass cleared to transparent so the
//! video underneath stays visible.

use super::shapes::{
    create_circle_vertices, create_line_vertices, map_to_clip_space, Vertex, CIRCLE_SEGMENTS,
};
use super::surface::{Color, DrawSurface};
use crate::error::OverlayError;
use web_sys::HtmlCanvasElement;

/// Vertex buffer capacity; a full 33-point skeleton needs ~1400
const MAX_VERTICES: usize = 4096;

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Holds all WebGPU state for the overlay canvas
pub struct GpuSurface {
    canvas: HtmlCanvasElement,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,

    // Pending batch (pixel space until present)
    vertices: Vec<Vertex>,
    line_width: f32,
    stroke: [f32; 4],
    fill: [f32; 4],
}

impl GpuSurface {
    /// Initialize WebGPU on a canvas: adapter, device, surface, pipeline
    pub async fn new(canvas: HtmlCanvasElement) -> Result<Self, OverlayError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| OverlayError::SurfaceCreationFailed(format!("{:?}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(OverlayError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Pose Overlay Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| OverlayError::DeviceCreationFailed(format!("{:?}", e)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| OverlayError::SurfaceCreationFailed("no supported format".into()))?;

        // Overlay must composite over the video element
        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skeleton Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skeleton Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Skeleton Vertex Buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            canvas,
            device,
            queue,
            surface,
            config,
            render_pipeline,
            vertex_buffer,
            vertices: Vec::with_capacity(MAX_VERTICES),
            line_width: 1.0,
            stroke: [1.0; 4],
            fill: [1.0; 4],
        })
    }
}

impl DrawSurface for GpuSurface {
    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Zero-sized configure is a validation error
        if width == 0 || height == 0 {
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width as f32;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color.to_f32_array();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color.to_f32_array();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.vertices.extend(create_line_vertices(
            from.0 as f32, from.1 as f32,
            to.0 as f32, to.1 as f32,
            self.line_width,
            self.stroke,
        ));
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64) {
        self.vertices.extend(create_circle_vertices(
            center.0 as f32,
            center.1 as f32,
            radius as f32,
            self.fill,
            CIRCLE_SEGMENTS,
        ));
    }

    fn present(&mut self) {
        let (width, height) = (self.config.width as f32, self.config.height as f32);

        if self.vertices.len() > MAX_VERTICES {
            log::warn!("Skeleton batch truncated: {} vertices", self.vertices.len());
            self.vertices.truncate(MAX_VERTICES - MAX_VERTICES % 3);
        }
        map_to_clip_space(&mut self.vertices, width, height);

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Overlay Encoder") }
        );

        if !self.vertices.is_empty() {
            self.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.vertices),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Skeleton Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.vertices.is_empty() {
                pass.set_pipeline(&self.render_pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..self.vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.vertices.clear();
    }
}
