use triangle_core::{INSTANCE_COUNT, VERTEX_COUNT};
use wgpu::{Device, RenderPipeline, TextureFormat, TextureView};

/// WGSL source carrying the two stage entry points, `vs_main` and `fs_main`.
pub const TRIANGLE_WGSL: &str = include_str!("../shaders/triangle.wgsl");

/// Render pipeline for the fixed triangle.
///
/// The vertex stage derives clip-space positions from `@builtin(vertex_index)`
/// alone, so the pipeline binds no vertex buffers and no resources: the
/// pipeline layout is empty and `record` never sets a bind group.
pub struct TrianglePass {
    pipeline: RenderPipeline,
}

impl TrianglePass {
    pub fn new(device: &Device, target_format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangle_shader"),
            source: wgpu::ShaderSource::Wgsl(TRIANGLE_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle_pl"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    // Covered pixels are written exactly once per draw, so the
                    // constant color simply overwrites the clear value.
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                // The fixed vertex order winds counter-clockwise.
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self { pipeline }
    }

    /// Record the single draw of the fixed triangle into `encoder`: clear
    /// `view` to `clear`, then draw 3 vertices, 1 instance, nothing bound.
    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &TextureView,
        clear: wgpu::Color,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("triangle_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.draw(0..VERTEX_COUNT, 0..INSTANCE_COUNT);
    }
}

// ---------------------------------------------------------------------------
// Tests — static shader checks, no GPU required
// ---------------------------------------------------------------------------
