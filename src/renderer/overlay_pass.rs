//! Hover highlight overlay: a line-list pass over the hovered surface.
//!
//! The line buffer holds the world-space unique edges of one surface. It
//! is rebuilt only when [`HighlightOverlay::generation`] moves — pointer
//! motion within a surface and overlay hides never touch the GPU.

use wgpu::util::DeviceExt;

use super::context::RenderContext;
use super::mesh_pass::DEPTH_FORMAT;
use crate::options::HighlightOptions;
use crate::picking::HighlightOverlay;
use crate::scene::Scene;

const OVERLAY_SHADER: &str = include_str!("shaders/overlay.wgsl");

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayUniform {
    color: [f32; 3],
    opacity: f32,
}

/// Draws the wireframe highlight for the hovered surface.
pub struct OverlayPass {
    pipeline: wgpu::RenderPipeline,
    overlay_bind_group: wgpu::BindGroup,
    line_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    synced_generation: u64,
    enabled: bool,
}

impl OverlayPass {
    /// Build the line pipeline against the shared camera layout.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        options: &HighlightOptions,
    ) -> Self {
        let device = &context.device;

        let uniform = OverlayUniform {
            color: options.color,
            opacity: options.opacity,
        };
        let overlay_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Color Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let overlay_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Overlay Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let overlay_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Overlay Bind Group"),
                layout: &overlay_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: overlay_buffer.as_entire_binding(),
                }],
            });

        let shader = device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Overlay Shader"),
                source: wgpu::ShaderSource::Wgsl(OVERLAY_SHADER.into()),
            },
        );
        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Overlay Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &overlay_layout],
                immediate_size: 0,
            },
        );
        let pipeline = device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Overlay Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: 12,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0, // position
                        }],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    cull_mode: None,
                    ..Default::default()
                },
                // LessEqual without depth writes: edges shared with the
                // surface they trace pass the test instead of z-fighting.
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            overlay_bind_group,
            line_buffer: None,
            vertex_count: 0,
            synced_generation: 0,
            enabled: options.enabled,
        }
    }

    /// Rebuild the line buffer if the overlay retargeted since last sync.
    pub fn sync(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        overlay: &HighlightOverlay,
    ) {
        if overlay.generation() == self.synced_generation {
            return;
        }
        self.synced_generation = overlay.generation();

        let Some(id) = overlay.target() else {
            self.line_buffer = None;
            self.vertex_count = 0;
            return;
        };

        let surface = scene.surface(id);
        let transform = surface.transform();
        let mesh = surface.mesh();
        let mut lines: Vec<[f32; 3]> = Vec::new();
        for [a, b] in mesh.unique_edges() {
            for endpoint in [a, b] {
                let world = transform
                    .transform_point3(mesh.positions[endpoint as usize]);
                lines.push(world.to_array());
            }
        }

        self.vertex_count = lines.len() as u32;
        self.line_buffer = Some(context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Line Buffer"),
                contents: bytemuck::cast_slice(&lines),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        log::debug!(
            "overlay retargeted to {:?} ({} edges)",
            surface.name(),
            self.vertex_count / 2
        );
    }

    /// Record the overlay draw if it is visible this frame.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        overlay: &HighlightOverlay,
    ) {
        if !self.enabled || !overlay.visible() {
            return;
        }
        let Some(buffer) = &self.line_buffer else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.overlay_bind_group, &[]);
        render_pass.set_vertex_buffer(0, buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
