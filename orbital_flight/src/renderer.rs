//! Rendering system for the orbital flight binary
//!
//! Consumes body positions, the ship trail and thrust state from the
//! simulation and draws them through the world camera.

use common::{create_dynamic_buffer, create_uniform_buffer, Camera2D, CameraUniform, GraphicsContext, Vertex};
use glam::Vec2;
use wgpu::util::DeviceExt;

use orbital_flight::{CelestialBody, Simulation};

/// Instance data for one disc
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiscInstance {
    pub position: [f32; 3],
    pub radius: f32, // pixels
    pub color: [f32; 4],
}

impl DiscInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3,
        3 => Float32,
        4 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DiscInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    fn new(center: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            position: [center.x, center.y, 0.0],
            radius,
            color,
        }
    }
}

/// Quad vertex for instanced rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad vertices
const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

const TRAIL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const PLUME_COLOR: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
const PLUME_VERTICES: usize = 2;

/// How much of each buffer the last update filled
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderData {
    pub discs: u32,
    pub trail: u32,
    pub plume: bool,
}

pub struct Renderer {
    disc_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_discs: usize,
    trail_capacity: usize,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, camera: &Camera2D, max_discs: usize, trail_capacity: usize) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Orbit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/orbit.wgsl").into()),
        });

        let camera_buffer = create_uniform_buffer(device, &CameraUniform::from_camera_2d(camera));

        let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let color_target = [Some(wgpu::ColorTargetState {
            format: ctx.config.format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let disc_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Disc Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_instanced",
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), DiscInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_instanced",
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_line",
                compilation_options: Default::default(),
                buffers: &[Vertex::LAYOUT],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_line",
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = create_dynamic_buffer::<DiscInstance>(device, "Disc Instance Buffer", max_discs);
        // Trail points followed by the two plume vertices
        let line_buffer = create_dynamic_buffer::<Vertex>(device, "Line Buffer", trail_capacity + PLUME_VERTICES);

        Self {
            disc_pipeline,
            line_pipeline,
            quad_buffer,
            instance_buffer,
            line_buffer,
            camera_buffer,
            camera_bind_group,
            max_discs,
            trail_capacity,
        }
    }

    /// Upload camera, bodies, trail and plume for this frame
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera2D, sim: &Simulation) -> RenderData {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let ship = &sim.ship;
        let mut discs: Vec<DiscInstance> = sim
            .bodies
            .as_slice()
            .iter()
            .map(|body| body_disc(camera, body))
            .collect();
        discs.push(DiscInstance::new(
            camera.world_to_view(ship.position),
            ship.render_size * 0.5,
            ship.color,
        ));
        discs.truncate(self.max_discs);
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&discs));

        // Oldest points fade out
        let count = ship.trail.len().min(self.trail_capacity);
        let trail: Vec<Vertex> = ship
            .trail
            .iter()
            .skip(ship.trail.len() - count)
            .enumerate()
            .map(|(i, point)| {
                let alpha = 0.1 + 0.5 * (i as f32 + 1.0) / count as f32;
                let [r, g, b] = TRAIL_COLOR;
                Vertex::new(camera.world_to_view(*point), [r, g, b, alpha])
            })
            .collect();
        if !trail.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&trail));
        }

        let plume = ship.is_thrusting();
        if plume {
            let nozzle = camera.world_to_view(ship.position);
            let exhaust = nozzle - ship.thrust_direction.as_vec2() * ship.render_size;
            let vertices = [Vertex::new(nozzle, PLUME_COLOR), Vertex::new(exhaust, PLUME_COLOR)];
            let offset = (self.trail_capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress;
            queue.write_buffer(&self.line_buffer, offset, bytemuck::cast_slice(&vertices));
        }

        RenderData {
            discs: discs.len() as u32,
            trail: trail.len() as u32,
            plume,
        }
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, data: &RenderData) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.0,
                        g: 0.0,
                        b: 0.08,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        // Trail first so the ship appears on top
        render_pass.set_pipeline(&self.line_pipeline);
        render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
        if data.trail >= 2 {
            render_pass.draw(0..data.trail, 0..1);
        }
        if data.plume {
            let start = self.trail_capacity as u32;
            render_pass.draw(start..start + PLUME_VERTICES as u32, 0..1);
        }

        render_pass.set_pipeline(&self.disc_pipeline);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..data.discs);
    }
}

/// Bodies keep a minimum on-screen size, growing with zoom past it
fn body_disc(camera: &Camera2D, body: &CelestialBody) -> DiscInstance {
    let physical = (body.radius * camera.scale) as f32;
    let radius = physical.max(body.render_size * 0.5);
    DiscInstance::new(camera.world_to_view(body.position), radius, body.color)
}
