use std::iter;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, event::WindowEvent};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::primitives::camera::{CameraRig, CameraUniform, PlaneUniform, Projection};
use crate::primitives::controller::CameraController;
use crate::primitives::texture::{DepthBuffer, Texture};
use crate::primitives::tri_mesh::TriMesh;
use crate::primitives::vertex::{self, PlaneVertex, PLANE_INDICES, PLANE_VERTICES};
use crate::process::pipeline::{self, PipelineDesc};
use crate::{GpuContext, Renderer};

pub const OBJECT_SHADER: &str = "object.wgsl";
pub const PLANE_SHADER: &str = "plane.wgsl";

/// Object pass into an off-screen target, then a composite pass drawing that
/// target on a screen-aligned quad.
pub struct CompositeState {
    gpu: GpuContext,
    clear_color: wgpu::Color,
    color_offset: [f32; 3],

    // Object pass
    object_pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    texcoord_buffer: wgpu::Buffer,
    vertex_count: u32,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    diffuse_texture: Texture,
    diffuse_bind_group: wgpu::BindGroup,
    render_target: Texture,
    depth_texture: DepthBuffer,

    // Composite pass
    plane_pipeline: wgpu::RenderPipeline,
    plane_vertex_buffer: wgpu::Buffer,
    plane_index_buffer: wgpu::Buffer,
    plane_buffer: wgpu::Buffer,
    plane_bind_group: wgpu::BindGroup,
    target_layout: wgpu::BindGroupLayout,
    target_bind_group: wgpu::BindGroup,

    rig: CameraRig,
    camera_controller: CameraController,
    projection: Projection,
    plane_projection: Projection,
    model: Matrix4<f32>,
}

impl CompositeState {
    pub fn new(gpu: GpuContext, config: &ViewerConfig, mesh: &TriMesh) -> Result<Self> {
        let device = &gpu.device;
        let size = [gpu.size.width, gpu.size.height];

        let diffuse_texture = match mesh.diffuse_texture() {
            Some(name) => {
                let path = config.texture_path(name);
                log::info!("Loading diffuse texture: {}", path.display());
                Texture::from_path(device, &gpu.queue, &path)?
            }
            None => {
                log::warn!("No diffuse texture specified in the MTL file");
                Texture::solid(device, &gpu.queue, [255; 4], "white")
            }
        };

        let flat = mesh.flatten()?;
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Position Buffer"),
            contents: bytemuck::cast_slice(&flat.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Normal Buffer"),
            contents: bytemuck::cast_slice(&flat.normals),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let texcoord_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Texcoord Buffer"),
            contents: bytemuck::cast_slice(&flat.texcoords),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let rig = CameraRig::new(&config.camera);
        let projection = Projection::new(config, size[0] as f32 / size[1] as f32);
        let plane_projection = Projection::new(config, 1.0);
        let model = Matrix4::identity();

        let camera_buffer = CameraUniform::from(&rig.object, &projection, &model).to_buffer(device);
        let camera_layout =
            pipeline::uniform_layout(device, wgpu::ShaderStages::VERTEX, "camera_bind_group_layout");
        let camera_bind_group =
            pipeline::uniform_bind_group(device, &camera_layout, &camera_buffer, "camera_bind_group");

        let texture_layout = pipeline::texture_layout(device, "texture_bind_group_layout");
        let diffuse_bind_group =
            pipeline::texture_bind_group(device, &texture_layout, &diffuse_texture, "diffuse_bind_group");

        let render_target = Texture::render_target(device, size, "render_target");
        let depth_texture = DepthBuffer::new(device, size, "depth_texture");

        let object_shader = pipeline::load_shader(device, &config.shader_path(OBJECT_SHADER))?;
        let object_pipeline = pipeline::create_render_pipeline(
            device,
            &PipelineDesc {
                label: "Object Pipeline",
                shader: &object_shader,
                bind_group_layouts: &[&camera_layout, &texture_layout],
                vertex_buffers: &[
                    vertex::position_layout(),
                    vertex::normal_layout(),
                    vertex::texcoord_layout(),
                ],
                color_format: Texture::COLOR_FORMAT,
                depth_test: true,
            },
        )?;

        let plane_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Plane Vertex Buffer"),
            contents: bytemuck::cast_slice(&PLANE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let plane_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Plane Index Buffer"),
            contents: bytemuck::cast_slice(&PLANE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let plane_buffer =
            PlaneUniform::from(&rig.plane, &plane_projection, config.color_offset).to_buffer(device);
        let plane_layout = pipeline::uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "plane_bind_group_layout",
        );
        let plane_bind_group =
            pipeline::uniform_bind_group(device, &plane_layout, &plane_buffer, "plane_bind_group");
        let target_bind_group =
            pipeline::texture_bind_group(device, &texture_layout, &render_target, "target_bind_group");

        let plane_shader = pipeline::load_shader(device, &config.shader_path(PLANE_SHADER))?;
        let plane_pipeline = pipeline::create_render_pipeline(
            device,
            &PipelineDesc {
                label: "Plane Pipeline",
                shader: &plane_shader,
                bind_group_layouts: &[&plane_layout, &texture_layout],
                vertex_buffers: &[PlaneVertex::desc()],
                color_format: gpu.config.format,
                depth_test: false,
            },
        )?;

        Ok(Self {
            clear_color: config.clear_color,
            color_offset: config.color_offset,
            object_pipeline,
            position_buffer,
            normal_buffer,
            texcoord_buffer,
            vertex_count: flat.vertex_count(),
            camera_buffer,
            camera_bind_group,
            diffuse_texture,
            diffuse_bind_group,
            render_target,
            depth_texture,
            plane_pipeline,
            plane_vertex_buffer,
            plane_index_buffer,
            plane_buffer,
            plane_bind_group,
            target_layout: texture_layout,
            target_bind_group,
            rig,
            camera_controller: CameraController::new(&config.camera, true),
            projection,
            plane_projection,
            model,
            gpu,
        })
    }
}

impl Renderer for CompositeState {
    fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if !self.gpu.resize(new_size) {
            return;
        }
        let size = [new_size.width, new_size.height];
        let device = &self.gpu.device;
        self.projection.resize(new_size.width, new_size.height);
        self.render_target = Texture::render_target(device, size, "render_target");
        self.depth_texture = DepthBuffer::new(device, size, "depth_texture");
        self.target_bind_group = pipeline::texture_bind_group(
            device,
            &self.target_layout,
            &self.render_target,
            "target_bind_group",
        );
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        self.camera_controller.process_events(event, &mut self.rig)
    }

    fn update(&mut self) {
        let queue = &self.gpu.queue;
        CameraUniform::from(&self.rig.object, &self.projection, &self.model)
            .update_buffer(&self.camera_buffer, queue);
        PlaneUniform::from(&self.rig.plane, &self.plane_projection, self.color_offset)
            .update_buffer(&self.plane_buffer, queue);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut object_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Object Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.render_target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            object_pass.set_pipeline(&self.object_pipeline);
            object_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            object_pass.set_bind_group(1, &self.diffuse_bind_group, &[]);
            object_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            object_pass.set_vertex_buffer(1, self.normal_buffer.slice(..));
            object_pass.set_vertex_buffer(2, self.texcoord_buffer.slice(..));
            object_pass.draw(0..self.vertex_count, 0..1);
        }

        {
            let mut composite_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Composite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            composite_pass.set_pipeline(&self.plane_pipeline);
            composite_pass.set_bind_group(0, &self.plane_bind_group, &[]);
            composite_pass.set_bind_group(1, &self.target_bind_group, &[]);
            composite_pass.set_vertex_buffer(0, self.plane_vertex_buffer.slice(..));
            composite_pass.set_index_buffer(self.plane_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            composite_pass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
        }

        self.gpu.queue.submit(iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
