use std::iter;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, event::WindowEvent};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::primitives::camera::{CameraRig, CameraTarget, CameraUniform, Projection};
use crate::primitives::controller::CameraController;
use crate::primitives::texture::DepthBuffer;
use crate::primitives::tri_mesh::TriMesh;
use crate::primitives::vertex;
use crate::process::pipeline::{self, PipelineDesc};
use crate::{GpuContext, Renderer};

pub const SHADER: &str = "teapot.wgsl";

/// Single pass: the indexed mesh straight to the window.
pub struct SimpleState {
    gpu: GpuContext,
    clear_color: wgpu::Color,
    render_pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_texture: DepthBuffer,
    rig: CameraRig,
    camera_controller: CameraController,
    projection: Projection,
    model: Matrix4<f32>,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl SimpleState {
    pub fn new(gpu: GpuContext, config: &ViewerConfig, mesh: &TriMesh) -> Result<Self> {
        let device = &gpu.device;
        let indexed = mesh.indexed()?;

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Position Buffer"),
            contents: bytemuck::cast_slice(&indexed.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Normal Buffer"),
            contents: bytemuck::cast_slice(&indexed.normals),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&indexed.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let rig = CameraRig::new(&config.camera);
        let projection = Projection::new(config, gpu.size.width as f32 / gpu.size.height as f32);
        let model = Matrix4::identity();
        let camera_uniform = CameraUniform::from(&rig.object, &projection, &model);
        let camera_buffer = camera_uniform.to_buffer(device);

        let camera_bind_group_layout =
            pipeline::uniform_layout(device, wgpu::ShaderStages::VERTEX, "camera_bind_group_layout");
        let camera_bind_group = pipeline::uniform_bind_group(
            device,
            &camera_bind_group_layout,
            &camera_buffer,
            "camera_bind_group",
        );

        let shader = pipeline::load_shader(device, &config.shader_path(SHADER))?;
        let render_pipeline = pipeline::create_render_pipeline(
            device,
            &PipelineDesc {
                label: "Teapot Pipeline",
                shader: &shader,
                bind_group_layouts: &[&camera_bind_group_layout],
                vertex_buffers: &[vertex::position_layout(), vertex::normal_layout()],
                color_format: gpu.config.format,
                depth_test: true,
            },
        )?;

        let depth_texture = DepthBuffer::new(device, [gpu.size.width, gpu.size.height], "depth_texture");

        Ok(Self {
            clear_color: config.clear_color,
            render_pipeline,
            position_buffer,
            normal_buffer,
            index_buffer,
            index_count: indexed.index_count(),
            depth_texture,
            rig,
            camera_controller: CameraController::new(&config.camera, false),
            projection,
            model,
            camera_buffer,
            camera_bind_group,
            gpu,
        })
    }
}

impl Renderer for SimpleState {
    fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if self.gpu.resize(new_size) {
            self.projection.resize(new_size.width, new_size.height);
            self.depth_texture =
                DepthBuffer::new(&self.gpu.device, [new_size.width, new_size.height], "depth_texture");
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        self.camera_controller.process_events(event, &mut self.rig)
    }

    fn update(&mut self) {
        let camera = self.rig.get(CameraTarget::Object);
        let uniform = CameraUniform::from(camera, &self.projection, &self.model);
        uniform.update_buffer(&self.camera_buffer, &self.gpu.queue);
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
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.normal_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        self.gpu.queue.submit(iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
