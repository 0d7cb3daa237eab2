pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod primitives;
pub mod process;
pub mod render;

use winit::{
    event::*,
    dpi::{LogicalSize, PhysicalSize},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use config::ViewerConfig;
use error::{Result, ViewerError};

pub use render::composite::CompositeState;
pub use render::simple::SimpleState;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Window, surface and device shared by both viewers.
pub struct GpuContext {
    // Declared before `window` so it is dropped first.
    surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    window: Window,
}

impl GpuContext {
    pub async fn new(window: Window) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // SAFETY: the surface is stored next to the window it was created
        // from and dropped before it.
        let surface = unsafe { instance.create_surface(&window) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ViewerError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_format =
            choose_surface_format(&surface_caps.formats).ok_or(ViewerError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };

        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> bool {
        if new_size.width == 0 || new_size.height == 0 {
            return false;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }
}

/// Prefers a linear (non-sRGB) format so colours reach the screen as the
/// shaders write them.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// One viewer: owns its GPU resources and camera state.
pub trait Renderer {
    fn gpu(&self) -> &GpuContext;
    fn resize(&mut self, new_size: PhysicalSize<u32>);
    /// Returns whether the event was consumed.
    fn input(&mut self, event: &WindowEvent) -> bool;
    fn update(&mut self);
    fn render(&mut self) -> Result<(), wgpu::SurfaceError>;
}

/// Opens the window, builds the renderer and runs the event loop until the
/// window is closed. Only returns on a start-up error.
pub fn run<R, F>(title: &str, config: &ViewerConfig, build: F) -> Result<()>
where
    R: Renderer + 'static,
    F: FnOnce(GpuContext) -> Result<R>,
{
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(LogicalSize::new(config.window_size[0], config.window_size[1]))
        .with_resizable(false)
        .build(&event_loop)?;

    let gpu = pollster::block_on(GpuContext::new(window))?;
    let mut state = Some(build(gpu)?);
    log::info!("Render started");

    event_loop.run(move |event, _, control_flow| {
        if let Event::LoopDestroyed = event {
            // Release GPU resources before the window goes away.
            if state.take().is_some() {
                log::info!("Released GPU resources");
            }
            return;
        }
        let Some(renderer) = state.as_mut() else {
            return;
        };

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == renderer.gpu().window().id() => {
                if !renderer.input(event) {
                    match event {
                        WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                        WindowEvent::Resized(physical_size) => {
                            renderer.resize(*physical_size);
                        }
                        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                            renderer.resize(**new_inner_size);
                        }
                        _ => {}
                    }
                }
            }
            Event::RedrawRequested(window_id) if window_id == renderer.gpu().window().id() => {
                renderer.update();
                match renderer.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = renderer.gpu().size;
                        renderer.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout"),
                }
            }
            Event::MainEventsCleared => {
                renderer.gpu().window().request_redraw();
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_format_skips_srgb() {
        let formats = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(
            choose_surface_format(&formats),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn surface_format_falls_back_to_first() {
        let formats = [wgpu::TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[]), None);
    }
}
