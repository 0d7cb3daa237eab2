use std::path::{Path, PathBuf};

/// Fixed settings shared by both viewers.
///
/// Nothing here is read from disk or the environment; `Default` is the only
/// source of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_size: [u32; 2],
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub camera: CameraConfig,
    pub shader_dir: PathBuf,
    pub object_dir: PathBuf,
    pub clear_color: wgpu::Color,
    /// Added to every composited texel.
    pub color_offset: [f32; 3],
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub initial_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.01,
            zoom_speed: 0.01,
            min_distance: 0.1,
            initial_distance: 5.0,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [700, 700],
            fovy: std::f32::consts::FRAC_PI_3,
            znear: 0.1,
            zfar: 100.0,
            camera: CameraConfig::default(),
            shader_dir: PathBuf::from("Shaders"),
            object_dir: PathBuf::from("Objects"),
            clear_color: wgpu::Color::BLACK,
            color_offset: [0.1, 0.1, 0.1],
        }
    }
}

impl ViewerConfig {
    pub fn shader_path(&self, name: &str) -> PathBuf {
        self.shader_dir.join(name)
    }

    /// Diffuse textures are looked up in the object directory, not next to
    /// the MTL file.
    pub fn texture_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.object_dir.join(name)
    }
}
