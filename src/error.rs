use std::path::PathBuf;

/// Every way the viewers can fail. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to read OBJ file {}: {source}", .path.display())]
    MeshRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse OBJ file {} at line {line}: {message}", .path.display())]
    ObjParse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("OBJ file {} contains no triangles", .0.display())]
    EmptyMesh(PathBuf),
    #[error("face {face} references {channel} index {index}, but only {len} are present")]
    IndexOutOfRange {
        channel: &'static str,
        face: usize,
        index: usize,
        len: usize,
    },

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("failed to request graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to read texture {}: {source}", .path.display())]
    TextureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error decoding texture {}: {source}", .path.display())]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read shader {}: {source}", .path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to compile shader {}: {message}", .path.display())]
    ShaderCompile { path: PathBuf, message: String },
    #[error("failed to create pipeline {label}: {message}")]
    PipelineCreation { label: &'static str, message: String },
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
