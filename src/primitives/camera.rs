use cgmath::{Matrix4, Point3, Rad, Vector3};
use wgpu::util::DeviceExt;

use crate::config::{CameraConfig, ViewerConfig};
use crate::OPENGL_TO_WGPU_MATRIX;

/// Camera on a sphere around the origin, always looking at the origin with
/// +Y up.
///
/// Angles accumulate without bound. Pitch is deliberately left unclamped, so
/// dragging past a pole flips the orbit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    distance: f32,
    min_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, min_distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.max(min_distance),
            min_distance,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.initial_distance, config.min_distance)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(self.min_distance);
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn eye(&self) -> Point3<f32> {
        let r = self.distance;
        Point3::new(
            r * self.yaw.sin() * self.pitch.cos(),
            r * self.pitch.sin(),
            r * self.yaw.cos() * self.pitch.cos(),
        )
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y())
    }
}

/// Fixed-FOV perspective projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(config: &ViewerConfig, aspect: f32) -> Self {
        Self {
            fovy: Rad(config.fovy),
            aspect,
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Projection in wgpu clip space (depth in `[0, 1]`).
    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Which camera mouse drags drive.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CameraTarget {
    #[default]
    Object,
    Plane,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub object: OrbitCamera,
    pub plane: OrbitCamera,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            object: OrbitCamera::from_config(config),
            plane: OrbitCamera::from_config(config),
        }
    }

    pub fn get(&self, target: CameraTarget) -> &OrbitCamera {
        match target {
            CameraTarget::Object => &self.object,
            CameraTarget::Plane => &self.plane,
        }
    }

    pub fn get_mut(&mut self, target: CameraTarget) -> &mut OrbitCamera {
        match target {
            CameraTarget::Object => &mut self.object,
            CameraTarget::Plane => &mut self.plane,
        }
    }
}

/// Transforms for the mesh shaders: `mvp` for clip space, `view` (really
/// view * model) for normals.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub mvp: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from(camera: &OrbitCamera, projection: &Projection, model: &Matrix4<f32>) -> Self {
        let model_view = camera.view_matrix() * *model;
        Self {
            mvp: (projection.matrix() * model_view).into(),
            view: model_view.into(),
        }
    }

    pub fn to_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(self),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn update_buffer(&self, buffer: &wgpu::Buffer, queue: &wgpu::Queue) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(self));
    }
}

/// Uniforms for the composite pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniform {
    pub mvp: [[f32; 4]; 4],
    pub color_offset: [f32; 3],
    _padding: f32,
}

impl PlaneUniform {
    /// The plane's model matrix is the identity.
    pub fn from(camera: &OrbitCamera, projection: &Projection, color_offset: [f32; 3]) -> Self {
        Self {
            mvp: (projection.matrix() * camera.view_matrix()).into(),
            color_offset,
            _padding: 0.0,
        }
    }

    pub fn to_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Plane Uniform Buffer"),
            contents: bytemuck::bytes_of(self),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn update_buffer(&self, buffer: &wgpu::Buffer, queue: &wgpu::Queue) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Transform};

    fn length(p: Point3<f32>) -> f32 {
        Vector3::new(p.x, p.y, p.z).magnitude()
    }

    #[test]
    fn starts_on_positive_z() {
        let camera = OrbitCamera::from_config(&CameraConfig::default());
        let eye = camera.eye();
        assert!(eye.x.abs() < 1e-6);
        assert!(eye.y.abs() < 1e-6);
        assert!((eye.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn eye_stays_on_sphere() {
        let mut camera = OrbitCamera::new(1.0, 0.1);
        for &r in &[0.1f32, 0.5, 1.0, 5.0, 42.0] {
            camera.set_distance(r);
            for i in 0..24 {
                for j in 0..24 {
                    camera.yaw = i as f32 * 0.7 - 8.0;
                    camera.pitch = j as f32 * 0.55 - 6.0;
                    let len = length(camera.eye());
                    assert!((len - r).abs() <= r * 1e-5, "|eye| = {len}, r = {r}");
                }
            }
        }
    }

    #[test]
    fn zoom_never_goes_below_minimum() {
        let mut camera = OrbitCamera::new(5.0, 0.1);
        for _ in 0..100 {
            camera.zoom(-0.37);
            assert!(camera.distance() >= 0.1);
        }
        assert_eq!(camera.distance(), 0.1);
        camera.zoom(1.0);
        assert!((camera.distance() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_is_stable_without_input() {
        let mut camera = OrbitCamera::new(3.0, 0.1);
        camera.rotate(0.4, -1.2);
        let first = camera.view_matrix();
        for _ in 0..10 {
            assert_eq!(camera.view_matrix(), first);
        }
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let mut camera = OrbitCamera::new(4.0, 0.1);
        camera.rotate(1.1, 0.3);
        let eye_in_view = camera.view_matrix().transform_point(camera.eye());
        assert!(length(eye_in_view) < 1e-5);
    }

    #[test]
    fn projection_maps_near_and_far_to_wgpu_depth() {
        let projection = Projection::new(&ViewerConfig::default(), 1.0);
        let m = projection.matrix();
        let near = m.transform_point(Point3::new(0.0, 0.0, -0.1));
        let far = m.transform_point(Point3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-4, "near depth {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far depth {}", far.z);
    }

    #[test]
    fn rig_selects_independent_cameras() {
        let mut rig = CameraRig::new(&CameraConfig::default());
        rig.get_mut(CameraTarget::Plane).rotate(1.0, 0.0);
        assert_eq!(rig.get(CameraTarget::Plane).yaw, 1.0);
        assert_eq!(rig.get(CameraTarget::Object).yaw, 0.0);
    }

    #[test]
    fn uniform_layout_is_std140_sized() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        assert_eq!(std::mem::size_of::<PlaneUniform>(), 80);
    }
}
