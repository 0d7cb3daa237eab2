const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const TEXCOORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

// One attribute per buffer, matching the separate position / normal /
// texcoord arrays the meshes keep.
fn single_attribute(attributes: &'static [wgpu::VertexAttribute; 1]) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: attributes[0].format.size(),
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    single_attribute(&POSITION_ATTRIBUTES)
}

pub fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    single_attribute(&NORMAL_ATTRIBUTES)
}

pub fn texcoord_layout() -> wgpu::VertexBufferLayout<'static> {
    single_attribute(&TEXCOORD_ATTRIBUTES)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl PlaneVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Screen-aligned quad, already in normalized device coordinates.
#[rustfmt::skip]
pub const PLANE_VERTICES: [PlaneVertex; 4] = [
    PlaneVertex { position: [-1.0, -1.0, 0.0], tex_coords: [0.0, 0.0] },
    PlaneVertex { position: [ 1.0, -1.0, 0.0], tex_coords: [1.0, 0.0] },
    PlaneVertex { position: [ 1.0,  1.0, 0.0], tex_coords: [1.0, 1.0] },
    PlaneVertex { position: [-1.0,  1.0, 0.0], tex_coords: [0.0, 1.0] },
];

pub const PLANE_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_strides() {
        assert_eq!(position_layout().array_stride, 12);
        assert_eq!(normal_layout().attributes[0].shader_location, 1);
        assert_eq!(texcoord_layout().array_stride, 8);
        assert_eq!(PlaneVertex::desc().array_stride, 20);
    }

    #[test]
    fn plane_covers_clip_space_with_two_ccw_triangles() {
        for tri in PLANE_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| PLANE_VERTICES[i as usize].position);
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]);
            assert!(area > 0.0);
        }
        for v in &PLANE_VERTICES {
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[1].abs(), 1.0);
            assert_eq!(v.tex_coords[0], (v.position[0] + 1.0) / 2.0);
        }
    }
}
