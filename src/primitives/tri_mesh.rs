use cgmath::{InnerSpace, Vector3, Zero};

use crate::error::{Result, ViewerError};
use crate::primitives::material::Material;

/// Attribute indices for one corner of a face. Each channel indexes its own
/// array, so a corner may use position 7 with normal 2 and texcoord 11.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Corner {
    pub position: u32,
    pub normal: u32,
    pub texcoord: u32,
}

impl Corner {
    pub fn new(position: u32, normal: u32, texcoord: u32) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// A corner whose three channels share one index.
    pub fn shared(index: u32) -> Self {
        Self::new(index, index, index)
    }
}

pub type Face = [Corner; 3];

/// Indexed triangle mesh with independent index sets per attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub faces: Vec<Face>,
    pub material: Option<Material>,
}

/// Non-indexed stream: entry `i` of every channel belongs to the same corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
}

impl FlatMesh {
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// Position-indexed stream for a single index buffer. Normals are taken at
/// the position's index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

fn fetch<T: Copy>(data: &[T], channel: &'static str, face: usize, index: u32) -> Result<T> {
    data.get(index as usize)
        .copied()
        .ok_or_else(|| ViewerError::IndexOutOfRange {
            channel,
            face,
            index: index as usize,
            len: data.len(),
        })
}

impl TriMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn diffuse_texture(&self) -> Option<&str> {
        self.material.as_ref()?.diffuse_texture.as_deref()
    }

    /// Expands every face corner into its own vertex.
    pub fn flatten(&self) -> Result<FlatMesh> {
        let count = self.faces.len() * 3;
        let mut flat = FlatMesh {
            positions: Vec::with_capacity(count),
            normals: Vec::with_capacity(count),
            texcoords: Vec::with_capacity(count),
        };

        for (face_idx, face) in self.faces.iter().enumerate() {
            for corner in face {
                flat.positions
                    .push(fetch(&self.positions, "position", face_idx, corner.position)?);
                flat.normals
                    .push(fetch(&self.normals, "normal", face_idx, corner.normal)?);
                flat.texcoords
                    .push(fetch(&self.texcoords, "texcoord", face_idx, corner.texcoord)?);
            }
        }

        Ok(flat)
    }

    /// Builds the shared-index stream. Only meaningful when normals line up
    /// with positions one to one; a position without a normal is an error.
    pub fn indexed(&self) -> Result<IndexedMesh> {
        let mut indices = Vec::with_capacity(self.faces.len() * 3);
        for (face_idx, face) in self.faces.iter().enumerate() {
            for corner in face {
                fetch(&self.positions, "position", face_idx, corner.position)?;
                indices.push(corner.position);
            }
        }

        let missing_normal = self.faces.iter().enumerate().find_map(|(face_idx, face)| {
            face.iter()
                .find(|corner| corner.position as usize >= self.normals.len())
                .map(|corner| (face_idx, corner.position))
        });
        if let Some((face_idx, index)) = missing_normal {
            return Err(ViewerError::IndexOutOfRange {
                channel: "normal",
                face: face_idx,
                index: index as usize,
                len: self.normals.len(),
            });
        }

        Ok(IndexedMesh {
            positions: self.positions.clone(),
            normals: self
                .positions
                .iter()
                .enumerate()
                .map(|(i, _)| self.normals.get(i).copied().unwrap_or_default())
                .collect(),
            indices,
        })
    }

    /// Replaces the normals with smooth per-position normals and points every
    /// corner's normal index at its position index.
    pub fn compute_normals(&mut self) -> Result<()> {
        let mut sums = vec![Vector3::<f32>::zero(); self.positions.len()];

        for (face_idx, face) in self.faces.iter().enumerate() {
            let [a, b, c] = [0, 1, 2].map(|i| face[i].position);
            let pa = Vector3::from(fetch(&self.positions, "position", face_idx, a)?);
            let pb = Vector3::from(fetch(&self.positions, "position", face_idx, b)?);
            let pc = Vector3::from(fetch(&self.positions, "position", face_idx, c)?);
            // Unnormalized cross product weights by face area.
            let n = (pb - pa).cross(pc - pa);
            for idx in [a, b, c] {
                sums[idx as usize] += n;
            }
        }

        self.normals = sums
            .into_iter()
            .map(|n| -> [f32; 3] {
                if n.magnitude2() > 0.0 {
                    n.normalize().into()
                } else {
                    [0.0, 0.0, 0.0]
                }
            })
            .collect();

        for face in &mut self.faces {
            for corner in face.iter_mut() {
                corner.normal = corner.position;
            }
        }
        Ok(())
    }
}
