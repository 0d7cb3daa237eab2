use std::path::Path;

use wavefront_obj::obj::{self, Primitive};

use crate::error::{Result, ViewerError};
use crate::primitives::material::Material;
use crate::primitives::tri_mesh::{Corner, TriMesh};

struct RawCorner {
    position: u32,
    normal: Option<u32>,
    texcoord: Option<u32>,
}

/// Loads an OBJ file and, when it names one, the first material of its MTL
/// library (resolved next to the OBJ file).
pub fn load_obj(path: &Path) -> Result<TriMesh> {
    let source = std::fs::read_to_string(path).map_err(|source| ViewerError::MeshRead {
        path: path.to_owned(),
        source,
    })?;
    let (mut mesh, material_library) = parse_obj(source, path)?;

    if let Some(library) = material_library {
        let mtl_path = path.parent().unwrap_or(Path::new("")).join(&library);
        match std::fs::read_to_string(&mtl_path) {
            Ok(mtl) => mesh.material = Material::first_from_mtl(&mtl),
            Err(err) => log::warn!("Material library {} not loaded: {}", mtl_path.display(), err),
        }
    }

    log::info!(
        "Loaded {}: {} positions, {} normals, {} texcoords, {} faces",
        path.display(),
        mesh.positions.len(),
        mesh.normals.len(),
        mesh.texcoords.len(),
        mesh.face_count(),
    );
    Ok(mesh)
}

/// Parses OBJ source into a single mesh. Objects are merged and their
/// indices rebased. `path` is only used in error messages.
///
/// Returns the mesh together with the `mtllib` name, if any.
pub fn parse_obj(source: String, path: &Path) -> Result<(TriMesh, Option<String>)> {
    let set = obj::parse(source).map_err(|err| ViewerError::ObjParse {
        path: path.to_owned(),
        line: err.line_number,
        message: err.message,
    })?;

    let mut mesh = TriMesh::new();
    let mut raw_faces: Vec<[RawCorner; 3]> = Vec::new();

    for object in &set.objects {
        let position_offset = mesh.positions.len() as u32;
        let normal_offset = mesh.normals.len() as u32;
        let texcoord_offset = mesh.texcoords.len() as u32;

        mesh.positions
            .extend(object.vertices.iter().map(|v| [v.x as f32, v.y as f32, v.z as f32]));
        mesh.normals
            .extend(object.normals.iter().map(|n| [n.x as f32, n.y as f32, n.z as f32]));
        mesh.texcoords
            .extend(object.tex_vertices.iter().map(|t| [t.u as f32, t.v as f32]));

        let corner = |(v, t, n): obj::VTNIndex| RawCorner {
            position: v as u32 + position_offset,
            normal: n.map(|n| n as u32 + normal_offset),
            texcoord: t.map(|t| t as u32 + texcoord_offset),
        };

        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                // Points and lines have nothing to shade. Triangles arrive
                // as (last, first, second); rotate back to source order.
                if let Primitive::Triangle(a, b, c) = &shape.primitive {
                    raw_faces.push([corner(*b), corner(*c), corner(*a)]);
                }
            }
        }
    }

    if raw_faces.is_empty() {
        return Err(ViewerError::EmptyMesh(path.to_owned()));
    }

    let needs_normals = raw_faces.iter().flatten().any(|c| c.normal.is_none());
    let mut fallback_texcoord = None;
    if raw_faces.iter().flatten().any(|c| c.texcoord.is_none()) {
        fallback_texcoord = Some(mesh.texcoords.len() as u32);
        mesh.texcoords.push([0.0, 0.0]);
    }

    mesh.faces = raw_faces
        .iter()
        .map(|face| {
            face.each_ref().map(|c| Corner {
                position: c.position,
                normal: c.normal.unwrap_or(c.position),
                texcoord: c.texcoord.or(fallback_texcoord).unwrap_or_default(),
            })
        })
        .collect();

    if needs_normals {
        log::info!("{} has no normals; computing smooth normals", path.display());
        mesh.compute_normals()?;
    }

    Ok((mesh, set.material_library))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
mtllib tri.mtl
o tri
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn parses_independent_index_sets() {
        let (mesh, library) = parse_obj(TRIANGLE.to_owned(), Path::new("tri.obj")).unwrap();
        assert_eq!(library.as_deref(), Some("tri.mtl"));
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]]);
        assert_eq!(
            mesh.faces,
            vec![[Corner::new(0, 0, 0), Corner::new(1, 0, 1), Corner::new(2, 0, 2)]]
        );

        let flat = mesh.flatten().unwrap();
        assert_eq!(flat.texcoords, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(flat.normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    const TWO_OBJECTS: &str = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
o b
v 5 0 0
v 6 0 0
v 5 1 0
vn 0 1 0
f 4//2 5//2 6//2
";

    #[test]
    fn merged_objects_keep_corner_order() {
        let (mesh, _) = parse_obj(TWO_OBJECTS.to_owned(), Path::new("two.obj")).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[1][0].normal, 1);

        let flat = mesh.flatten().unwrap();
        assert_eq!(
            flat.positions,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [5.0, 0.0, 0.0],
                [6.0, 0.0, 0.0],
                [5.0, 1.0, 0.0],
            ]
        );
        assert_eq!(&flat.normals[3..], &[[0.0, 1.0, 0.0]; 3]);
    }

    #[test]
    fn fills_in_missing_normals_and_texcoords() {
        let source = "o bare\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let (mesh, library) = parse_obj(source.to_owned(), Path::new("bare.obj")).unwrap();
        assert_eq!(library, None);
        assert_eq!(mesh.texcoords, vec![[0.0, 0.0]]);
        assert_eq!(mesh.normals.len(), 3);
        for corner in mesh.faces.iter().flatten() {
            assert_eq!(corner.texcoord, 0);
            assert_eq!(corner.normal, corner.position);
        }
        assert!((mesh.normals[0][2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_files_without_faces() {
        let source = "o points\nv 0 0 0\nv 1 0 0\n";
        assert!(matches!(
            parse_obj(source.to_owned(), Path::new("points.obj")),
            Err(ViewerError::EmptyMesh(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_obj(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(err, ViewerError::MeshRead { .. }));
        assert!(err.to_string().contains("does/not/exist.obj"));
    }
}
