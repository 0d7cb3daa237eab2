use std::path::Path;

use orbit_viewer::config::ViewerConfig;
use orbit_viewer::error::ViewerError;
use orbit_viewer::primitives::tri_mesh::{Corner, TriMesh};
use orbit_viewer::process::obj::load_obj;
use rstest::rstest;

const CUBE: &str = "Objects/cube.obj";

#[test]
fn bundled_cube_loads_with_material() {
    let mesh = load_obj(Path::new(CUBE)).unwrap();
    assert_eq!(mesh.face_count(), 12);
    assert_eq!(mesh.positions.len(), 24);
    assert_eq!(mesh.diffuse_texture(), Some("checker.png"));

    let texture = ViewerConfig::default().texture_path("checker.png");
    assert!(texture.exists(), "{} is missing", texture.display());
}

#[test]
fn bundled_cube_feeds_both_variants() {
    let mesh = load_obj(Path::new(CUBE)).unwrap();

    let flat = mesh.flatten().unwrap();
    assert_eq!(flat.vertex_count(), 36);
    assert_eq!(flat.normals.len(), 36);
    assert_eq!(flat.texcoords.len(), 36);

    let indexed = mesh.indexed().unwrap();
    assert_eq!(indexed.index_count(), 36);
    assert_eq!(indexed.positions.len(), indexed.normals.len());
}

fn fan(faces: usize) -> TriMesh {
    let positions = (0..=faces + 1)
        .map(|i| [i as f32, (i * i) as f32, 0.0])
        .collect::<Vec<_>>();
    let normals = vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0]];
    let texcoords = (0..=faces + 1)
        .map(|i| [i as f32 / 10.0, 0.5])
        .collect::<Vec<_>>();
    let faces = (0..faces as u32)
        .map(|f| {
            [
                Corner::new(0, f % 2, 0),
                Corner::new(f + 1, f % 2, f + 1),
                Corner::new(f + 2, (f + 1) % 2, f + 2),
            ]
        })
        .collect();
    TriMesh {
        positions,
        normals,
        texcoords,
        faces,
        material: None,
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(17)]
fn flattening_keeps_corners_aligned(#[case] faces: usize) {
    let mesh = fan(faces);
    let flat = mesh.flatten().unwrap();

    assert_eq!(flat.positions.len(), 3 * faces);
    assert_eq!(flat.normals.len(), 3 * faces);
    assert_eq!(flat.texcoords.len(), 3 * faces);

    for (i, corner) in mesh.faces.iter().flatten().enumerate() {
        assert_eq!(flat.positions[i], mesh.positions[corner.position as usize]);
        assert_eq!(flat.normals[i], mesh.normals[corner.normal as usize]);
        assert_eq!(flat.texcoords[i], mesh.texcoords[corner.texcoord as usize]);
    }
}

#[rstest]
#[case(Corner::new(99, 0, 0), "position")]
#[case(Corner::new(0, 2, 0), "normal")]
#[case(Corner::new(0, 0, 40), "texcoord")]
fn flattening_reports_bad_indices(#[case] bad: Corner, #[case] expected: &str) {
    let mut mesh = fan(3);
    mesh.faces[2][1] = bad;
    match mesh.flatten() {
        Err(ViewerError::IndexOutOfRange { channel, face, .. }) => {
            assert_eq!(channel, expected);
            assert_eq!(face, 2);
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}
