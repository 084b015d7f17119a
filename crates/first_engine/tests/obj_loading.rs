//! OBJ loading through the default line parser

use std::path::PathBuf;

use first_engine::assets::{ObjError, ObjLoader};

/// Scratch OBJ file removed on drop
struct TempObj(PathBuf);

impl TempObj {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "first_engine_it_{}_{}.obj",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("temp file should be writable");
        Self(path)
    }
}

impl Drop for TempObj {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

const TETRA_BODY: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 0.0 0.0 1.0
f 1 2 3
f 1 3 4
f 1 4 2
f 2 4 3
";

#[test]
fn loads_triangulated_file() {
    let file = TempObj::new("tetra", &format!("# tetrahedron\n{TETRA_BODY}"));
    let mesh = ObjLoader::load(&file.0).expect("tetrahedron should load");

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangle_count(), 4);
    assert!(mesh.validate().is_ok());
    assert!(mesh.vertices.iter().all(|v| v.position[3] == 1.0));
    assert!(mesh.vertices.iter().any(|v| v.position == [0.0, 0.0, 1.0, 1.0]));
}

#[test]
fn ccw_header_swaps_last_two_indices() {
    let plain = TempObj::new("tetra_plain", &format!("# tetrahedron\n{TETRA_BODY}"));
    let marked = TempObj::new("tetra_ccw", &format!("# CCW tetrahedron\n{TETRA_BODY}"));

    let a = ObjLoader::load(&plain.0).expect("plain file should load");
    let b = ObjLoader::load(&marked.0).expect("marked file should load");

    assert_eq!(a.vertices, b.vertices);
    for (x, y) in a.triangles().zip(b.triangles()) {
        assert_eq!([x[0], x[2], x[1]], y);
    }
}

#[test]
fn quad_face_fails_with_face_zero() {
    let file = TempObj::new(
        "quad",
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\nf 1 2 3\n",
    );
    let err = ObjLoader::load(&file.0).unwrap_err();

    assert!(matches!(err, ObjError::NonTriangularFace { face: 0, vertex_count: 4, .. }));
    assert!(err.is_structural());
}

#[test]
fn file_without_faces_has_no_shapes() {
    let file = TempObj::new("points_only", "# just points\nv 0 0 0\nv 1 0 0\n");
    let err = ObjLoader::load(&file.0).unwrap_err();

    assert!(matches!(err, ObjError::NoShapes { .. }));
    assert!(err.is_structural());
}

#[test]
fn object_without_faces_has_no_shapes() {
    let file = TempObj::new("empty_object", "o empty\nv 0 0 0\n");
    let err = ObjLoader::load(&file.0).unwrap_err();

    assert!(matches!(err, ObjError::NoShapes { .. }));
}

#[test]
fn polylines_and_points_are_skipped() {
    let file = TempObj::new(
        "polyline",
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\nl 1 2\np 3\n",
    );
    let mesh = ObjLoader::load(&file.0).expect("lines and points are not faces");

    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn indices_follow_file_numbering() {
    let file = TempObj::new("numbering", "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 9 9 9\nf 3 2 1\n");
    let mesh = ObjLoader::load(&file.0).expect("file should load");

    // the unused fourth vertex is still copied
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.vertices[3].position, [9.0, 9.0, 9.0, 1.0]);
    assert_eq!(mesh.indices, vec![2, 1, 0]);
}

#[test]
fn only_first_object_is_triangulated() {
    let file = TempObj::new(
        "two_objects",
        "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 -1
f 1//1 2//1 3//1
o second
v 5 5 5
v 6 5 5
v 5 6 5
vn 1 0 0
f 4//2 5//2 6//2
f 6//2 5//2 4//2
",
    );
    let mesh = ObjLoader::load_normals(&file.0).expect("file should load");

    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, -1.0]);
    // the second object's vertices are present but untouched
    assert_eq!(mesh.vertices[3].position, [5.0, 5.0, 5.0, 1.0]);
    assert_eq!(mesh.vertices[3].normal, [0.0; 3]);
}

#[test]
fn indices_count_vertices_before_the_object() {
    let file = TempObj::new(
        "late_first_face",
        "\
v 9 9 9
o only
v 0 0 0
v 1 0 0
v 0 1 0
f 2 3 4
",
    );
    let mesh = ObjLoader::load(&file.0).expect("file should load");

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices, vec![1, 2, 3]);
}

#[test]
fn missing_file_is_parse_error() {
    let err = ObjLoader::load("definitely/not/here.obj").unwrap_err();

    assert!(matches!(err, ObjError::Parse { .. }));
    assert!(!err.is_structural());
}

#[test]
fn shared_vertex_keeps_last_normal() {
    let file = TempObj::new(
        "normals",
        "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 -1
vn 0 0 1
f 1//1 2//1 3//1
f 1//2 3//2 4//2
",
    );
    let mesh = ObjLoader::load_normals(&file.0).expect("file should load");

    // vertices 0 and 2 are shared; the second face wrote them last
    assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.vertices[1].normal, [0.0, 0.0, -1.0]);
    assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.vertices[3].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
}

#[test]
fn load_normals_rejects_faces_without_normals() {
    let file = TempObj::new("no_vn", &format!("# tetrahedron\n{TETRA_BODY}"));
    let err = ObjLoader::load_normals(&file.0).unwrap_err();

    assert!(matches!(err, ObjError::MissingNormal { face: 0, corner: 0, .. }));
}
