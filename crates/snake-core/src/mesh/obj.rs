//! OBJ mesh file loading
//!
//! Only positions and triangular faces are read. Texture coordinates,
//! normals, and materials are ignored. Vertices keep their file order, so
//! the OBJ vertex `n` becomes index `n - 1`, including vertices that no face
//! references.

use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use std::path::Path;

use super::{Mesh, MeshAsset, MeshError, Point3};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    }
}

/// Load an OBJ file as a triangle mesh
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| MeshError::Io(e.to_string()))?;

    let mesh = load_obj_from_bytes(&data)?;
    tracing::info!(
        "Loaded OBJ '{}' ({} vertices, {} triangles)",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ from bytes
pub fn load_obj_from_bytes(data: &[u8]) -> Result<Mesh, MeshError> {
    let positions = read_positions(Cursor::new(data))?;
    if positions.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let (models, _materials) =
        tobj::load_obj_buf(&mut Cursor::new(data), &load_options(), |_| {
            Ok(Default::default())
        })
        .map_err(|e| MeshError::Parse(e.to_string()))?;

    combine_models(positions, &models)
}

/// Read every `v` line in file order, requiring exactly three coordinates
fn read_positions(reader: impl BufRead) -> Result<Vec<Point3>, MeshError> {
    let mut positions = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| MeshError::Io(e.to_string()))?;
        let content = line.split('#').next().unwrap_or_default();
        let mut tokens = content.split_whitespace();
        if tokens.next() != Some("v") {
            continue;
        }

        let coords: Vec<&str> = tokens.collect();
        if coords.len() != 3 {
            return Err(MeshError::UnsupportedFormat(format!(
                "all vertices must be 3D, line {} has {} coordinates",
                number + 1,
                coords.len()
            )));
        }

        let mut position = [0.0f32; 3];
        for (slot, token) in position.iter_mut().zip(&coords) {
            *slot = token.parse().map_err(|_| {
                MeshError::Parse(format!(
                    "invalid vertex coordinate '{}' on line {}",
                    token,
                    number + 1
                ))
            })?;
        }
        positions.push(position);
    }

    Ok(positions)
}

/// Rebuild the faces of every OBJ object against the file-order positions,
/// rejecting non-triangle faces
///
/// `tobj` compacts each object's positions by first use, so its indices are
/// mapped back through the exact bit pattern of each position. Coordinates
/// repeated in the file resolve to their first occurrence.
fn combine_models(positions: Vec<Point3>, models: &[tobj::Model]) -> Result<Mesh, MeshError> {
    let mut lookup: HashMap<[u32; 3], u32> = HashMap::with_capacity(positions.len());
    for (index, p) in positions.iter().enumerate() {
        lookup.entry(p.map(f32::to_bits)).or_insert(index as u32);
    }

    let mut indices: Vec<u32> = Vec::new();
    for model in models {
        let mesh = &model.mesh;

        // Empty when every face is a triangle
        if let Some(&arity) = mesh.face_arities.iter().find(|&&a| a != 3) {
            return Err(MeshError::UnsupportedFormat(format!(
                "all faces must be triangles, '{}' has a face with {} vertices",
                model.name, arity
            )));
        }

        for &i in &mesh.indices {
            let start = i as usize * 3;
            let key = mesh
                .positions
                .get(start..start + 3)
                .map(|c| [c[0].to_bits(), c[1].to_bits(), c[2].to_bits()]);
            let index = key.and_then(|k| lookup.get(&k)).ok_or_else(|| {
                MeshError::Parse(format!(
                    "face in '{}' references an unknown vertex",
                    model.name
                ))
            })?;
            indices.push(*index);
        }
    }

    Mesh::new(positions, indices)
}

/// Convert an OBJ file into a JSON mesh asset
pub fn convert_obj_to_json(
    obj_path: impl AsRef<Path>,
    json_path: impl AsRef<Path>,
) -> Result<MeshAsset, MeshError> {
    let mesh = load_obj(obj_path)?;
    let asset = MeshAsset::from(&mesh);
    asset.save(json_path)?;
    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_CORNER_OBJ: &str = "\
# corner of a cube
o corner
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 0.0 0.0 1.0
vt 0.0 0.0
vn 0.0 0.0 1.0
f 1/1/1 3/1/1 2/1/1
f 1//1 2//1 4//1
f 1 4 3
";

    #[test]
    fn test_load_obj_from_bytes() {
        let mesh = load_obj_from_bytes(CUBE_CORNER_OBJ.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 3);

        assert_eq!(
            mesh.positions(),
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0]
            ]
        );
        assert_eq!(mesh.indices(), &[0, 2, 1, 0, 1, 3, 0, 3, 2]);
    }

    #[test]
    fn test_keeps_file_order() {
        let obj = "v 9 9 9\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 4 3 2\n";
        let mesh = load_obj_from_bytes(obj.as_bytes()).unwrap();
        assert_eq!(
            mesh.positions(),
            &[
                [9.0, 9.0, 9.0],
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0]
            ]
        );
        assert_eq!(mesh.indices(), &[3, 2, 1]);
    }

    #[test]
    fn test_multiple_objects() {
        let obj = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                   o b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf -3 -1 -2\n";
        let mesh = load_obj_from_bytes(obj.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 5, 4]);
    }

    #[test]
    fn test_rejects_4d_vertices() {
        let obj = "v 0 0 0 1\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let result = load_obj_from_bytes(obj.as_bytes());
        assert!(matches!(result, Err(MeshError::UnsupportedFormat(_))));

        let obj = "v 0 0\n";
        let result = load_obj_from_bytes(obj.as_bytes());
        assert!(matches!(result, Err(MeshError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_vertices_without_faces() {
        let mesh = load_obj_from_bytes(b"v 0 0 0\nv 1 0 0\n").unwrap();
        assert_eq!(mesh.positions(), &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert!(mesh.indices().is_empty());
    }

    #[test]
    fn test_rejects_quads() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let result = load_obj_from_bytes(obj.as_bytes());
        assert!(matches!(result, Err(MeshError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_empty_obj() {
        let result = load_obj_from_bytes(b"# nothing here\n");
        assert!(matches!(result, Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj("/nonexistent/apple.obj");
        assert!(matches!(result, Err(MeshError::Io(_))));
    }

    #[test]
    fn test_convert_obj_to_json() {
        use std::fs;
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let obj_path = temp.path().join("apple.obj");
        let json_path = temp.path().join("apple.json");
        fs::write(&obj_path, CUBE_CORNER_OBJ).unwrap();

        let asset = convert_obj_to_json(&obj_path, &json_path).unwrap();
        assert_eq!(asset.vertices.len(), 12);
        assert_eq!(asset.indices.len(), 9);

        let loaded = MeshAsset::load(&json_path).unwrap();
        assert_eq!(loaded, asset);
    }
}
