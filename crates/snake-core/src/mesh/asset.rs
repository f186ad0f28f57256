//! JSON mesh asset format
//!
//! Assets are stored as `{"vertices": [x0, y0, z0, x1, ...], "indices": [...]}`:
//! a flat list of coordinate triples and a flat triangle list into it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Mesh, MeshError};
use crate::vertex::ShadedMesh;

/// Mesh geometry as stored on disk (positions only, no normals)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshAsset {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshAsset {
    /// Parse an asset from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, MeshError> {
        serde_json::from_str(json).map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Parse an asset from JSON bytes
    pub fn from_json_slice(data: &[u8]) -> Result<Self, MeshError> {
        serde_json::from_slice(data).map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Serialize to a compact JSON string
    pub fn to_json_string(&self) -> Result<String, MeshError> {
        serde_json::to_string(self).map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Load an asset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| MeshError::Io(e.to_string()))?;
        let asset = Self::from_json_slice(&data)?;
        tracing::info!(
            "Loaded mesh asset '{}' ({} coordinates, {} indices)",
            path.display(),
            asset.vertices.len(),
            asset.indices.len()
        );
        Ok(asset)
    }

    /// Save the asset as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let path = path.as_ref();
        let content = self.to_json_string()?;
        std::fs::write(path, content).map_err(|e| MeshError::Io(e.to_string()))?;
        tracing::info!("Saved mesh asset '{}'", path.display());
        Ok(())
    }

    /// Validate and convert into a [`Mesh`]
    pub fn into_mesh(self) -> Result<Mesh, MeshError> {
        if self.vertices.len() % 3 != 0 {
            return Err(MeshError::InvalidArgument(format!(
                "vertex coordinate count {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        let positions = self
            .vertices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Mesh::new(positions, self.indices)
    }
}

impl From<&Mesh> for MeshAsset {
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.positions().iter().flatten().copied().collect(),
            indices: mesh.indices().to_vec(),
        }
    }
}

/// Load a JSON asset and compute its smooth normals
pub fn load_asset_mesh(path: impl AsRef<Path>) -> Result<ShadedMesh, MeshError> {
    let mesh = MeshAsset::load(path)?.into_mesh()?;
    Ok(ShadedMesh::from_mesh(&mesh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_JSON: &str = r#"{"vertices":[0,0,0,1,0,0,0,1,0],"indices":[0,1,2]}"#;

    #[test]
    fn test_parse_asset() {
        let asset = MeshAsset::from_json_str(TRIANGLE_JSON).unwrap();
        assert_eq!(asset.vertices.len(), 9);
        assert_eq!(asset.indices, vec![0, 1, 2]);

        let mesh = asset.into_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.positions()[1], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_error() {
        let result = MeshAsset::from_json_str(r#"{"vertices": [0, 0"#);
        assert!(matches!(result, Err(MeshError::Parse(_))));

        let result = MeshAsset::from_json_str(r#"{"vertices": []}"#);
        assert!(matches!(result, Err(MeshError::Parse(_))));
    }

    #[test]
    fn test_incomplete_vertex() {
        let asset = MeshAsset {
            vertices: vec![0.0, 1.0],
            indices: vec![],
        };
        assert!(matches!(
            asset.into_mesh(),
            Err(MeshError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let asset = MeshAsset {
            vertices: vec![0.0; 9],
            indices: vec![0, 1, 3],
        };
        assert!(matches!(
            asset.into_mesh(),
            Err(MeshError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_mesh_flattens_positions() {
        let mesh = Mesh::new(
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
            vec![2, 1, 0],
        )
        .unwrap();
        let asset = MeshAsset::from(&mesh);
        assert_eq!(
            asset.vertices,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
        assert_eq!(asset.indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_save_and_load_shaded() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let path = temp.path().join("apple.json");
        MeshAsset::from_json_str(TRIANGLE_JSON)
            .unwrap()
            .save(&path)
            .unwrap();

        let shaded = load_asset_mesh(&path).unwrap();
        assert_eq!(shaded.vertices.len(), 3);
        assert_eq!(shaded.indices, vec![0, 1, 2]);
        for v in &shaded.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = MeshAsset::load("/nonexistent/cube.json");
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
