//! Indexed triangle meshes and their file formats (JSON asset, OBJ)

mod asset;
mod normals;
mod obj;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_U16_VERTICES, MAX_U32_VERTICES};

pub use asset::{MeshAsset, load_asset_mesh};
pub use normals::{compute_normals, triangle_normal};
pub use obj::{convert_obj_to_json, load_obj, load_obj_from_bytes};

/// A position or direction in 3D space
pub type Point3 = [f32; 3];

/// Integer width of an index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// 16-bit indices (WebGL 1 without extensions)
    #[default]
    U16,
    /// 32-bit indices
    U32,
}

impl IndexFormat {
    /// Number of distinct vertices this format can address
    pub fn max_vertices(&self) -> u64 {
        match self {
            IndexFormat::U16 => MAX_U16_VERTICES,
            IndexFormat::U32 => MAX_U32_VERTICES,
        }
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            IndexFormat::U16 => "u16",
            IndexFormat::U32 => "u32",
        }
    }

    /// Check that `vertices` distinct vertices fit in this format
    pub fn check_capacity(&self, vertices: u64) -> Result<(), MeshError> {
        if vertices > self.max_vertices() {
            return Err(MeshError::CapacityExceeded {
                vertices,
                format: *self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Indexed triangle mesh: vertex positions plus a triangle list
///
/// Every index is guaranteed to be in range and the index count is a
/// multiple of 3. Construct through [`Mesh::new`] to get that validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    positions: Vec<Point3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh, validating the triangle list against the positions
    pub fn new(positions: Vec<Point3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        validate_triangles(positions.len(), &indices)?;
        Ok(Self { positions, indices })
    }

    /// Create a mesh whose indices are known to be valid
    pub(crate) fn from_trusted(positions: Vec<Point3>, indices: Vec<u32>) -> Self {
        debug_assert!(validate_triangles(positions.len(), &indices).is_ok());
        Self { positions, indices }
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh has no triangles (it may still have vertices)
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned bounds as (min, max), or `None` for a mesh without vertices
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.positions[1..] {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }
        Some((min, max))
    }

    /// Smooth per-vertex normals for this mesh
    pub fn compute_normals(&self) -> Vec<Point3> {
        normals::accumulate_normals(&self.positions, &self.indices)
    }

    /// Indices narrowed to 16 bits for WebGL-class index buffers
    pub fn indices_u16(&self) -> Result<Vec<u16>, MeshError> {
        IndexFormat::U16.check_capacity(self.positions.len() as u64)?;
        Ok(self.indices.iter().map(|&i| i as u16).collect())
    }
}

/// Check that `indices` forms whole triangles referencing `vertex_count` vertices
pub(crate) fn validate_triangles(vertex_count: usize, indices: &[u32]) -> Result<(), MeshError> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::InvalidArgument(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(MeshError::InvalidArgument(format!(
            "index {} out of range for {} vertices",
            index, vertex_count
        )));
    }
    Ok(())
}

/// Mesh-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Capacity exceeded: {vertices} vertices do not fit in {format} indices")]
    CapacityExceeded { vertices: u64, format: IndexFormat },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
