//! Interleaved vertex buffers
//!
//! Positions and normals packed into a `#[repr(C)]` layout that can be
//! uploaded to a vertex buffer as raw bytes.

use crate::mesh::{Mesh, MeshError, Point3};

/// Vertex format for lit geometry (position + normal)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadedVertex {
    /// Vertex position in model space.
    pub position: [f32; 3],
    /// Smooth shading normal (zero if undefined).
    pub normal: [f32; 3],
}

impl ShadedVertex {
    pub fn new(position: Point3, normal: Point3) -> Self {
        Self { position, normal }
    }
}

/// Mesh with per-vertex normals, ready for upload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadedMesh {
    pub vertices: Vec<ShadedVertex>,
    pub indices: Vec<u32>,
}

impl ShadedMesh {
    /// Interleave a mesh with its computed smooth normals
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let normals = mesh.compute_normals();
        Self::interleave(mesh, &normals)
    }

    /// Interleave a mesh with caller-supplied normals
    pub fn from_parts(mesh: &Mesh, normals: &[Point3]) -> Result<Self, MeshError> {
        if normals.len() != mesh.vertex_count() {
            return Err(MeshError::InvalidArgument(format!(
                "{} normals supplied for {} vertices",
                normals.len(),
                mesh.vertex_count()
            )));
        }
        Ok(Self::interleave(mesh, normals))
    }

    fn interleave(mesh: &Mesh, normals: &[Point3]) -> Self {
        let vertices = mesh
            .positions()
            .iter()
            .zip(normals)
            .map(|(&p, &n)| ShadedVertex::new(p, n))
            .collect();
        Self {
            vertices,
            indices: mesh.indices().to_vec(),
        }
    }

    /// Raw bytes of the vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the 32-bit index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
