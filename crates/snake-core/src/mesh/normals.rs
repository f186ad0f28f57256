//! Normal calculation utilities for mesh data

use glam::Vec3;

use super::{MeshError, Point3, validate_triangles};

/// Calculate the unit normal of a single triangle (right-hand rule)
///
/// Degenerate triangles fall back to +Z.
pub fn triangle_normal(v0: Point3, v1: Point3, v2: Point3) -> Point3 {
    let v0 = Vec3::from_array(v0);
    let cross = (Vec3::from_array(v1) - v0).cross(Vec3::from_array(v2) - v0);
    cross.try_normalize().unwrap_or(Vec3::Z).to_array()
}

/// Calculate smooth per-vertex normals for an indexed triangle list
///
/// Face normals are accumulated without normalization, so each triangle
/// contributes in proportion to its area. Vertices touched by no triangle
/// get the zero vector.
///
/// # Errors
/// `InvalidArgument` if the index count is not a multiple of 3 or an index
/// is out of range for `positions`.
pub fn compute_normals(positions: &[Point3], indices: &[u32]) -> Result<Vec<Point3>, MeshError> {
    validate_triangles(positions.len(), indices)?;
    Ok(accumulate_normals(positions, indices))
}

/// Accumulate and normalize; `indices` must already be validated
pub(super) fn accumulate_normals(positions: &[Point3], indices: &[u32]) -> Vec<Point3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    // Sequential in index order so results are bit-reproducible
    for tri in indices.chunks_exact(3) {
        let (i, j, k) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p = Vec3::from_array(positions[i]);
        let v = Vec3::from_array(positions[j]) - p;
        let u = Vec3::from_array(positions[k]) - p;
        let n = v.cross(u);

        accum[i] += n;
        accum[j] += n;
        accum[k] += n;
    }

    let undefined = accum.iter().filter(|n| **n == Vec3::ZERO).count();
    if undefined > 0 {
        tracing::warn!(
            "{} of {} vertices have no defined normal direction",
            undefined,
            positions.len()
        );
    }

    accum
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}
