//! Sphere mesh generation (subdivided tetrahedron)
//!
//! Each tetrahedron face is split recursively into four triangles at the
//! edge midpoints. Vertices shared between neighbouring triangles are merged
//! by exact bit pattern, then every vertex is pushed out to the unit sphere.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SUBDIVISION_LEVEL, TETRAHEDRON_CORNERS};
use crate::mesh::{IndexFormat, Mesh, MeshError, Point3};

/// Sphere generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    /// Recursion depth; level `n` yields `4 * 4^n` triangles
    pub subdivision_level: i32,
    /// Index width the output must fit in
    pub index_format: IndexFormat,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            subdivision_level: DEFAULT_SUBDIVISION_LEVEL,
            index_format: IndexFormat::U16,
        }
    }
}

impl SphereParams {
    /// Default parameters at the given level
    pub fn with_level(subdivision_level: i32) -> Self {
        Self {
            subdivision_level,
            ..Self::default()
        }
    }
}

/// Number of distinct vertices produced at `level`: `2 * 4^level + 2`
///
/// Returns `None` if the count does not fit in a `u64`.
pub fn expected_sphere_vertices(level: u32) -> Option<u64> {
    4u64.checked_pow(level)?.checked_mul(2)?.checked_add(2)
}

/// Generate a unit sphere with 16-bit-compatible indices
///
/// # Arguments
/// * `subdivision_level` - Recursion depth (default: 7, the largest level
///   that fits 16-bit indices)
///
/// # Errors
/// `InvalidArgument` for a negative level, `CapacityExceeded` when the
/// vertex count would not fit 16-bit indices.
pub fn generate_sphere(subdivision_level: i32) -> Result<Mesh, MeshError> {
    generate_sphere_with_params(&SphereParams::with_level(subdivision_level))
}

/// Generate a unit sphere with custom parameters
pub fn generate_sphere_with_params(params: &SphereParams) -> Result<Mesh, MeshError> {
    let level = u32::try_from(params.subdivision_level).map_err(|_| {
        MeshError::InvalidArgument(format!(
            "subdivision level must be non-negative, got {}",
            params.subdivision_level
        ))
    })?;

    // Checked up front so nothing is built that could not be indexed
    let expected = expected_sphere_vertices(level).unwrap_or(u64::MAX);
    params.index_format.check_capacity(expected)?;

    let mut builder = SphereBuilder::with_capacity(usize::try_from(expected).unwrap_or_default());

    let [a, b, c, d] = TETRAHEDRON_CORNERS.map(Vec3::from_array);
    let faces = [(a, b, c), (d, c, b), (a, d, b), (a, c, d)];

    // Depth-first worklist, children pushed in reverse so they pop in order
    let mut stack: Vec<(Vec3, Vec3, Vec3, u32)> = Vec::with_capacity(4 + 3 * level as usize);
    stack.extend(faces.iter().rev().map(|&(a, b, c)| (a, b, c, level)));

    while let Some((a, b, c, depth)) = stack.pop() {
        if depth == 0 {
            builder.emit(b);
            builder.emit(a);
            builder.emit(c);
            continue;
        }

        let ab = midpoint(a, b);
        let ac = midpoint(a, c);
        let bc = midpoint(b, c);
        let depth = depth - 1;

        stack.push((ab, bc, ac, depth));
        stack.push((ac, bc, c, depth));
        stack.push((ab, b, bc, depth));
        stack.push((a, ab, ac, depth));
    }

    let mesh = builder.finish();
    tracing::debug!(
        "Generated sphere at level {} ({} vertices, {} triangles)",
        level,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Edge midpoint, symmetric in its arguments so both faces sharing an edge
/// get bit-identical results
#[inline]
fn midpoint(p: Vec3, q: Vec3) -> Vec3 {
    (p + q) * 0.5
}

/// Accumulates deduplicated vertices and the triangle list
struct SphereBuilder {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    lookup: HashMap<[u32; 3], u32>,
}

impl SphereBuilder {
    fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            indices: Vec::new(),
            lookup: HashMap::with_capacity(vertices),
        }
    }

    fn emit(&mut self, v: Vec3) {
        let key = v.to_array().map(f32::to_bits);
        let positions = &mut self.positions;
        let index = *self.lookup.entry(key).or_insert_with(|| {
            positions.push(v);
            (positions.len() - 1) as u32
        });
        self.indices.push(index);
    }

    fn finish(self) -> Mesh {
        let positions: Vec<Point3> = self
            .positions
            .into_iter()
            .map(|v| v.normalize().to_array())
            .collect();
        Mesh::from_trusted(positions, self.indices)
    }
}
