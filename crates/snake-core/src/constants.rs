//! Global constants for snake-core

/// Default recursion depth for sphere generation
pub const DEFAULT_SUBDIVISION_LEVEL: i32 = 7;

/// Corners of the regular tetrahedron that seeds sphere generation
pub const TETRAHEDRON_CORNERS: [[f32; 3]; 4] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.942809, 0.333333],
    [-0.816497, -0.471405, 0.333333],
    [0.816497, -0.471405, 0.333333],
];

/// Largest vertex count addressable by 16-bit indices
pub const MAX_U16_VERTICES: u64 = 1 << 16;

/// Largest vertex count addressable by 32-bit indices
pub const MAX_U32_VERTICES: u64 = 1 << 32;
