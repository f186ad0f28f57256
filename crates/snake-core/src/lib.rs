//! 3D Snake Core Geometry
//!
//! This crate contains the geometry primitives used by the 3D Snake game:
//! - Sphere: tetrahedron subdivision with vertex deduplication
//! - Normals: area-weighted smooth per-vertex normals
//! - Asset: the `{vertices, indices}` JSON mesh format and OBJ import
//! - Vertex: interleaved position/normal buffers for GPU upload
//! - Config: generator defaults stored as RON

pub mod config;
pub mod constants;
pub mod mesh;
pub mod primitive;
pub mod vertex;

pub use config::*;
pub use constants::*;
pub use mesh::*;
pub use primitive::*;
pub use vertex::*;
