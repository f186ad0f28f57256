//! Procedural mesh generation
//!
//! Generates indexed triangle meshes for basic shapes:
//! - Sphere (subdivided tetrahedron projected onto the unit sphere)

mod sphere;

pub use sphere::{
    SphereParams, expected_sphere_vertices, generate_sphere, generate_sphere_with_params,
};
