//! # snake-mesh
//!
//! Command-line tools for 3D Snake mesh assets.
//!
//! ## Commands
//! - `convert` - Convert an OBJ model to a JSON mesh asset
//! - `sphere` - Write a generated unit sphere as a JSON mesh asset
//! - `inspect` - Validate a JSON mesh asset and report on its normals

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use snake_core::{
    IndexFormat, MeshAsset, MeshConfig, ShadedMesh, convert_obj_to_json,
    generate_sphere_with_params,
};

/// 3D Snake mesh asset tools
#[derive(Parser)]
#[command(name = "snake-mesh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Index buffer width accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndexWidth {
    U16,
    U32,
}

impl From<IndexWidth> for IndexFormat {
    fn from(width: IndexWidth) -> Self {
        match width {
            IndexWidth::U16 => IndexFormat::U16,
            IndexWidth::U32 => IndexFormat::U32,
        }
    }
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert an OBJ model (triangles only) to a JSON mesh asset
    Convert {
        /// OBJ file to read
        obj: PathBuf,

        /// JSON file to write
        json: PathBuf,
    },

    /// Write a generated unit sphere as a JSON mesh asset
    Sphere {
        /// JSON file to write
        json: PathBuf,

        /// Subdivision level (overrides the config file)
        #[arg(short, long, allow_hyphen_values = true)]
        level: Option<i32>,

        /// Index width the sphere must fit in (overrides the config file)
        #[arg(short, long, value_enum)]
        index_format: Option<IndexWidth>,

        /// RON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a JSON mesh asset and report on its normals
    Inspect {
        /// JSON file to read
        json: PathBuf,
    },
}

/// Summary of an inspected asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReport {
    pub vertices: usize,
    pub triangles: usize,
    /// Vertices no triangle references
    pub unreferenced_vertices: usize,
    /// Vertices whose smooth normal came out as zero, either unreferenced or
    /// surrounded by faces that cancel out
    pub undefined_normals: usize,
    pub bounds: Option<([f32; 3], [f32; 3])>,
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { obj, json } => {
            let asset = convert_obj_to_json(&obj, &json)
                .with_context(|| format!("failed to convert '{}'", obj.display()))?;
            tracing::info!(
                "Wrote {} vertices and {} triangles to '{}'",
                asset.vertices.len() / 3,
                asset.indices.len() / 3,
                json.display()
            );
        }

        Commands::Sphere {
            json,
            level,
            index_format,
            config,
        } => {
            write_sphere(&json, level, index_format, config.as_deref())?;
        }

        Commands::Inspect { json } => {
            let report = inspect(&json)?;
            tracing::info!("Asset '{}':", json.display());
            tracing::info!("  Vertices: {}", report.vertices);
            tracing::info!("  Triangles: {}", report.triangles);
            if let Some((min, max)) = report.bounds {
                tracing::info!("  Bounds: {:?} .. {:?}", min, max);
            }
            if report.unreferenced_vertices > 0 {
                tracing::warn!(
                    "  {} vertices are not referenced by any triangle",
                    report.unreferenced_vertices
                );
            }
            if report.undefined_normals > report.unreferenced_vertices {
                tracing::warn!(
                    "  {} referenced vertices have a zero normal",
                    report.undefined_normals - report.unreferenced_vertices
                );
            }
        }
    }

    Ok(())
}

/// Generate a sphere from config plus overrides and save it as an asset
pub fn write_sphere(
    json: &Path,
    level: Option<i32>,
    index_format: Option<IndexWidth>,
    config: Option<&Path>,
) -> Result<MeshAsset> {
    let mut config = match config {
        Some(path) => MeshConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => MeshConfig::default(),
    };
    if let Some(level) = level {
        config.sphere.subdivision_level = level;
    }
    if let Some(width) = index_format {
        config.sphere.index_format = width.into();
    }

    let mesh = generate_sphere_with_params(&config.sphere).with_context(|| {
        format!(
            "failed to generate sphere at level {}",
            config.sphere.subdivision_level
        )
    })?;
    let asset = MeshAsset::from(&mesh);
    asset
        .save(json)
        .with_context(|| format!("failed to write '{}'", json.display()))?;

    tracing::info!(
        "Wrote level {} sphere ({} vertices, {} triangles) to '{}'",
        config.sphere.subdivision_level,
        mesh.vertex_count(),
        mesh.triangle_count(),
        json.display()
    );
    Ok(asset)
}

/// Load an asset, validate it, and compute its normals
pub fn inspect(json: &Path) -> Result<AssetReport> {
    let mesh = MeshAsset::load(json)
        .and_then(MeshAsset::into_mesh)
        .with_context(|| format!("invalid mesh asset '{}'", json.display()))?;
    if mesh.is_empty() {
        tracing::warn!("Asset '{}' has no triangles", json.display());
    }

    let mut referenced = vec![false; mesh.vertex_count()];
    for &i in mesh.indices() {
        referenced[i as usize] = true;
    }
    let unreferenced_vertices = referenced.iter().filter(|&&r| !r).count();

    let shaded = ShadedMesh::from_mesh(&mesh);
    let undefined_normals = shaded
        .vertices
        .iter()
        .filter(|v| v.normal == [0.0, 0.0, 0.0])
        .count();

    Ok(AssetReport {
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        unreferenced_vertices,
        undefined_normals,
        bounds: mesh.bounding_box(),
    })
}
