//! Mesh generation configuration
//!
//! Settings can be serialized and loaded from RON configuration files.
//! Missing sections fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mesh::MeshError;
use crate::primitive::SphereParams;

/// Complete mesh configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MeshConfig {
    /// Sphere generator settings
    #[serde(default)]
    pub sphere: SphereParams,
}

impl MeshConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, MeshError> {
        ron::from_str(content).map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Serialize configuration to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, MeshError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MeshError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded mesh config from '{}'", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| MeshError::Io(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SUBDIVISION_LEVEL;
    use crate::mesh::IndexFormat;

    #[test]
    fn test_defaults() {
        let config = MeshConfig::new();
        assert_eq!(config.sphere.subdivision_level, DEFAULT_SUBDIVISION_LEVEL);
        assert_eq!(config.sphere.index_format, IndexFormat::U16);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = MeshConfig::from_ron_str("()").unwrap();
        assert_eq!(config, MeshConfig::default());

        let config = MeshConfig::from_ron_str("(sphere: (subdivision_level: 3))").unwrap();
        assert_eq!(config.sphere.subdivision_level, 3);
        assert_eq!(config.sphere.index_format, IndexFormat::U16);
    }

    #[test]
    fn test_index_format_names() {
        let config =
            MeshConfig::from_ron_str("(sphere: (subdivision_level: 9, index_format: u32))")
                .unwrap();
        assert_eq!(config.sphere.index_format, IndexFormat::U32);
    }

    #[test]
    fn test_parse_error() {
        let result = MeshConfig::from_ron_str("(sphere: (subdivision_level: \"seven\"))");
        assert!(matches!(result, Err(MeshError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let path = temp.path().join("mesh.ron");

        let mut config = MeshConfig::new();
        config.sphere.subdivision_level = 5;
        config.save(&path).unwrap();

        assert_eq!(MeshConfig::load(&path).unwrap(), config);
    }
}
