//! Configuration — marker keys and the structure library location, loaded
//! from ~/.fluidscore/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::structure::StructureLibrary;
use crate::transform::Markers;

/// Arrangement configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangeConfig {
    /// Reserved keys that flag subtrees for section modifiers.
    #[serde(default)]
    pub markers: Markers,
    /// Directory holding `<id>.json` / `<id>.yaml` structure definitions.
    #[serde(default = "default_structure_dir")]
    pub structure_dir: PathBuf,
}

fn default_structure_dir() -> PathBuf {
    PathBuf::from("structure-library")
}

/// Get the config file path.
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fluidscore").join("config.yaml"))
}

impl ArrangeConfig {
    /// Load config from the standard path (~/.fluidscore/config.yaml).
    /// Returns None if the file doesn't exist or doesn't parse.
    pub fn load() -> Option<Self> {
        let content = std::fs::read_to_string(config_path()?).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load config from an explicit path, reporting any failure.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn library(&self) -> StructureLibrary {
        StructureLibrary::new(&self.structure_dir)
    }
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            structure_dir: default_structure_dir(),
        }
    }
}
