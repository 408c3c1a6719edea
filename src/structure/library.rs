//! Structure library — named structure definitions stored as files in a directory.

use std::path::{Path, PathBuf};

use log::debug;

use super::definition::StructureDefinition;
use crate::error::{FluidError, Result};

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// A directory of `<id>.json` / `<id>.yaml` structure definitions.
#[derive(Debug, Clone)]
pub struct StructureLibrary {
    dir: PathBuf,
}

impl StructureLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a structure by id. JSON is tried first, then YAML.
    pub fn load(&self, id: &str) -> Result<StructureDefinition> {
        if id.is_empty() || id.contains(['/', '\\']) {
            return Err(FluidError::StructureNotFound(id.to_string()));
        }
        let path = EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{id}.{ext}")))
            .find(|p| p.is_file())
            .ok_or_else(|| FluidError::StructureNotFound(id.to_string()))?;
        debug!("loading structure {id:?} from {}", path.display());
        load_structure_file(&path)
    }
}

/// Load a single structure definition file, picking the decoder by extension.
pub fn load_structure_file(path: &Path) -> Result<StructureDefinition> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Ok(serde_yaml::from_str(&content)?),
    }
}
