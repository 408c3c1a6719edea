//! Score data model — sections as schema-free trees of mappings, sequences and scalars.

pub mod node;
pub mod path;

pub use node::{Mapping, Node, Scalar, Sequence};
pub use path::{NodePath, PathSegment};

use std::path::Path;

use log::debug;

use crate::error::{FluidError, Result};

/// A score: an ordered sequence of section trees.
pub type Score = Vec<Node>;

/// Load a tree from a file: `.json` as JSON, anything else as YAML.
pub fn load_node(path: &Path) -> Result<Node> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Node::from_json(serde_json::from_str(&content)?)),
        _ => Node::from_yaml(serde_yaml::from_str(&content)?),
    }
}

/// Load a score from a YAML or JSON file whose root is the section sequence.
pub fn load_score(path: &Path) -> Result<Score> {
    match load_node(path)? {
        Node::Sequence(seq) => {
            debug!("loaded score with {} sections from {}", seq.items.len(), path.display());
            Ok(seq.items)
        }
        _ => Err(FluidError::Parse(format!(
            "{}: score root must be a sequence of sections",
            path.display()
        ))),
    }
}
