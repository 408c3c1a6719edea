//! Arrangement — resolve the structure, then transform each placed section.

use log::{debug, info};
use serde_yaml::{Mapping as YamlMapping, Value as YamlValue};

use crate::error::Result;
use crate::score::{Node, NodePath};
use crate::structure::{resolve, section_names, Label, StructureDefinition};
use crate::transform::{transform, Markers};

/// One placed section of an arranged score.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrangedSection {
    /// Display name (`Intro`, `A0`, `B1`, `Outro`, ...).
    pub name: String,
    pub label: Label,
    pub tree: Node,
}

/// An arranged score.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredScore {
    pub sections: Vec<ArrangedSection>,
    /// Keyed sequence entries, which a list-based writer must patch back in.
    pub keyed_entries: Vec<NodePath>,
}

impl StructuredScore {
    /// The transformed value at a keyed entry's path.
    pub fn keyed_value(&self, path: &NodePath) -> Option<&Node> {
        self.sections.get(path.section)?.tree.at_path(&path.segments)
    }

    /// YAML form: a list of `{ name, tree }` mappings. Keyed entries are not
    /// part of the tree output.
    pub fn to_yaml(&self) -> YamlValue {
        YamlValue::Sequence(
            self.sections
                .iter()
                .map(|s| {
                    let mut m = YamlMapping::new();
                    m.insert("name".into(), YamlValue::String(s.name.clone()));
                    m.insert("tree".into(), s.tree.to_yaml());
                    YamlValue::Mapping(m)
                })
                .collect(),
        )
    }
}

/// Arrange `score` according to `structure`.
///
/// The number of sections in the result always equals the number of labels.
/// Any error aborts the whole arrangement.
pub fn arrange(
    score: &[Node],
    structure: &StructureDefinition,
    markers: &Markers,
) -> Result<StructuredScore> {
    let labels = structure.labels()?;
    let placed = resolve(score, &labels)?;
    let names = section_names(&labels);

    let mut sections = Vec::with_capacity(placed.len());
    let mut keyed_entries = Vec::new();
    for (i, ((node, label), name)) in placed.into_iter().zip(&labels).zip(names).enumerate() {
        let out = transform(i, node, structure, markers)?;
        debug!("section {i} ({name}) arranged");
        keyed_entries.extend(out.keyed_paths);
        sections.push(ArrangedSection {
            name,
            label: *label,
            tree: out.node,
        });
    }

    info!(
        "arranged {} sections from {} authored sections",
        sections.len(),
        score.len()
    );
    Ok(StructuredScore {
        sections,
        keyed_entries,
    })
}
