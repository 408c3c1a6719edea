//! Tree transformer — applies one section's modifiers to that section's tree.
//!
//! The walk only recognizes the two marker keys. Everything under the
//! pitch-library marker has its numbers shifted by `key_diff`; a drums marker
//! is replaced by an empty mapping when `drums-delta` is zero. All other keys
//! and shapes are copied through as they are.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::score::{Mapping, Node, NodePath, PathSegment, Sequence};
use crate::structure::StructureDefinition;

/// The reserved keys that flag subtrees for section modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    #[serde(default = "default_pitch_library")]
    pub pitch_library: String,
    #[serde(default = "default_drums")]
    pub drums: String,
}

fn default_pitch_library() -> String {
    "nLibrary".to_string()
}

fn default_drums() -> String {
    "drums".to_string()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            pitch_library: default_pitch_library(),
            drums: default_drums(),
        }
    }
}

/// A transformed section tree plus the paths of keyed sequence entries found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub node: Node,
    pub keyed_paths: Vec<NodePath>,
}

/// Modifiers and flags inherited down the walk.
#[derive(Debug, Clone, Copy)]
struct Context<'a> {
    section: usize,
    key_diff: i64,
    drop_drums: bool,
    in_library: bool,
    markers: &'a Markers,
}

/// Transform the tree of the section at resolved position `section_index`.
///
/// The input is never modified; a new tree is built. Calling this twice with
/// the same arguments gives the same result.
pub fn transform(
    section_index: usize,
    node: &Node,
    structure: &StructureDefinition,
    markers: &Markers,
) -> Result<Transformed> {
    let template = structure.template(section_index)?;
    let ctx = Context {
        section: section_index,
        key_diff: template.key_diff()?,
        drop_drums: template.drums_delta()? == 0,
        in_library: false,
        markers,
    };

    let mut path = Vec::new();
    let mut keyed_paths = Vec::new();
    let node = walk(node, &mut path, ctx, &mut keyed_paths);

    trace!(
        "section {section_index}: transformed, {} keyed entries",
        keyed_paths.len()
    );
    Ok(Transformed { node, keyed_paths })
}

fn walk(node: &Node, path: &mut Vec<PathSegment>, mut ctx: Context<'_>, keyed: &mut Vec<NodePath>) -> Node {
    if let Some(PathSegment::Key(key)) = path.last() {
        // The library check wins: a drums key inside the library is just data.
        if ctx.in_library || *key == ctx.markers.pitch_library {
            if !ctx.in_library {
                trace!("section {}: transposing {} by {}", ctx.section, key, ctx.key_diff);
            }
            ctx.in_library = true;
        } else if *key == ctx.markers.drums && ctx.drop_drums {
            trace!("section {}: dropping drums subtree", ctx.section);
            return Node::empty_mapping();
        }
    }

    match node {
        Node::Scalar(scalar) if ctx.in_library => Node::Scalar(scalar.offset_by(ctx.key_diff)),
        Node::Scalar(scalar) => Node::Scalar(scalar.clone()),
        Node::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.items.len());
            for (i, item) in seq.items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                items.push(walk(item, path, ctx, keyed));
                path.pop();
            }
            let mut out = Sequence::new(items);
            for (key, value) in &seq.keyed {
                path.push(PathSegment::Key(key.clone()));
                out.keyed.push((key.clone(), walk(value, path, ctx, keyed)));
                keyed.push(NodePath::new(ctx.section, path.clone()));
                path.pop();
            }
            Node::Sequence(out)
        }
        Node::Mapping(map) => {
            let mut out = Mapping::new();
            for (key, value) in map.iter() {
                path.push(PathSegment::Key(key.to_string()));
                out.insert(key, walk(value, path, ctx, keyed));
                path.pop();
            }
            Node::Mapping(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FluidError;
    use crate::structure::{Label, SectionTemplate};

    fn yaml(src: &str) -> Node {
        Node::from_yaml(serde_yaml::from_str(src).unwrap()).unwrap()
    }

    fn structure(templates: Vec<SectionTemplate>) -> StructureDefinition {
        let labels: Vec<Label> = (0..templates.len()).map(Label::Index).collect();
        StructureDefinition::new(&labels, templates)
    }

    fn run(src: &str, key_diff: i64, drums_delta: i64) -> Transformed {
        let def = structure(vec![SectionTemplate::new(key_diff, drums_delta)]);
        transform(0, &yaml(src), &def, &Markers::default()).unwrap()
    }

    const SECTION: &str = r#"
tempo: 120
nLibrary:
  a: 60
  b: [62, 64.5, c4]
  nested: { deep: [{ x: 1 }] }
melody: [60, 62]
drums:
  k: 36
  pattern: "k..k"
"#;

    #[test]
    fn library_numbers_are_transposed() {
        let out = run(SECTION, 3, 1).node;
        assert_eq!(out.get("nLibrary").unwrap().get("a"), Some(&Node::from(63i64)));
        let b = out.get("nLibrary").unwrap().get("b").unwrap();
        assert_eq!(b.at_path(&[PathSegment::Index(0)]), Some(&Node::from(65i64)));
        assert_eq!(b.at_path(&[PathSegment::Index(1)]), Some(&Node::from(67.5)));
        assert_eq!(b.at_path(&[PathSegment::Index(2)]), Some(&Node::from("c4")));
        let deep = out
            .get("nLibrary")
            .unwrap()
            .at_path(&[
                PathSegment::Key("nested".into()),
                PathSegment::Key("deep".into()),
                PathSegment::Index(0),
                PathSegment::Key("x".into()),
            ])
            .unwrap();
        assert_eq!(deep, &Node::from(4i64));
    }

    #[test]
    fn numbers_outside_library_untouched() {
        let out = run(SECTION, 3, 1).node;
        assert_eq!(out.get("tempo"), Some(&Node::from(120i64)));
        assert_eq!(out.get("melody"), yaml(SECTION).get("melody"));
    }

    #[test]
    fn zero_diff_is_identity() {
        let input = yaml(SECTION);
        let def = structure(vec![SectionTemplate::new(0, 1)]);
        let out = transform(0, &input, &def, &Markers::default()).unwrap();
        assert_eq!(out.node, input);
    }

    #[test]
    fn drums_removed_when_delta_zero() {
        let out = run(SECTION, 0, 0).node;
        assert_eq!(out.get("drums"), Some(&Node::empty_mapping()));
    }

    #[test]
    fn drums_kept_for_any_nonzero_delta() {
        let input = yaml(SECTION);
        for delta in [1, -1, 7] {
            let out = run(SECTION, 0, delta).node;
            assert_eq!(out.get("drums"), input.get("drums"));
        }
    }

    #[test]
    fn markers_found_at_any_depth() {
        let src = "tracks:\n  - name: lead\n    nLibrary: [60]\n  - name: beat\n    drums: [1, 2]\n";
        let out = run(src, -12, 0).node;
        let tracks = out.get("tracks").unwrap();
        assert_eq!(
            tracks.at_path(&[PathSegment::Index(0), PathSegment::Key("nLibrary".into()), PathSegment::Index(0)]),
            Some(&Node::from(48i64))
        );
        assert_eq!(
            tracks.at_path(&[PathSegment::Index(1), PathSegment::Key("drums".into())]),
            Some(&Node::empty_mapping())
        );
    }

    #[test]
    fn drums_inside_library_is_not_dropped() {
        let out = run("nLibrary:\n  drums: [36]\n", 1, 0).node;
        let inner = out.get("nLibrary").unwrap().get("drums").unwrap();
        assert_eq!(inner, &Node::sequence(vec![Node::from(37i64)]));
    }

    #[test]
    fn scalar_library_value_is_transposed() {
        let out = run("nLibrary: 60\n", 2, 1).node;
        assert_eq!(out.get("nLibrary"), Some(&Node::from(62i64)));
    }

    #[test]
    fn substring_keys_are_not_markers() {
        let out = run("myNLibraryCopy: [60]\nnLibraryX: 1\nsnare_drums: { a: 1 }\n", 5, 0).node;
        assert_eq!(out, yaml("myNLibraryCopy: [60]\nnLibraryX: 1\nsnare_drums: { a: 1 }\n"));
    }

    #[test]
    fn section_index_selects_template() {
        let def = structure(vec![SectionTemplate::new(1, 1), SectionTemplate::new(10, 0)]);
        let input = yaml("nLibrary: [50]\ndrums: [1]\n");
        let first = transform(0, &input, &def, &Markers::default()).unwrap().node;
        let second = transform(1, &input, &def, &Markers::default()).unwrap().node;
        assert_eq!(first, yaml("nLibrary: [51]\ndrums: [1]\n"));
        assert_eq!(second, yaml("nLibrary: [60]\ndrums: {}\n"));
    }

    #[test]
    fn keyed_entries_are_reported_with_paths() {
        let seq = Sequence::new(vec![Node::from(60i64)]).with_keyed("r", Node::from("1234"));
        let mut section = Mapping::new();
        section.insert("nLibrary", Node::Sequence(seq));
        let def = structure(vec![SectionTemplate::new(0, 1), SectionTemplate::new(2, 1)]);

        let out = transform(1, &Node::Mapping(section), &def, &Markers::default()).unwrap();
        assert_eq!(out.keyed_paths.len(), 1);
        assert_eq!(out.keyed_paths[0].to_string(), "1.nLibrary.r");
        assert_eq!(
            out.node.at_path(&[PathSegment::Key("nLibrary".into()), PathSegment::Index(0)]),
            Some(&Node::from(62i64))
        );
        assert_eq!(
            out.node.at_path(&[PathSegment::Key("nLibrary".into()), PathSegment::Key("r".into())]),
            Some(&Node::from("1234"))
        );
    }

    #[test]
    fn repeated_calls_are_independent() {
        let seq = Sequence::new(vec![]).with_keyed("r", Node::from(1i64));
        let node = Node::sequence(vec![Node::Sequence(seq)]);
        let def = structure(vec![SectionTemplate::new(0, 1)]);
        let a = transform(0, &node, &def, &Markers::default()).unwrap();
        let b = transform(0, &node, &def, &Markers::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.keyed_paths.len(), 1);
    }

    #[test]
    fn custom_markers() {
        let markers = Markers {
            pitch_library: "notes".into(),
            drums: "perc".into(),
        };
        let def = structure(vec![SectionTemplate::new(1, 0)]);
        let out = transform(0, &yaml("notes: [1]\nperc: [1]\nnLibrary: [1]\n"), &def, &markers).unwrap();
        assert_eq!(out.node, yaml("notes: [2]\nperc: {}\nnLibrary: [1]\n"));
    }

    #[test]
    fn missing_template_is_malformed() {
        let def = structure(vec![SectionTemplate::new(0, 1)]);
        let err = transform(3, &yaml("a: 1"), &def, &Markers::default()).unwrap_err();
        assert!(matches!(err, FluidError::MalformedStructure(_)));
    }

    #[test]
    fn unknown_keys_are_not_errors() {
        let out = run("whatever: { nested: [true, null, x] }\n", 4, 0).node;
        assert_eq!(out, yaml("whatever: { nested: [true, null, x] }\n"));
    }
}
