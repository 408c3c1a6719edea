//! Score tree nodes.
//!
//! A section is an arbitrarily nested tree. Nothing here knows about field
//! names; the only structure is the three node shapes.

use serde_yaml::Value as YamlValue;

use super::path::PathSegment;
use crate::error::{FluidError, Result};
use crate::notation::NotationValue;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Add `delta` to a numeric scalar. Non-numeric scalars are returned unchanged.
    pub fn offset_by(&self, delta: i64) -> Scalar {
        match self {
            Scalar::Int(v) => Scalar::Int(v.saturating_add(delta)),
            Scalar::Float(v) => Scalar::Float(v + delta as f64),
            other => other.clone(),
        }
    }

    /// View this scalar as a duration or pitch notation, if it is one.
    pub fn as_notation(&self) -> Option<NotationValue> {
        match self {
            Scalar::Int(v) => Some(NotationValue::Int(*v)),
            Scalar::Float(v) => Some(NotationValue::Float(*v)),
            Scalar::Text(s) => Some(NotationValue::Text(s.clone())),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }
}

/// An ordered string-keyed mapping. Insertion order is authoring order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// An ordered sequence.
///
/// `keyed` holds entries addressed by a non-numeric key rather than a
/// position. They can't be written out as part of a plain list, so the
/// transformer reports their paths separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    pub items: Vec<Node>,
    pub keyed: Vec<(String, Node)>,
}

impl Sequence {
    pub fn new(items: Vec<Node>) -> Self {
        Self {
            items,
            keyed: Vec::new(),
        }
    }

    pub fn with_keyed(mut self, key: impl Into<String>, value: Node) -> Self {
        self.keyed.push((key.into(), value));
        self
    }
}

/// A node in a score tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Sequence),
    Scalar(Scalar),
}

impl Node {
    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Node::Sequence(Sequence::new(items))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Text(s.into()))
    }

    /// Look up a mapping key (or a keyed sequence entry).
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(m) => m.get(key),
            Node::Sequence(s) => s.keyed.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Node::Scalar(_) => None,
        }
    }

    /// Follow a path of keys and indices from this node.
    pub fn at_path(&self, path: &[PathSegment]) -> Option<&Node> {
        path.iter().try_fold(self, |node, segment| match (node, segment) {
            (Node::Sequence(s), PathSegment::Index(i)) => s.items.get(*i),
            (_, PathSegment::Key(k)) => node.get(k),
            _ => None,
        })
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_notation(&self) -> Option<NotationValue> {
        self.as_scalar().and_then(Scalar::as_notation)
    }

    /// Convert a YAML value. Tags are dropped; non-scalar mapping keys are rejected.
    pub fn from_yaml(value: YamlValue) -> Result<Node> {
        Ok(match value {
            YamlValue::Null => Node::Scalar(Scalar::Null),
            YamlValue::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            YamlValue::Number(n) => Node::Scalar(match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            YamlValue::String(s) => Node::Scalar(Scalar::Text(s)),
            YamlValue::Sequence(items) => Node::sequence(
                items
                    .into_iter()
                    .map(Node::from_yaml)
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (k, v) in map {
                    mapping.insert(yaml_key(k)?, Node::from_yaml(v)?);
                }
                Node::Mapping(mapping)
            }
            YamlValue::Tagged(tagged) => Node::from_yaml(tagged.value)?,
        })
    }

    pub fn from_json(value: serde_json::Value) -> Node {
        use serde_json::Value as J;
        match value {
            J::Null => Node::Scalar(Scalar::Null),
            J::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            J::Number(n) => Node::Scalar(match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            J::String(s) => Node::Scalar(Scalar::Text(s)),
            J::Array(items) => Node::sequence(items.into_iter().map(Node::from_json).collect()),
            J::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to YAML. Keyed sequence entries have no place in a YAML
    /// list and are left out; callers patch them back in from their paths.
    pub fn to_yaml(&self) -> YamlValue {
        match self {
            Node::Scalar(Scalar::Null) => YamlValue::Null,
            Node::Scalar(Scalar::Bool(b)) => YamlValue::Bool(*b),
            Node::Scalar(Scalar::Int(i)) => YamlValue::Number((*i).into()),
            Node::Scalar(Scalar::Float(f)) => YamlValue::Number((*f).into()),
            Node::Scalar(Scalar::Text(s)) => YamlValue::String(s.clone()),
            Node::Sequence(seq) => YamlValue::Sequence(seq.items.iter().map(Node::to_yaml).collect()),
            Node::Mapping(m) => YamlValue::Mapping(
                m.iter()
                    .map(|(k, v)| (YamlValue::String(k.to_string()), v.to_yaml()))
                    .collect(),
            ),
        }
    }
}

fn yaml_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(FluidError::Parse(format!(
            "unsupported mapping key: {other:?}"
        ))),
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Scalar(Scalar::Int(v))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Scalar(Scalar::Float(v))
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::text(v)
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Node::Mapping(m)
    }
}
