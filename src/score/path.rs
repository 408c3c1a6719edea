//! Paths into score trees.

use std::fmt;

/// One step of a path: a sequence position or a mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => write!(f, "{k}"),
        }
    }
}

/// A location inside a resolved score: the section position plus the
/// segments leading from that section's root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub section: usize,
    pub segments: Vec<PathSegment>,
}

impl NodePath {
    pub fn new(section: usize, segments: Vec<PathSegment>) -> Self {
        Self { section, segments }
    }
}

/// Dotted form, section first: `2.nLibrary.r`.
impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section)?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
