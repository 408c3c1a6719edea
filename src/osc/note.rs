//! Notes as authored in a score: pitch, start and length in any accepted notation.

use crate::error::{FluidError, Result};
use crate::notation::{value_to_midi_note_number, value_to_whole_notes, NotationValue};
use crate::score::Node;

/// A normalized note. Times are in whole notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub pitch: i64,
    pub start: f64,
    pub length: f64,
    pub velocity: Option<i64>,
}

impl Note {
    pub fn new(pitch: i64, start: f64, length: f64) -> Self {
        Self {
            pitch,
            start,
            length,
            velocity: None,
        }
    }

    pub fn with_velocity(mut self, velocity: i64) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Read a note mapping. Short keys (`n`, `s`, `l`, `v`) and long keys
    /// (`pitch`, `start`, `length`, `velocity`) are both accepted.
    ///
    /// `index` is the note's position in its list and is used for error reporting.
    pub fn from_node(node: &Node, index: usize) -> Result<Self> {
        if !matches!(node, Node::Mapping(_)) {
            return Err(FluidError::malformed_note(index, "note is not a mapping"));
        }
        let field = |short: &str, long: &str| node.get(short).or_else(|| node.get(long));
        let required = |short: &str, long: &str| -> Result<NotationValue> {
            field(short, long)
                .ok_or_else(|| FluidError::malformed_note(index, format!("missing {long}")))?
                .as_notation()
                .ok_or_else(|| FluidError::malformed_note(index, format!("{long} is not a number or string")))
        };

        let pitch = value_to_midi_note_number(&required("n", "pitch")?)?;
        let start = value_to_whole_notes(&required("s", "start")?)?;
        let length = value_to_whole_notes(&required("l", "length")?)?;
        if start.is_nan() || start < 0.0 {
            return Err(FluidError::malformed_note(index, format!("start {start} is negative")));
        }
        if length.is_nan() || length <= 0.0 {
            return Err(FluidError::malformed_note(index, format!("length {length} is not positive")));
        }

        let velocity = match field("v", "velocity") {
            None => None,
            Some(v) => Some(velocity_value(v).ok_or_else(|| {
                FluidError::malformed_note(index, "velocity is not an integer")
            })?),
        };

        Ok(Self {
            pitch,
            start,
            length,
            velocity,
        })
    }
}

fn velocity_value(node: &Node) -> Option<i64> {
    use crate::score::Scalar;
    match node.as_scalar()? {
        Scalar::Int(v) => Some(*v),
        Scalar::Float(f) if f.fract() == 0.0 && f.abs() < 9_223_372_036_854_775_808.0 => Some(*f as i64),
        _ => None,
    }
}

/// Read a sequence of notes. The first bad note aborts the whole list.
pub fn notes_from_node(node: &Node) -> Result<Vec<Note>> {
    match node {
        Node::Sequence(seq) => seq
            .items
            .iter()
            .enumerate()
            .map(|(i, n)| Note::from_node(n, i))
            .collect(),
        _ => Err(FluidError::malformed_note(0, "notes must be a sequence")),
    }
}
