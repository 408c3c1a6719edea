//! Message builders for the DAW control protocol.
//!
//! Each builder returns a fresh [`Message`] (or a batch of them). Clip times
//! are given in beats; note times are given in whole notes and converted to
//! quarter notes on the way out.

use log::debug;

use super::message::{Arg, Message};
use super::note::{notes_from_node, Note};
use crate::error::Result;
use crate::score::Node;

pub const SELECT_TRACK: &str = "/audiotrack/select";
pub const SELECT_CLIP: &str = "/midiclip/select";
pub const CLEAR_CLIP: &str = "/midiclip/clear";
pub const ADD_NOTE: &str = "/midiclip/n";
pub const SELECT_PLUGIN: &str = "/plugin/select";
pub const SET_PARAM: &str = "/plugin/param/set";
pub const SAVE_SESSION: &str = "/file/save";

/// Quarter notes per whole note.
const QUARTERS_PER_WHOLE: f64 = 4.0;

/// How the DAW writes file references when saving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Relative,
    Absolute,
}

impl PathMode {
    fn as_str(self) -> &'static str {
        match self {
            PathMode::Relative => "relative",
            PathMode::Absolute => "absolute",
        }
    }
}

pub fn select_track(name: &str) -> Message {
    Message::new(SELECT_TRACK, vec![Arg::string(name)])
}

/// Select (or create) a MIDI clip spanning `start_beats..end_beats`.
pub fn select_clip(name: &str, start_beats: f64, end_beats: f64) -> Message {
    Message::new(
        SELECT_CLIP,
        vec![
            Arg::string(name),
            Arg::Float(start_beats),
            Arg::Float(end_beats),
        ],
    )
}

pub fn clear_clip() -> Message {
    Message::new(CLEAR_CLIP, Vec::new())
}

/// Add a note to the selected clip.
///
/// The velocity argument is only sent when one is given.
pub fn add_note(pitch: i64, start_whole: f64, length_whole: f64, velocity: Option<i64>) -> Message {
    let mut args = vec![
        Arg::Integer(pitch),
        Arg::Float(start_whole * QUARTERS_PER_WHOLE),
        Arg::Float(length_whole * QUARTERS_PER_WHOLE),
    ];
    if let Some(v) = velocity {
        args.push(Arg::Integer(v));
    }
    Message::new(ADD_NOTE, args)
}

pub fn select_plugin(name: &str) -> Message {
    Message::new(SELECT_PLUGIN, vec![Arg::string(name)])
}

/// Set a parameter on the selected plugin, ramping over `ramp_seconds`.
pub fn set_param(name: &str, value: f64, ramp_seconds: f64) -> Message {
    Message::new(
        SET_PARAM,
        vec![Arg::string(name), Arg::Float(value), Arg::Float(ramp_seconds)],
    )
}

pub fn save_session(path: &str) -> Message {
    Message::new(SAVE_SESSION, vec![Arg::string(path)])
}

pub fn save_session_with(path: &str, mode: PathMode) -> Message {
    Message::new(
        SAVE_SESSION,
        vec![Arg::string(path), Arg::string(mode.as_str())],
    )
}

/// Build the batch that replaces a clip's contents:
/// select track, select clip, clear, then one note message per note.
///
/// Notes are emitted in the order given; sort them first if time order matters.
pub fn create_clip(
    track_name: &str,
    clip_name: &str,
    start_beats: f64,
    end_beats: f64,
    notes: &[Note],
) -> Vec<Message> {
    let mut batch = Vec::with_capacity(notes.len() + 3);
    batch.push(select_track(track_name));
    batch.push(select_clip(clip_name, start_beats, end_beats));
    batch.push(clear_clip());
    batch.extend(
        notes
            .iter()
            .map(|n| add_note(n.pitch, n.start, n.length, n.velocity)),
    );
    debug!(
        "clip {track_name}/{clip_name}: {} messages",
        batch.len()
    );
    batch
}

/// Like [`create_clip`], reading the notes from a score node.
///
/// Every note is validated before any message is built, so a bad note
/// yields an error and no batch at all.
pub fn create_clip_from_node(
    track_name: &str,
    clip_name: &str,
    start_beats: f64,
    end_beats: f64,
    notes: &Node,
) -> Result<Vec<Message>> {
    let notes = notes_from_node(notes)?;
    Ok(create_clip(track_name, clip_name, start_beats, end_beats, &notes))
}
