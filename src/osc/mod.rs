//! OSC message compilation — typed DAW control messages and the builders that
//! produce them. Delivery to a running DAW is left to the caller.

pub mod builders;
pub mod message;
pub mod note;

pub use builders::{
    add_note, clear_clip, create_clip, create_clip_from_node, save_session, save_session_with,
    select_clip, select_plugin, select_track, set_param, PathMode,
};
pub use message::{encode_batch, Arg, Message};
pub use note::{notes_from_node, Note};
