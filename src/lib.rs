//! Fluidscore — arrange declarative musical scores and compile them into
//! DAW control messages.
//!
//! Pipeline: authored sections → [`structure::resolve`] → [`transform::transform`]
//! per placed section → [`osc`] message batches for an external transport.

pub mod arrange;
pub mod config;
pub mod error;
pub mod notation;
pub mod osc;
pub mod score;
pub mod structure;
pub mod transform;

pub use arrange::{arrange, ArrangedSection, StructuredScore};
pub use config::ArrangeConfig;
pub use error::{FluidError, Result};
