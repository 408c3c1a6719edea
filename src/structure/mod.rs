//! Song structure — which authored sections play in which order, and how each
//! placement is modified.

pub mod definition;
pub mod library;
pub mod resolve;

pub use definition::{Label, Numeric, SectionTemplate, StructureDefinition, UNIQUE_INTRO, UNIQUE_OUTRO};
pub use library::{load_structure_file, StructureLibrary};
pub use resolve::{resolve, section_names};
