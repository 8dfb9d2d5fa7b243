//! Data model for value documents.

pub mod value;

pub use value::{DocumentError, ElementKind, Kind, Mapping, Sequence, Value};
