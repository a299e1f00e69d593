//! Shared data models

mod document;
mod path;
mod position;

pub use document::{Document, DocumentFormat};
pub use path::{PathSegment, PropertyPath};
pub use position::{Position, Range};
