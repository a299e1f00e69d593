//! Shared module - Common types and utilities
//!
//! Types shared by every feature: documents, positions, property paths and
//! tree-sitter helpers.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
