//! Context Resolver
//!
//! A `Context` bundles a node with its ancestors, logical property path and
//! enclosing entity. It is what every editor feature consumes.

mod context;
mod resolver;

pub use context::{Context, ContextError};
pub use resolver::{context_at, context_at_path, PathContext};
