//! Parsing Feature: parser backend provider
//!
//! ## Structure
//! - `ports/` - GrammarAssetLoader, PortableRuntime traits
//! - `infrastructure/` - native grammars, portable grammar cache, provider

pub mod infrastructure;
pub mod ports;

// Re-exports
pub use infrastructure::{
    BackendKind, FileGrammarLoader, NativeGrammars, ParserHandle, ParserProvider,
    PortableBackend, PortableGrammars, Readiness, RetryPolicy,
};
pub use ports::{GrammarAssetLoader, PortableRuntime};
