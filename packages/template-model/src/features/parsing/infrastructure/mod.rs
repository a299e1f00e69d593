//! Parsing infrastructure (tree-sitter backends)

pub mod file_loader;
pub mod handle;
pub mod native;
pub mod portable;
pub mod provider;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use file_loader::FileGrammarLoader;
pub use handle::{BackendKind, ParserHandle};
pub use native::NativeGrammars;
pub use portable::{PortableBackend, PortableGrammars, Readiness, RetryPolicy};
pub use provider::ParserProvider;
#[cfg(feature = "wasm")]
pub use wasm::WasmtimeRuntime;
