//! Syntax Tree
//!
//! One tree per document version, queried by position or by logical path.

mod tree;

pub use tree::{PathInfo, PathLookup, SyntaxTree};
