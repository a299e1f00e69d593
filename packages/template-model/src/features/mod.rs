//! Feature modules, leaf first
//!
//! - `parsing`     - parser backend provider (native / portable grammars)
//! - `grammar`     - grammar normalization (YAML and JSON node roles)
//! - `syntax_tree` - position and path queries over one document version
//! - `values`      - value tree parsing with YAML recovery
//! - `entities`    - section vocabulary, typed entities, normalization
//! - `context`     - context resolution for editor features
//! - `cache`       - per-version section/entity cache
//! - `documents`   - open document snapshots

pub mod cache;
pub mod context;
pub mod documents;
pub mod entities;
pub mod grammar;
pub mod parsing;
pub mod syntax_tree;
pub mod values;
