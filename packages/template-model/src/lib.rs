/*
 * Template Model - syntax-tree-backed semantic model for IaC templates
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Document, Position, PropertyPath)
 * - config/      : Versioned YAML configuration
 * - features/    : Vertical slices (parsing → grammar → syntax_tree → values
 *                  → entities → context → cache → documents)
 * - model        : Session entry point
 *
 * Malformed text is the normal case while a template is being typed. Every
 * query degrades to an empty or partial result instead of failing.
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Configuration
pub mod config;

/// Feature modules
pub mod features;

/// Error types
pub mod errors;

mod model;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ModelConfig, ParserConfig, ValueParserConfig};
pub use errors::{GrammarLoadError, ModelError, ParserError, Result};
pub use features::cache::{EntityMap, SectionCache};
pub use features::context::{context_at, context_at_path, Context, PathContext};
pub use features::documents::{DocumentSnapshot, DocumentStore};
pub use features::entities::{build, build_section, normalize_value, Entity, TopLevelSection};
pub use features::grammar::{dialect_for, GrammarDialect, NodeRole};
pub use features::parsing::{BackendKind, ParserHandle, ParserProvider, Readiness};
pub use features::syntax_tree::{PathInfo, PathLookup, SyntaxTree};
pub use features::values::ValueParser;
pub use model::TemplateModel;
pub use shared::models::{Document, DocumentFormat, PathSegment, Position, PropertyPath, Range};
