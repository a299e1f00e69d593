//! Context Resolver
//!
//! Thin compositions of the syntax tree queries. A region that cannot
//! produce a context yields `None`; nothing here returns an error.

use super::context::Context;
use crate::features::syntax_tree::SyntaxTree;
use crate::shared::models::{Position, PropertyPath};
use tree_sitter::Node;

/// Context for a path query
#[derive(Debug, Clone)]
pub struct PathContext<'t> {
    pub context: Option<Context<'t>>,
    pub fully_resolved: bool,
}

/// Context of the deepest node at `position`
pub fn context_at(tree: &SyntaxTree, position: Position) -> Option<Context<'_>> {
    let node = tree.node_at_position(position)?;
    build(tree, node)
}

/// Context of the node at `path`, or of the deepest prefix that exists
pub fn context_at_path<'t>(tree: &'t SyntaxTree, path: &PropertyPath) -> PathContext<'t> {
    let lookup = tree.node_by_path(path);
    PathContext {
        context: lookup.node.and_then(|node| build(tree, node)),
        fully_resolved: lookup.fully_resolved,
    }
}

fn build<'t>(tree: &'t SyntaxTree, node: Node<'t>) -> Option<Context<'t>> {
    match Context::new(tree, node) {
        Ok(context) => Some(context),
        Err(err) => {
            tracing::debug!(
                uri = tree.document().uri(),
                kind = node.kind(),
                error = %err,
                "no context for node"
            );
            None
        }
    }
}
