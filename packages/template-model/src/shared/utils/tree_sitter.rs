//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter nodes: text slicing,
//! point/position conversion and child lookups used by both grammar dialects.

use crate::shared::models::{Position, Range};
use tree_sitter::{Node, Point};

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
#[inline]
pub fn find_child_by_kind<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Named children that are not comments or other extras
pub fn content_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

/// Position of `child` among the content children of its parent
pub fn content_index(node: &Node) -> Option<usize> {
    let parent = node.parent()?;
    content_children(&parent)
        .iter()
        .position(|sibling| sibling.id() == node.id())
}

/// Collect ERROR and MISSING nodes (depth-first, document order)
pub fn find_error_nodes<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut result = Vec::new();
    if !node.has_error() {
        return result;
    }
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.is_error() || current.is_missing() {
            result.push(current);
            continue;
        }
        if !current.has_error() {
            continue;
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    result
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

// ═══════════════════════════════════════════════════════════════════════════
// Position Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

#[inline]
pub fn point_to_position(point: Point) -> Position {
    Position::new(point.row as u32, point.column as u32)
}

#[inline]
pub fn position_to_point(position: Position) -> Point {
    Point::new(position.line as usize, position.character as usize)
}

/// Convert tree-sitter node to Range
#[inline]
pub fn node_to_range(node: &Node) -> Range {
    Range::new(
        point_to_position(node.start_position()),
        point_to_position(node.end_position()),
    )
}

/// Inclusive containment on both ends
#[inline]
pub fn node_contains_point(node: &Node, point: Point) -> bool {
    node.start_position() <= point && point <= node.end_position()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
