//! JSON grammar dialect (tree-sitter-json)

use super::GrammarDialect;
use crate::shared::models::DocumentFormat;
use crate::shared::utils::{content_children, extract_node_text};
use tree_sitter::Node;

const SCALAR_KINDS: &[&str] = &["string", "number", "true", "false", "null"];

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDialect;

impl GrammarDialect for JsonDialect {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Json
    }

    fn is_pair(&self, node: &Node) -> bool {
        node.kind() == "pair"
    }

    fn is_block(&self, node: &Node) -> bool {
        node.kind() == "object"
    }

    fn is_sequence(&self, node: &Node) -> bool {
        node.kind() == "array"
    }

    fn is_scalar(&self, node: &Node) -> bool {
        SCALAR_KINDS.contains(&node.kind())
    }

    fn is_wrapper(&self, node: &Node) -> bool {
        node.kind() == "document"
    }

    fn unwrap<'t>(&self, node: Node<'t>) -> Node<'t> {
        if self.is_wrapper(&node) {
            if let Some(inner) = content_children(&node).into_iter().next() {
                return inner;
            }
        }
        node
    }

    fn root_value<'t>(&self, root: Node<'t>) -> Option<Node<'t>> {
        let content = self.unwrap(root);
        if self.is_wrapper(&content) {
            None
        } else {
            Some(content)
        }
    }

    fn sequence_items<'t>(&self, sequence: Node<'t>) -> Vec<Node<'t>> {
        if self.is_sequence(&sequence) {
            content_children(&sequence)
        } else {
            Vec::new()
        }
    }

    fn item_value<'t>(&self, item: Node<'t>) -> Option<Node<'t>> {
        Some(item)
    }

    fn is_sequence_item(&self, node: &Node) -> bool {
        node.is_named()
            && !node.is_extra()
            && node.parent().map_or(false, |parent| self.is_sequence(&parent))
    }

    fn scalar_text(&self, node: Node, source: &str) -> Option<String> {
        let raw = extract_node_text(&node, source);
        match node.kind() {
            "string" => Some(
                serde_json::from_str::<String>(raw)
                    .unwrap_or_else(|_| raw.trim_matches('"').to_string()),
            ),
            "number" | "true" | "false" | "null" => Some(raw.to_string()),
            _ => None,
        }
    }
}
