//! YAML grammar dialect (tree-sitter-yaml)

use super::GrammarDialect;
use crate::shared::models::DocumentFormat;
use crate::shared::utils::{content_children, extract_node_text, find_child_by_kind};
use tree_sitter::Node;

const PAIR_KINDS: &[&str] = &["block_mapping_pair", "flow_pair"];
const BLOCK_KINDS: &[&str] = &["block_mapping", "flow_mapping"];
const SEQUENCE_KINDS: &[&str] = &["block_sequence", "flow_sequence"];
const WRAPPER_KINDS: &[&str] = &["stream", "document", "block_node", "flow_node"];
const SCALAR_KINDS: &[&str] = &[
    "plain_scalar",
    "double_quote_scalar",
    "single_quote_scalar",
    "block_scalar",
    "alias",
];
const DECORATION_KINDS: &[&str] = &["tag", "anchor"];

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDialect;

impl YamlDialect {
    fn wrapped_content<'t>(node: Node<'t>) -> Option<Node<'t>> {
        content_children(&node)
            .into_iter()
            .find(|child| !DECORATION_KINDS.contains(&child.kind()))
    }
}

impl GrammarDialect for YamlDialect {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Yaml
    }

    fn is_pair(&self, node: &Node) -> bool {
        PAIR_KINDS.contains(&node.kind())
    }

    fn is_block(&self, node: &Node) -> bool {
        BLOCK_KINDS.contains(&node.kind())
    }

    fn is_sequence(&self, node: &Node) -> bool {
        SEQUENCE_KINDS.contains(&node.kind())
    }

    fn is_scalar(&self, node: &Node) -> bool {
        SCALAR_KINDS.contains(&node.kind())
    }

    fn is_wrapper(&self, node: &Node) -> bool {
        WRAPPER_KINDS.contains(&node.kind())
    }

    fn unwrap<'t>(&self, node: Node<'t>) -> Node<'t> {
        let mut current = node;
        while self.is_wrapper(&current) {
            match Self::wrapped_content(current) {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    fn root_value<'t>(&self, root: Node<'t>) -> Option<Node<'t>> {
        let content = self.unwrap(root);
        if self.is_wrapper(&content) {
            // Empty stream or document
            None
        } else {
            Some(content)
        }
    }

    fn sequence_items<'t>(&self, sequence: Node<'t>) -> Vec<Node<'t>> {
        match sequence.kind() {
            "block_sequence" => content_children(&sequence)
                .into_iter()
                .filter(|child| child.kind() == "block_sequence_item")
                .collect(),
            "flow_sequence" => content_children(&sequence),
            _ => Vec::new(),
        }
    }

    fn item_value<'t>(&self, item: Node<'t>) -> Option<Node<'t>> {
        if item.kind() == "block_sequence_item" {
            content_children(&item).into_iter().next()
        } else {
            Some(item)
        }
    }

    fn is_sequence_item(&self, node: &Node) -> bool {
        if node.kind() == "block_sequence_item" {
            return true;
        }
        node.is_named()
            && !node.is_extra()
            && node
                .parent()
                .map_or(false, |parent| parent.kind() == "flow_sequence")
    }

    fn tag_name(&self, node: &Node, source: &str) -> Option<String> {
        let tag = find_child_by_kind(node, "tag")?;
        let text = extract_node_text(&tag, source);
        Some(text.trim_start_matches('!').to_string())
    }

    fn scalar_text(&self, node: Node, source: &str) -> Option<String> {
        let scalar = self.unwrap(node);
        let raw = extract_node_text(&scalar, source);
        match scalar.kind() {
            "plain_scalar" | "block_scalar" | "alias" => Some(raw.trim().to_string()),
            "double_quote_scalar" => Some(
                serde_yaml::from_str::<String>(raw)
                    .unwrap_or_else(|_| strip_quotes(raw, '"').to_string()),
            ),
            "single_quote_scalar" => Some(strip_quotes(raw, '\'').replace("''", "'")),
            _ => None,
        }
    }
}

fn strip_quotes(raw: &str, quote: char) -> &str {
    let inner = raw.strip_prefix(quote).unwrap_or(raw);
    inner.strip_suffix(quote).unwrap_or(inner)
}
