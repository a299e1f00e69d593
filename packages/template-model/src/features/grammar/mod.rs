//! Grammar Normalization Layer
//!
//! The YAML and JSON grammars name their nodes differently
//! (`block_mapping_pair` vs `pair`, `block_sequence_item` vs a bare array
//! element). Each grammar implements [`GrammarDialect`] once; everything
//! above this module asks for logical roles and never sees a grammar node
//! kind.

mod json;
mod yaml;

pub use json::JsonDialect;
pub use yaml::YamlDialect;

use crate::shared::models::DocumentFormat;
use crate::shared::utils::{content_children, content_index};
use tree_sitter::Node;

/// Logical role of a syntax node, independent of grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Key side of a pair
    Key,
    /// Value side of a pair
    Value,
    /// A key/value pair
    Pair,
    /// A key/value container (mapping or object)
    Block,
    /// An ordered container
    Sequence,
    /// One element of a sequence
    SequenceItem,
    /// A leaf value
    Scalar,
    Other,
}

/// Per-grammar answers to structural questions about nodes
pub trait GrammarDialect: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn is_pair(&self, node: &Node) -> bool;

    fn is_block(&self, node: &Node) -> bool;

    fn is_sequence(&self, node: &Node) -> bool;

    fn is_scalar(&self, node: &Node) -> bool;

    /// Nodes that only wrap a single content node (documents, node wrappers)
    fn is_wrapper(&self, node: &Node) -> bool;

    /// Content node below any wrappers, tags and anchors
    fn unwrap<'t>(&self, node: Node<'t>) -> Node<'t>;

    /// First content node of the document
    fn root_value<'t>(&self, root: Node<'t>) -> Option<Node<'t>>;

    /// Elements of a sequence container, in order
    fn sequence_items<'t>(&self, sequence: Node<'t>) -> Vec<Node<'t>>;

    /// Value carried by a sequence element
    fn item_value<'t>(&self, item: Node<'t>) -> Option<Node<'t>>;

    /// Whether `node` is an element of a sequence
    fn is_sequence_item(&self, node: &Node) -> bool;

    /// Scalar text with quotes and escapes resolved
    fn scalar_text(&self, node: Node, source: &str) -> Option<String>;

    fn key_of<'t>(&self, pair: Node<'t>) -> Option<Node<'t>> {
        pair.child_by_field_name("key")
    }

    fn value_of<'t>(&self, pair: Node<'t>) -> Option<Node<'t>> {
        pair.child_by_field_name("value")
    }

    /// Name of an explicit tag decorating `node` (`Ref` for `!Ref x`)
    fn tag_name(&self, _node: &Node, _source: &str) -> Option<String> {
        None
    }

    /// Normalized text of a pair's key
    fn key_text(&self, pair: Node, source: &str) -> Option<String> {
        let key = self.key_of(pair)?;
        self.scalar_text(key, source)
    }

    /// Pairs of a block container, in document order
    fn pairs<'t>(&self, block: Node<'t>) -> Vec<Node<'t>> {
        content_children(&block)
            .into_iter()
            .filter(|child| self.is_pair(child))
            .collect()
    }

    /// Pair whose key text equals `key` (first match wins)
    fn find_pair<'t>(&self, block: Node<'t>, key: &str, source: &str) -> Option<Node<'t>> {
        self.pairs(block)
            .into_iter()
            .find(|pair| self.key_text(*pair, source).as_deref() == Some(key))
    }

    /// Index of `node` within its sequence, when it is a sequence element
    fn sequence_index(&self, node: &Node) -> Option<usize> {
        if !self.is_sequence_item(node) {
            return None;
        }
        let parent = node.parent()?;
        if self.is_sequence(&parent) {
            self.sequence_items(parent)
                .iter()
                .position(|item| item.id() == node.id())
        } else {
            content_index(node)
        }
    }

    /// Which side of a pair `node` sits on, looking through wrappers
    fn pair_side(&self, node: &Node) -> Option<NodeRole> {
        let mut current = *node;
        loop {
            let parent = current.parent()?;
            if self.is_pair(&parent) {
                if self.key_of(parent).map(|k| k.id()) == Some(current.id()) {
                    return Some(NodeRole::Key);
                }
                if self.value_of(parent).map(|v| v.id()) == Some(current.id()) {
                    return Some(NodeRole::Value);
                }
                return None;
            }
            if !self.is_wrapper(&parent) {
                return None;
            }
            current = parent;
        }
    }

    /// Role of the content `node` stands for
    ///
    /// Containers report their own role wherever they sit. Wrappers report
    /// the role of the content they wrap, so the answer does not depend on
    /// whether the grammar wraps values.
    fn role(&self, node: &Node) -> NodeRole {
        if self.is_sequence_item(node) {
            return NodeRole::SequenceItem;
        }
        let content = self.unwrap(*node);
        if self.is_wrapper(&content) {
            return NodeRole::Other;
        }
        if self.is_pair(&content) {
            NodeRole::Pair
        } else if self.is_block(&content) {
            NodeRole::Block
        } else if self.is_sequence(&content) {
            NodeRole::Sequence
        } else if let Some(side) = self.pair_side(&content) {
            side
        } else if self.is_scalar(&content) {
            NodeRole::Scalar
        } else {
            NodeRole::Other
        }
    }
}

static YAML: YamlDialect = YamlDialect;
static JSON: JsonDialect = JsonDialect;

/// Dialect for a document format
pub fn dialect_for(format: DocumentFormat) -> &'static dyn GrammarDialect {
    match format {
        DocumentFormat::Yaml => &YAML,
        DocumentFormat::Json => &JSON,
    }
}
