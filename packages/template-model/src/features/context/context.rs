//! Context: node + ancestors + logical path + enclosing entity

use crate::features::entities::{SectionShape, TopLevelSection};
use crate::features::grammar::GrammarDialect;
use crate::features::syntax_tree::{PathInfo, SyntaxTree};
use crate::features::values::intrinsic_name;
use crate::shared::models::{DocumentFormat, PathSegment, PropertyPath, Range};
use crate::shared::utils::node_to_range;
use std::fmt;
use tree_sitter::Node;

/// Why a context could not be built for a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The ancestor walk did not end at the tree's root
    Detached,
    EmptyAncestry,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Detached => f.write_str("node is not attached to this tree's root"),
            ContextError::EmptyAncestry => f.write_str("node has no ancestry"),
        }
    }
}

impl std::error::Error for ContextError {}

/// Resolution unit consumed by editor features
///
/// Borrows the tree it came from and cannot outlive it.
#[derive(Clone)]
pub struct Context<'t> {
    tree: &'t SyntaxTree,
    node: Node<'t>,
    ancestor_path: Vec<Node<'t>>,
    property_path: PropertyPath,
    entity_root: Option<Node<'t>>,
}

impl<'t> Context<'t> {
    pub fn new(tree: &'t SyntaxTree, node: Node<'t>) -> Result<Self, ContextError> {
        let PathInfo {
            ancestor_path,
            property_path,
            entity_root,
        } = tree.path_and_entity_info(node);

        let first = ancestor_path.first().ok_or(ContextError::EmptyAncestry)?;
        if first.id() != tree.root().id() {
            return Err(ContextError::Detached);
        }

        Ok(Self {
            tree,
            node,
            ancestor_path,
            property_path,
            entity_root,
        })
    }

    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Root first, `node` last
    pub fn ancestor_path(&self) -> &[Node<'t>] {
        &self.ancestor_path
    }

    pub fn property_path(&self) -> &PropertyPath {
        &self.property_path
    }

    pub fn document_format(&self) -> DocumentFormat {
        self.tree.format()
    }

    pub fn entity_root(&self) -> Option<Node<'t>> {
        self.entity_root
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn text(&self) -> &'t str {
        self.tree.node_text(&self.node)
    }

    pub fn range(&self) -> Range {
        node_to_range(&self.node)
    }

    /// Section the node sits in, if the path starts at one
    pub fn section(&self) -> Option<TopLevelSection> {
        self.property_path.first_key().and_then(TopLevelSection::from_key)
    }

    /// Logical id of the enclosing entry, or the transform index
    pub fn logical_id(&self) -> Option<String> {
        let section = self.section()?;
        match (section.shape(), self.property_path.get(1)?) {
            (SectionShape::EntryMap, PathSegment::Key(key)) => Some(key.clone()),
            (SectionShape::Indexed, PathSegment::Index(index)) => Some(index.to_string()),
            _ => None,
        }
    }

    /// Whether the node is at or above the section keys
    pub fn is_top_level(&self) -> bool {
        self.property_path.len() <= 1
    }

    /// Whether the node is (inside) the key side of its nearest pair
    pub fn is_key(&self) -> bool {
        let dialect = self.dialect();
        self.pair_side()
            .and_then(|(pair, child)| dialect.key_of(pair).map(|key| key.id() == child.id()))
            .unwrap_or(false)
    }

    /// Whether the node is (inside) the value side of its nearest pair
    pub fn is_value(&self) -> bool {
        let dialect = self.dialect();
        self.pair_side()
            .and_then(|(pair, child)| {
                dialect
                    .value_of(pair)
                    .map(|value| value.id() == child.id())
            })
            .unwrap_or(false)
    }

    /// Innermost intrinsic function enclosing the node, by short name
    ///
    /// Recognizes short-form tags (`!Sub`), long-form keys (`Fn::Sub`) and
    /// tags already rewritten to keys (`!Sub`).
    pub fn intrinsic_function(&self) -> Option<&'static str> {
        let dialect = self.dialect();
        let source = self.tree.text();

        for node in self.ancestor_path.iter().rev() {
            if let Some(tag) = dialect.tag_name(node, source) {
                if let Some(name) = intrinsic_name(&format!("!{}", tag)) {
                    return Some(name);
                }
            }

            if !dialect.is_pair(node) {
                continue;
            }
            let Some(key) = dialect.key_text(*node, source) else {
                continue;
            };
            let Some(name) = intrinsic_name(&key) else {
                continue;
            };
            // A function call is a single-key map; `Condition` as a
            // resource attribute is not one
            let single = node
                .parent()
                .map_or(false, |block| dialect.pairs(block).len() == 1);
            if single {
                return Some(name);
            }
        }
        None
    }

    fn dialect(&self) -> &'static dyn GrammarDialect {
        self.tree.dialect()
    }

    /// Nearest pair ancestor and its child on the way to `node`
    fn pair_side(&self) -> Option<(Node<'t>, Node<'t>)> {
        let dialect = self.dialect();
        self.ancestor_path
            .windows(2)
            .rev()
            .find(|window| dialect.is_pair(&window[0]))
            .map(|window| (window[0], window[1]))
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("kind", &self.node.kind())
            .field("range", &self.range())
            .field("property_path", &self.property_path.to_string())
            .field("format", &self.document_format())
            .field("has_entity_root", &self.entity_root.is_some())
            .finish()
    }
}
