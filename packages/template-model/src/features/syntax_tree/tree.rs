//! Syntax tree over one document version
//!
//! Wraps a tree-sitter `Tree` together with the exact `Document` it was
//! parsed from. Nodes borrowed from a `SyntaxTree` cannot outlive it, so a
//! stale tree's nodes can never leak into results for a newer version.

use crate::errors::ParserError;
use crate::features::entities::TopLevelSection;
use crate::features::grammar::{dialect_for, GrammarDialect};
use crate::features::parsing::{ParserHandle, ParserProvider};
use crate::shared::models::{Document, DocumentFormat, PathSegment, Position, PropertyPath, Range};
use crate::shared::utils::{
    extract_node_text, find_error_nodes, node_contains_point, node_to_range, position_to_point,
};
use std::collections::BTreeMap;
use tree_sitter::{Node, Tree};

/// Ancestors, logical path and enclosing entity of a node
#[derive(Debug, Clone)]
pub struct PathInfo<'t> {
    /// Root first, the queried node last
    pub ancestor_path: Vec<Node<'t>>,
    pub property_path: PropertyPath,
    /// Node of the entry one level below a top-level section, if any
    pub entity_root: Option<Node<'t>>,
}

/// Result of a path query
#[derive(Debug, Clone, Copy)]
pub struct PathLookup<'t> {
    /// Target node when fully resolved, otherwise the deepest node reached
    pub node: Option<Node<'t>>,
    pub fully_resolved: bool,
}

impl<'t> PathLookup<'t> {
    fn partial(node: Option<Node<'t>>) -> Self {
        Self {
            node,
            fully_resolved: false,
        }
    }
}

pub struct SyntaxTree {
    document: Document,
    tree: Tree,
}

impl SyntaxTree {
    /// Parse with an already obtained parser handle
    ///
    /// Broken text still yields a tree; only backend failures are errors.
    pub fn parse(document: Document, handle: &ParserHandle) -> Result<Self, ParserError> {
        if handle.format() != document.format() {
            return Err(ParserError::Language(format!(
                "{} parser cannot parse a {} document",
                handle.format(),
                document.format()
            )));
        }
        let tree = handle.parse(document.text())?;
        tracing::trace!(
            uri = document.uri(),
            version = document.version(),
            has_errors = tree.root_node().has_error(),
            "parsed syntax tree"
        );
        Ok(Self { document, tree })
    }

    /// Parse with whatever backend is ready right now
    pub fn parse_with(provider: &ParserProvider, document: Document) -> Result<Self, ParserError> {
        let handle = provider.get_parser(document.format())?;
        Self::parse(document, &handle)
    }

    /// Parse, waiting for a portable grammar if it is still loading
    pub async fn parse_async(
        provider: &ParserProvider,
        document: Document,
    ) -> Result<Self, ParserError> {
        let handle = provider.parser_async(document.format()).await?;
        Self::parse(document, &handle)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn format(&self) -> DocumentFormat {
        self.document.format()
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn dialect(&self) -> &'static dyn GrammarDialect {
        dialect_for(self.format())
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn node_text<'s>(&'s self, node: &Node) -> &'s str {
        extract_node_text(node, self.text())
    }

    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Ranges of ERROR and MISSING nodes
    pub fn error_ranges(&self) -> Vec<Range> {
        find_error_nodes(&self.tree.root_node())
            .iter()
            .map(node_to_range)
            .collect()
    }

    /// Deepest named node containing `position`
    ///
    /// At a boundary shared by two siblings the left one wins.
    pub fn node_at_position(&self, position: Position) -> Option<Node<'_>> {
        let point = position_to_point(position);
        let root = self.tree.root_node();
        if !node_contains_point(&root, point) {
            return None;
        }

        let mut current = root;
        loop {
            let mut cursor = current.walk();
            let next = current
                .named_children(&mut cursor)
                .find(|child| node_contains_point(child, point));
            match next {
                Some(child) => current = child,
                None => break,
            }
        }
        Some(current)
    }

    /// Walk from `node` to the root, rebuilding its logical path
    pub fn path_and_entity_info<'t>(&'t self, node: Node<'t>) -> PathInfo<'t> {
        let dialect = self.dialect();
        let text = self.text();

        let mut ancestor_path = Vec::new();
        // (segment, node that contributed it), innermost first
        let mut segments: Vec<(PathSegment, Node<'t>)> = Vec::new();

        let mut current = Some(node);
        while let Some(n) = current {
            ancestor_path.push(n);
            if dialect.is_pair(&n) {
                if let Some(key) = dialect.key_text(n, text) {
                    segments.push((PathSegment::Key(key), n));
                }
            }
            if let Some(index) = dialect.sequence_index(&n) {
                segments.push((PathSegment::Index(index), n));
            }
            current = n.parent();
        }
        ancestor_path.reverse();
        segments.reverse();

        let entity_root = match segments.as_slice() {
            [(PathSegment::Key(section), section_node), (_, entry), ..]
                if TopLevelSection::from_key(section).is_some()
                    && self.is_top_level_pair(section_node) =>
            {
                Some(*entry)
            }
            _ => None,
        };

        PathInfo {
            ancestor_path,
            property_path: segments.into_iter().map(|(segment, _)| segment).collect(),
            entity_root,
        }
    }

    /// Resolve `path` one segment at a time from the root
    ///
    /// Stops at the first segment that cannot be matched and reports the
    /// deepest node reached with `fully_resolved = false`.
    pub fn node_by_path(&self, path: &PropertyPath) -> PathLookup<'_> {
        let dialect = self.dialect();
        let text = self.text();

        let Some(mut current) = dialect.root_value(self.tree.root_node()) else {
            return PathLookup {
                node: Some(self.tree.root_node()),
                fully_resolved: path.is_empty(),
            };
        };

        for segment in path {
            let container = dialect.unwrap(current);
            let next = match segment {
                PathSegment::Key(key) if dialect.is_block(&container) => dialect
                    .find_pair(container, key, text)
                    .map(|pair| dialect.value_of(pair).unwrap_or(pair)),
                PathSegment::Index(index) if dialect.is_sequence(&container) => dialect
                    .sequence_items(container)
                    .get(*index)
                    .map(|item| dialect.item_value(*item).unwrap_or(*item)),
                _ => None,
            };

            match next {
                Some(node) => current = node,
                None => return PathLookup::partial(Some(current)),
            }
        }

        PathLookup {
            node: Some(current),
            fully_resolved: true,
        }
    }

    /// Pair nodes of the requested sections that are present
    pub fn find_top_level_sections(
        &self,
        wanted: &[TopLevelSection],
    ) -> BTreeMap<TopLevelSection, Node<'_>> {
        let dialect = self.dialect();
        let mut found = BTreeMap::new();

        let Some(root) = dialect.root_value(self.tree.root_node()) else {
            return found;
        };
        if !dialect.is_block(&root) {
            return found;
        }

        for pair in dialect.pairs(root) {
            let Some(section) = dialect
                .key_text(pair, self.text())
                .and_then(|key| TopLevelSection::from_key(&key))
            else {
                continue;
            };
            if wanted.contains(&section) {
                found.entry(section).or_insert(pair);
            }
        }
        found
    }

    /// Sections present in the tree, in document order
    pub fn top_level_section_names(&self) -> Vec<TopLevelSection> {
        let mut present: Vec<(usize, TopLevelSection)> = self
            .find_top_level_sections(&TopLevelSection::ALL)
            .into_iter()
            .map(|(section, node)| (node.start_byte(), section))
            .collect();
        present.sort();
        present.into_iter().map(|(_, section)| section).collect()
    }

    fn is_top_level_pair(&self, pair: &Node) -> bool {
        let root = self.dialect().root_value(self.tree.root_node());
        match (root, pair.parent()) {
            (Some(root), Some(parent)) => root.id() == parent.id(),
            _ => false,
        }
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("uri", &self.document.uri())
            .field("version", &self.document.version())
            .field("format", &self.document.format())
            .field("has_errors", &self.has_errors())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::property_path;

    fn tree(format: DocumentFormat, text: &str) -> SyntaxTree {
        let provider = ParserProvider::new(&ParserConfig::default());
        SyntaxTree::parse_with(&provider, Document::new("file:///t", format, 1, text)).unwrap()
    }

    const YAML: &str = "Resources:\n  B:\n    Type: X::Y::Z\n    Properties:\n      Tags:\n        - Key: k\n          Value: v\n";

    #[test]
    fn test_find_top_level_sections() {
        let t = tree(DocumentFormat::Yaml, YAML);
        let sections = t.find_top_level_sections(&[TopLevelSection::Resources, TopLevelSection::Outputs]);
        assert_eq!(sections.len(), 1);

        let pair = sections[&TopLevelSection::Resources];
        let key = t.dialect().key_of(pair).unwrap();
        assert_eq!(t.node_text(&key), "Resources");
    }

    #[test]
    fn test_node_by_path_full() {
        let t = tree(DocumentFormat::Yaml, YAML);
        let path = property_path!["Resources", "B", "Properties", "Tags", 0usize, "Value"];
        let lookup = t.node_by_path(&path);
        assert!(lookup.fully_resolved);
        let node = lookup.node.unwrap();
        assert_eq!(t.node_text(&node), "v");
        assert_eq!(t.path_and_entity_info(node).property_path, path);
    }

    #[test]
    fn test_node_by_path_partial() {
        let t = tree(DocumentFormat::Yaml, YAML);
        let lookup = t.node_by_path(&property_path!["Resources", "MissingResource"]);
        assert!(!lookup.fully_resolved);
        let node = lookup.node.unwrap();
        let info = t.path_and_entity_info(node);
        assert_eq!(info.property_path, property_path!["Resources"]);
    }

    #[test]
    fn test_node_by_path_scalar_where_container_expected() {
        let t = tree(DocumentFormat::Yaml, YAML);
        let lookup = t.node_by_path(&property_path!["Resources", "B", "Type", "Nested"]);
        assert!(!lookup.fully_resolved);
        assert_eq!(t.node_text(&lookup.node.unwrap()), "X::Y::Z");

        let lookup = t.node_by_path(&property_path!["Resources", 0usize]);
        assert!(!lookup.fully_resolved);
    }

    #[test]
    fn test_node_at_position_and_entity_root() {
        let t = tree(DocumentFormat::Yaml, YAML);
        // Inside "X::Y::Z"
        let node = t.node_at_position(Position::new(2, 12)).unwrap();
        assert_eq!(t.node_text(&node), "X::Y::Z");

        let info = t.path_and_entity_info(node);
        assert_eq!(info.property_path, property_path!["Resources", "B", "Type"]);
        let entity = info.entity_root.unwrap();
        assert!(t.node_text(&entity).starts_with("B:"));
        assert_eq!(info.ancestor_path.first().unwrap().id(), t.root().id());
        assert_eq!(info.ancestor_path.last().unwrap().id(), node.id());
    }

    #[test]
    fn test_section_level_has_no_entity_root() {
        let t = tree(DocumentFormat::Yaml, YAML);
        let node = t.node_at_position(Position::new(0, 3)).unwrap();
        let info = t.path_and_entity_info(node);
        assert_eq!(info.property_path, property_path!["Resources"]);
        assert!(info.entity_root.is_none());
    }

    #[test]
    fn test_outside_root_is_none() {
        let t = tree(DocumentFormat::Json, "{\"A\": 1}");
        assert!(t.node_at_position(Position::new(5, 0)).is_none());
    }

    #[test]
    fn test_json_paths() {
        let text = r#"{"Parameters": {"Port": {"Type": "Number", "AllowedValues": [80, 443]}}}"#;
        let t = tree(DocumentFormat::Json, text);
        let path = property_path!["Parameters", "Port", "AllowedValues", 1usize];
        let lookup = t.node_by_path(&path);
        assert!(lookup.fully_resolved);
        let node = lookup.node.unwrap();
        assert_eq!(t.node_text(&node), "443");

        let info = t.path_and_entity_info(node);
        assert_eq!(info.property_path, path);
        assert!(t.node_text(&info.entity_root.unwrap()).starts_with("\"Port\""));
        assert_eq!(t.top_level_section_names(), vec![TopLevelSection::Parameters]);
    }

    #[test]
    fn test_malformed_input_is_tolerated() {
        for text in ["{\"Resources\": {\"B\": [1, 2", "Resources:\n  B:\n   - x\n  y: [\n"] {
            let format = DocumentFormat::detect("untitled:x", text);
            let t = tree(format, text);
            assert!(t.has_errors());
            assert!(!t.error_ranges().is_empty());
            let _ = t.node_at_position(Position::new(0, 4));
            let _ = t.node_by_path(&property_path!["Resources", "B", 1usize]);
        }
    }

    #[test]
    fn test_empty_document() {
        let t = tree(DocumentFormat::Yaml, "");
        assert!(t.top_level_section_names().is_empty());
        let lookup = t.node_by_path(&PropertyPath::new());
        assert!(lookup.fully_resolved);
        assert!(!t.node_by_path(&property_path!["Resources"]).fully_resolved);
    }
}
