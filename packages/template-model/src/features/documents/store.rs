//! Document store: per-URI snapshots
//!
//! Every open or change installs a fresh `DocumentSnapshot`. Derived data
//! (syntax tree, section cache) lives inside the snapshot and is dropped
//! with it; nothing is patched across versions.

use crate::errors::ParserError;
use crate::features::cache::SectionCache;
use crate::features::parsing::ParserProvider;
use crate::features::syntax_tree::SyntaxTree;
use crate::features::values::ValueParser;
use crate::shared::models::Document;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// One document version and everything derived from it
pub struct DocumentSnapshot {
    document: Document,
    provider: Arc<ParserProvider>,
    tree: OnceCell<SyntaxTree>,
    sections: SectionCache,
}

impl DocumentSnapshot {
    pub fn new(document: Document, provider: Arc<ParserProvider>, parser: ValueParser) -> Self {
        Self {
            sections: SectionCache::new(document.clone(), parser),
            document,
            provider,
            tree: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> i32 {
        self.document.version()
    }

    /// Syntax tree, parsed on first use
    ///
    /// `NotReady` is not memoized; a later call retries once the portable
    /// grammar has loaded.
    pub fn syntax_tree(&self) -> Result<&SyntaxTree, ParserError> {
        self.tree
            .get_or_try_init(|| SyntaxTree::parse_with(&self.provider, self.document.clone()))
    }

    /// Syntax tree, waiting for a loading portable grammar if needed
    pub async fn syntax_tree_async(&self) -> Result<&SyntaxTree, ParserError> {
        if let Some(tree) = self.tree.get() {
            return Ok(tree);
        }
        let tree = SyntaxTree::parse_async(&self.provider, self.document.clone()).await?;
        Ok(self.tree.get_or_init(|| tree))
    }

    pub fn sections(&self) -> &SectionCache {
        &self.sections
    }
}

impl std::fmt::Debug for DocumentSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSnapshot")
            .field("uri", &self.document.uri())
            .field("version", &self.document.version())
            .field("tree_parsed", &self.tree.get().is_some())
            .finish()
    }
}

/// Open documents keyed by URI
pub struct DocumentStore {
    provider: Arc<ParserProvider>,
    parser: ValueParser,
    documents: RwLock<FxHashMap<Arc<str>, Arc<DocumentSnapshot>>>,
}

impl DocumentStore {
    pub fn new(provider: Arc<ParserProvider>, parser: ValueParser) -> Self {
        Self {
            provider,
            parser,
            documents: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn provider(&self) -> &Arc<ParserProvider> {
        &self.provider
    }

    /// Install `document`, replacing any snapshot for the same URI
    pub fn open(&self, document: Document) -> Arc<DocumentSnapshot> {
        let snapshot = self.snapshot(document);
        self.documents
            .write()
            .insert(Arc::from(snapshot.document().uri()), Arc::clone(&snapshot));
        snapshot
    }

    /// Install a newer version; stale or repeated versions are ignored
    pub fn change(&self, document: Document) -> Option<Arc<DocumentSnapshot>> {
        let mut documents = self.documents.write();
        if let Some(current) = documents.get(document.uri()) {
            if document.version() <= current.version() {
                tracing::debug!(
                    uri = document.uri(),
                    current = current.version(),
                    received = document.version(),
                    "ignoring stale document version"
                );
                return None;
            }
        }
        let snapshot = self.snapshot(document);
        documents.insert(Arc::from(snapshot.document().uri()), Arc::clone(&snapshot));
        Some(snapshot)
    }

    pub fn close(&self, uri: &str) -> bool {
        self.documents.write().remove(uri).is_some()
    }

    pub fn get(&self, uri: &str) -> Option<Arc<DocumentSnapshot>> {
        self.documents.read().get(uri).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    fn snapshot(&self, document: Document) -> Arc<DocumentSnapshot> {
        Arc::new(DocumentSnapshot::new(
            document,
            Arc::clone(&self.provider),
            self.parser.clone(),
        ))
    }
}
