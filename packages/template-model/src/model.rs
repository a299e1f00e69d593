//! Entry point wiring configuration, parser provider and document store

use crate::config::{ModelConfig, Validatable};
use crate::errors::Result;
use crate::features::documents::{DocumentSnapshot, DocumentStore};
use crate::features::parsing::{BackendKind, ParserProvider};
use crate::features::values::ValueParser;
use crate::shared::models::Document;
use std::sync::Arc;

/// Owns the parser provider and the open documents for one editor session
pub struct TemplateModel {
    config: ModelConfig,
    provider: Arc<ParserProvider>,
    store: DocumentStore,
}

impl TemplateModel {
    /// Validate `config` and initialize the parser backend
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let provider = Arc::new(ParserProvider::from_config(&config.parser));
        tracing::info!(backend = ?provider.backend_kind(), "template model ready");
        Ok(Self::with_provider(config, provider))
    }

    /// Use an already constructed provider (tests, custom portable backends)
    pub fn with_provider(config: ModelConfig, provider: Arc<ParserProvider>) -> Self {
        let store = DocumentStore::new(
            Arc::clone(&provider),
            ValueParser::new(config.values.clone()),
        );
        Self {
            config,
            provider,
            store,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<ParserProvider> {
        &self.provider
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.provider.backend_kind()
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.store
    }

    pub fn open(&self, document: Document) -> Arc<DocumentSnapshot> {
        self.store.open(document)
    }

    pub fn change(&self, document: Document) -> Option<Arc<DocumentSnapshot>> {
        self.store.change(document)
    }

    pub fn close(&self, uri: &str) -> bool {
        self.store.close(uri)
    }

    pub fn get(&self, uri: &str) -> Option<Arc<DocumentSnapshot>> {
        self.store.get(uri)
    }

    /// Release the parser backend; later parses fail with `Disposed`
    pub fn dispose(&self) {
        self.provider.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelError;
    use crate::errors::ParserError;
    use crate::features::entities::TopLevelSection;

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ModelConfig::default();
        config.values.max_recovery_attempts = 500;
        assert!(matches!(TemplateModel::new(config), Err(ModelError::Config(_))));
    }

    #[test]
    fn test_session() {
        let model = TemplateModel::new(ModelConfig::default()).unwrap();
        assert_eq!(model.backend_kind(), Some(BackendKind::Native));

        let snapshot = model.open(Document::detect(
            "file:///stack.json",
            1,
            r#"{"Resources": {"B": {"Type": "X::Y::Z"}}}"#,
        ));
        let tree = snapshot.syntax_tree().unwrap();
        assert_eq!(tree.top_level_section_names(), vec![TopLevelSection::Resources]);

        model.dispose();
        let next = model
            .change(Document::detect("file:///stack.json", 2, "{}"))
            .unwrap();
        assert_eq!(next.syntax_tree().unwrap_err(), ParserError::Disposed);
    }
}
