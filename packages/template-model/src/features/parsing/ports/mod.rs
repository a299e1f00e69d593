//! Parser backend ports
//!
//! The portable backend needs two collaborators the core does not own: a
//! source of grammar blobs and a runtime able to instantiate them.

use crate::errors::GrammarLoadError;
use crate::shared::models::DocumentFormat;
use async_trait::async_trait;
use tree_sitter::{Language, Parser};

/// Supplies portable grammar blobs by format
#[async_trait]
pub trait GrammarAssetLoader: Send + Sync {
    async fn load(&self, format: DocumentFormat) -> Result<Vec<u8>, GrammarLoadError>;
}

/// Turns portable grammar blobs into languages and readies parsers for them
pub trait PortableRuntime: Send + Sync {
    fn load_language(
        &self,
        format: DocumentFormat,
        blob: &[u8],
    ) -> Result<Language, GrammarLoadError>;

    /// Called on every fresh parser before a portable language is installed
    fn prepare_parser(&self, parser: &mut Parser) -> Result<(), GrammarLoadError>;
}
