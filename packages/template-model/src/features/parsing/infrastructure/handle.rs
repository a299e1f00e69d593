//! Parser handle handed out by the provider

use crate::errors::ParserError;
use crate::features::parsing::ports::PortableRuntime;
use crate::shared::models::DocumentFormat;
use std::fmt;
use std::sync::Arc;
use tree_sitter::{Language, Parser, Tree};

/// Which engine produced a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Native,
    Portable,
}

/// A ready-to-use grammar for one format
///
/// Cheap to clone. A fresh tree-sitter parser is created per parse, so a
/// handle can be shared freely.
#[derive(Clone)]
pub struct ParserHandle {
    format: DocumentFormat,
    language: Language,
    backend: BackendKind,
    runtime: Option<Arc<dyn PortableRuntime>>,
}

impl ParserHandle {
    pub fn native(format: DocumentFormat, language: Language) -> Self {
        Self {
            format,
            language,
            backend: BackendKind::Native,
            runtime: None,
        }
    }

    pub fn portable(
        format: DocumentFormat,
        language: Language,
        runtime: Arc<dyn PortableRuntime>,
    ) -> Self {
        Self {
            format,
            language,
            backend: BackendKind::Portable,
            runtime: Some(runtime),
        }
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Parse `text` into an error-tolerant tree
    pub fn parse(&self, text: &str) -> Result<Tree, ParserError> {
        let mut parser = Parser::new();
        if let Some(runtime) = &self.runtime {
            runtime
                .prepare_parser(&mut parser)
                .map_err(|e| ParserError::Language(e.to_string()))?;
        }
        parser
            .set_language(&self.language)
            .map_err(|e| ParserError::Language(format!("Failed to set language: {}", e)))?;

        parser
            .parse(text, None)
            .ok_or_else(|| ParserError::Language(format!("{} parser produced no tree", self.format)))
    }
}

impl fmt::Debug for ParserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserHandle")
            .field("format", &self.format)
            .field("backend", &self.backend)
            .finish()
    }
}
