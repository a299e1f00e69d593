//! Common test utilities for template-model
//!
//! Shared template fixtures and a native-backed tree builder.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use template_model::{Document, DocumentFormat, ParserConfig, ParserProvider, SyntaxTree};

/// Native provider with default settings
pub fn provider() -> ParserProvider {
    ParserProvider::new(&ParserConfig::default())
}

/// Parse `text` as a version-1 document of `format`
pub fn parse(format: DocumentFormat, text: &str) -> SyntaxTree {
    let uri = match format {
        DocumentFormat::Yaml => "file:///fixture.yaml",
        DocumentFormat::Json => "file:///fixture.json",
    };
    SyntaxTree::parse_with(&provider(), Document::new(uri, format, 1, text))
        .expect("native backend parses every input")
}
