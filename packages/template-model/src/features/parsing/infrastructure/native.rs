//! Statically linked tree-sitter grammars

use crate::errors::ParserError;
use crate::shared::models::DocumentFormat;
use tree_sitter::{Language, Parser};

/// Native grammars for both formats, checked against the linked runtime
#[derive(Clone)]
pub struct NativeGrammars {
    yaml: Language,
    json: Language,
}

impl NativeGrammars {
    /// Install each grammar on a scratch parser so ABI mismatches fail here
    /// rather than on the first keystroke.
    pub fn load() -> Result<Self, ParserError> {
        let yaml = tree_sitter_yaml::language();
        let json = tree_sitter_json::language();

        for (format, language) in [(DocumentFormat::Yaml, &yaml), (DocumentFormat::Json, &json)] {
            let mut parser = Parser::new();
            parser
                .set_language(language)
                .map_err(|e| ParserError::Unavailable {
                    format,
                    reason: format!("native grammar rejected: {}", e),
                })?;
        }

        Ok(Self { yaml, json })
    }

    pub fn language(&self, format: DocumentFormat) -> &Language {
        match format {
            DocumentFormat::Yaml => &self.yaml,
            DocumentFormat::Json => &self.json,
        }
    }
}
