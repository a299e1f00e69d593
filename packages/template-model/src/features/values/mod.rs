//! Value Parser
//!
//! Turns raw document text into a plain value tree (`serde_json::Value`),
//! independent of the syntax tree. Never fails loudly: text that cannot be
//! salvaged yields `None`.

pub mod intrinsics;
mod json;
mod yaml;

pub use intrinsics::{intrinsic_name, intrinsic_tags, is_intrinsic_tag, long_form};

use crate::config::ValueParserConfig;
use crate::shared::models::DocumentFormat;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct ValueParser {
    config: ValueParserConfig,
}

impl ValueParser {
    pub fn new(config: ValueParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValueParserConfig {
        &self.config
    }

    /// Value tree of `text`, or `None` when nothing usable can be read
    pub fn parse(&self, text: &str, format: DocumentFormat) -> Option<Value> {
        match format {
            DocumentFormat::Yaml => yaml::parse_yaml(text, self.config.max_recovery_attempts),
            DocumentFormat::Json => json::parse_lenient(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_by_format() {
        let parser = ValueParser::default();
        assert_eq!(
            parser.parse("A: !Ref B\n", DocumentFormat::Yaml),
            Some(json!({"A": {"!Ref": "B"}}))
        );
        assert_eq!(
            parser.parse("{\"A\": {\"Ref\": \"B\"}", DocumentFormat::Json),
            Some(json!({"A": {"Ref": "B"}}))
        );
    }

    #[test]
    fn test_recovery_budget_comes_from_config() {
        let text = "A:\n  x: 1\n  half\nB: 2\n";
        let strict = ValueParser::new(ValueParserConfig {
            max_recovery_attempts: 0,
        });
        assert!(strict.parse(text, DocumentFormat::Yaml).is_none());
        assert_eq!(
            ValueParser::default().parse(text, DocumentFormat::Yaml),
            Some(json!({"A": {"x": 1}, "B": 2}))
        );
    }
}
