//! Document snapshot types
//!
//! A `Document` is one version of one open template. It is never mutated:
//! every edit produces a new value and everything derived from the old one
//! is dropped with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Surface syntax of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Yaml, DocumentFormat::Json];

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }

    /// Pick a format from the URI extension, falling back to sniffing the text.
    ///
    /// Templates saved as `.template` or `.txt` are common, so anything without a
    /// known extension is JSON only when its first non-blank character opens an
    /// object.
    pub fn detect(uri: &str, text: &str) -> Self {
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        let ext = path
            .rsplit('/')
            .next()
            .and_then(|file| file.rsplit_once('.'))
            .map(|(_, ext)| ext);

        if let Some(format) = ext.and_then(Self::from_extension) {
            return format;
        }

        match text.trim_start().chars().next() {
            Some('{') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One immutable version of an open template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    uri: Arc<str>,
    format: DocumentFormat,
    version: i32,
    text: Arc<str>,
}

impl Document {
    pub fn new(
        uri: impl Into<Arc<str>>,
        format: DocumentFormat,
        version: i32,
        text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            uri: uri.into(),
            format,
            version,
            text: text.into(),
        }
    }

    /// Build a document whose format is detected from the URI and text
    pub fn detect(uri: impl Into<Arc<str>>, version: i32, text: impl Into<Arc<str>>) -> Self {
        let uri = uri.into();
        let text = text.into();
        let format = DocumentFormat::detect(&uri, &text);
        Self::new(uri, format, version, text)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
