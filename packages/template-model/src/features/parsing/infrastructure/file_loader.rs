//! Grammar blobs read from a directory

use crate::errors::GrammarLoadError;
use crate::features::parsing::ports::GrammarAssetLoader;
use crate::shared::models::DocumentFormat;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads `tree-sitter-<format>.wasm` from a base directory
#[derive(Debug, Clone)]
pub struct FileGrammarLoader {
    base_dir: PathBuf,
}

impl FileGrammarLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn asset_name(format: DocumentFormat) -> String {
        format!("tree-sitter-{}.wasm", format.name())
    }

    pub fn asset_path(&self, format: DocumentFormat) -> PathBuf {
        self.base_dir.join(Self::asset_name(format))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl GrammarAssetLoader for FileGrammarLoader {
    async fn load(&self, format: DocumentFormat) -> Result<Vec<u8>, GrammarLoadError> {
        let path = self.asset_path(format);
        let bytes = tokio::fs::read(&path).await?;
        if bytes.is_empty() {
            return Err(GrammarLoadError::Io(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(bytes)
    }
}
