//! Portable grammar cache
//!
//! One `OnceCell` per format holds the single in-flight load. Every caller
//! that arrives while a load is running awaits that same load. The final
//! outcome, success or failure, is kept for the life of the process.

use crate::errors::{GrammarLoadError, ParserError};
use crate::features::parsing::ports::{GrammarAssetLoader, PortableRuntime};
use crate::shared::models::DocumentFormat;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tree_sitter::Language;

/// Bounded retry with linear backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Delay after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Observable state of one portable grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Loading,
    Failed,
}

/// Loader + runtime pair making up the portable backend
#[derive(Clone)]
pub struct PortableBackend {
    pub loader: Arc<dyn GrammarAssetLoader>,
    pub runtime: Arc<dyn PortableRuntime>,
}

impl PortableBackend {
    pub fn new(loader: Arc<dyn GrammarAssetLoader>, runtime: Arc<dyn PortableRuntime>) -> Self {
        Self { loader, runtime }
    }
}

type LoadSlot = OnceCell<Result<Language, ParserError>>;

/// Memoized portable grammars, one slot per format
pub struct PortableGrammars {
    backend: PortableBackend,
    retry: RetryPolicy,
    slots: FxHashMap<DocumentFormat, LoadSlot>,
}

impl PortableGrammars {
    pub fn new(backend: PortableBackend, retry: RetryPolicy) -> Self {
        let slots = DocumentFormat::ALL
            .iter()
            .map(|format| (*format, OnceCell::new()))
            .collect();
        Self {
            backend,
            retry,
            slots,
        }
    }

    pub fn runtime(&self) -> &Arc<dyn PortableRuntime> {
        &self.backend.runtime
    }

    fn slot(&self, format: DocumentFormat) -> &LoadSlot {
        // Populated for every DocumentFormat in `new`
        &self.slots[&format]
    }

    /// Language if its load has finished, without waiting
    pub fn try_language(&self, format: DocumentFormat) -> Result<Language, ParserError> {
        match self.slot(format).get() {
            Some(outcome) => outcome.clone(),
            None => Err(ParserError::NotReady { format }),
        }
    }

    /// Language for `format`, joining or starting the single load
    pub async fn language(&self, format: DocumentFormat) -> Result<Language, ParserError> {
        self.slot(format)
            .get_or_init(|| self.load_with_retry(format))
            .await
            .clone()
    }

    pub fn readiness(&self, format: DocumentFormat) -> Readiness {
        match self.slot(format).get() {
            Some(Ok(_)) => Readiness::Ready,
            Some(Err(_)) => Readiness::Failed,
            None => Readiness::Loading,
        }
    }

    async fn load_with_retry(&self, format: DocumentFormat) -> Result<Language, ParserError> {
        let mut last_error = GrammarLoadError::NotFound(format!("{} grammar", format));

        for attempt in 1..=self.retry.attempts {
            match self.load_once(format).await {
                Ok(language) => {
                    tracing::info!(%format, attempt, "portable grammar loaded");
                    return Ok(language);
                }
                Err(err) => {
                    tracing::warn!(%format, attempt, error = %err, "portable grammar load failed");
                    last_error = err;
                }
            }

            if attempt < self.retry.attempts {
                tokio::time::sleep(self.retry.delay_after(attempt)).await;
            }
        }

        tracing::error!(
            %format,
            attempts = self.retry.attempts,
            error = %last_error,
            "giving up on portable grammar until restart"
        );
        Err(ParserError::LoadFailed {
            format,
            attempts: self.retry.attempts,
            reason: last_error,
        })
    }

    async fn load_once(&self, format: DocumentFormat) -> Result<Language, GrammarLoadError> {
        let blob = self.backend.loader.load(format).await?;
        self.backend.runtime.load_language(format, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts, 1);
    }
}
