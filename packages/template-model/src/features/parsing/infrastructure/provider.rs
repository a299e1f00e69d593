//! Parser Backend Provider
//!
//! Owns the backend decision for the whole process:
//!
//! 1. On construction, native grammars are installed for both formats.
//! 2. Any native failure switches every later request to the portable
//!    backend and kicks off one background load per format.
//! 3. Portable loads retry with linear backoff; a final failure is kept and
//!    reported on each request until restart.
//!
//! The provider is constructed and disposed explicitly; nothing here is a
//! global.

use super::handle::{BackendKind, ParserHandle};
use super::native::NativeGrammars;
use super::portable::{PortableBackend, PortableGrammars, Readiness, RetryPolicy};
use crate::config::ParserConfig;
use crate::errors::ParserError;
use crate::shared::models::DocumentFormat;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

enum BackendState {
    Native(NativeGrammars),
    Portable(Arc<PortableGrammars>),
    Unavailable(String),
    Disposed,
}

/// Hands out parsers for either document format
pub struct ParserProvider {
    state: RwLock<BackendState>,
}

impl ParserProvider {
    /// Native grammars only
    pub fn new(config: &ParserConfig) -> Self {
        Self::with_portable(config, None)
    }

    /// Native grammars first, `portable` as the fallback
    pub fn with_portable(config: &ParserConfig, portable: Option<PortableBackend>) -> Self {
        let native = if config.prefer_native {
            NativeGrammars::load()
        } else {
            Err(ParserError::Unavailable {
                format: DocumentFormat::Yaml,
                reason: "native backend disabled by configuration".to_string(),
            })
        };
        Self::initialize(config, native, portable)
    }

    /// Build from configuration, wiring the wasm runtime when it is compiled in
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::with_portable(config, Self::configured_portable(config))
    }

    #[cfg(feature = "wasm")]
    fn configured_portable(config: &ParserConfig) -> Option<PortableBackend> {
        use super::file_loader::FileGrammarLoader;
        use super::wasm::WasmtimeRuntime;

        let dir = config.asset_base_dir.as_ref()?;
        match WasmtimeRuntime::new() {
            Ok(runtime) => Some(PortableBackend::new(
                Arc::new(FileGrammarLoader::new(dir)),
                Arc::new(runtime),
            )),
            Err(err) => {
                tracing::error!(error = %err, "wasm runtime unavailable");
                None
            }
        }
    }

    #[cfg(not(feature = "wasm"))]
    fn configured_portable(config: &ParserConfig) -> Option<PortableBackend> {
        if config.asset_base_dir.is_some() {
            tracing::warn!("asset_base_dir set but the `wasm` feature is not compiled in");
        }
        None
    }

    /// Decide the backend from an already attempted native initialization
    pub fn initialize(
        config: &ParserConfig,
        native: Result<NativeGrammars, ParserError>,
        portable: Option<PortableBackend>,
    ) -> Self {
        let state = match (native, portable) {
            (Ok(grammars), _) => {
                tracing::debug!("using native parser backend");
                BackendState::Native(grammars)
            }
            (Err(err), Some(portable)) => {
                tracing::warn!(error = %err, "native parser backend failed; switching to portable");
                let retry = RetryPolicy::new(
                    config.load_attempts,
                    Duration::from_millis(config.load_backoff_ms),
                );
                BackendState::Portable(Arc::new(PortableGrammars::new(portable, retry)))
            }
            (Err(err), None) => {
                tracing::error!(error = %err, "no parser backend available");
                BackendState::Unavailable(err.to_string())
            }
        };

        let provider = Self {
            state: RwLock::new(state),
        };
        provider.start_loading();
        provider
    }

    /// Begin loading portable grammars in the background
    ///
    /// Needs a tokio runtime on the current thread; without one, grammars load
    /// on the first `parser_async` call instead.
    pub fn start_loading(&self) {
        let grammars = match &*self.state.read() {
            BackendState::Portable(grammars) => Arc::clone(grammars),
            _ => return,
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime; portable grammars load on first request");
            return;
        };

        for format in DocumentFormat::ALL {
            let grammars = Arc::clone(&grammars);
            runtime.spawn(async move {
                // Outcome is memoized in the grammar slot
                let _ = grammars.language(format).await;
            });
        }
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        match &*self.state.read() {
            BackendState::Native(_) => Some(BackendKind::Native),
            BackendState::Portable(_) => Some(BackendKind::Portable),
            BackendState::Unavailable(_) | BackendState::Disposed => None,
        }
    }

    pub fn readiness(&self, format: DocumentFormat) -> Readiness {
        match &*self.state.read() {
            BackendState::Native(_) => Readiness::Ready,
            BackendState::Portable(grammars) => grammars.readiness(format),
            BackendState::Unavailable(_) | BackendState::Disposed => Readiness::Failed,
        }
    }

    /// Parser for `format` without waiting
    ///
    /// Returns `ParserError::NotReady` while a portable grammar is loading.
    pub fn get_parser(&self, format: DocumentFormat) -> Result<ParserHandle, ParserError> {
        match &*self.state.read() {
            BackendState::Native(grammars) => {
                Ok(ParserHandle::native(format, grammars.language(format).clone()))
            }
            BackendState::Portable(grammars) => grammars
                .try_language(format)
                .map(|language| ParserHandle::portable(format, language, grammars.runtime().clone())),
            BackendState::Unavailable(reason) => Err(ParserError::Unavailable {
                format,
                reason: reason.clone(),
            }),
            BackendState::Disposed => Err(ParserError::Disposed),
        }
    }

    /// Parser for `format`, waiting for a portable load if one is running
    pub async fn parser_async(&self, format: DocumentFormat) -> Result<ParserHandle, ParserError> {
        let portable = match &*self.state.read() {
            BackendState::Portable(grammars) => Some(Arc::clone(grammars)),
            _ => None,
        };
        let Some(grammars) = portable else {
            return self.get_parser(format);
        };

        let language = grammars.language(format).await?;
        Ok(ParserHandle::portable(
            format,
            language,
            grammars.runtime().clone(),
        ))
    }

    /// Release grammars; every later request fails with `ParserError::Disposed`
    pub fn dispose(&self) {
        *self.state.write() = BackendState::Disposed;
        tracing::debug!("parser provider disposed");
    }

    pub fn is_disposed(&self) -> bool {
        matches!(&*self.state.read(), BackendState::Disposed)
    }
}
