//! wasmtime-backed portable runtime (feature `wasm`)

use crate::errors::GrammarLoadError;
use crate::features::parsing::ports::PortableRuntime;
use crate::shared::models::DocumentFormat;
use parking_lot::Mutex;
use tree_sitter::wasmtime::Engine;
use tree_sitter::{Language, Parser, WasmStore};

/// Instantiates `.wasm` grammars through tree-sitter's wasm store
pub struct WasmtimeRuntime {
    engine: Engine,
    store: Mutex<WasmStore>,
}

impl WasmtimeRuntime {
    pub fn new() -> Result<Self, GrammarLoadError> {
        let engine = Engine::default();
        let store = WasmStore::new(engine.clone())
            .map_err(|e| GrammarLoadError::Runtime(format!("{:?}", e)))?;
        Ok(Self {
            engine,
            store: Mutex::new(store),
        })
    }
}

impl PortableRuntime for WasmtimeRuntime {
    fn load_language(
        &self,
        format: DocumentFormat,
        blob: &[u8],
    ) -> Result<Language, GrammarLoadError> {
        self.store
            .lock()
            .load_language(format.name(), blob)
            .map_err(|e| GrammarLoadError::Runtime(format!("{:?}", e)))
    }

    fn prepare_parser(&self, parser: &mut Parser) -> Result<(), GrammarLoadError> {
        let store = WasmStore::new(self.engine.clone())
            .map_err(|e| GrammarLoadError::Runtime(format!("{:?}", e)))?;
        parser
            .set_wasm_store(store)
            .map_err(|e| GrammarLoadError::Runtime(e.to_string()))
    }
}
