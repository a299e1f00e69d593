//! Configuration system
//!
//! Code defaults for every knob, optionally overridden from a versioned YAML
//! file. Every struct validates its own ranges.
//!
//! ```rust,ignore
//! use template_model::config::ModelConfig;
//!
//! let config = ModelConfig::default();
//! let config = ModelConfig::from_yaml("template-model.yaml")?;
//! ```

pub mod error;
pub mod model_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use model_config::{ModelConfig, ParserConfig, ValueParserConfig, SUPPORTED_VERSIONS};
pub use validation::Validatable;
