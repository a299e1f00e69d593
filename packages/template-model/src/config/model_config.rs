//! Model configuration
//!
//! Defaults cover the editor use case. A YAML file (schema v1) can override
//! any field:
//!
//! ```yaml
//! version: 1
//! parser:
//!   prefer_native: true
//!   asset_base_dir: /opt/grammars
//!   load_attempts: 3
//!   load_backoff_ms: 200
//! values:
//!   max_recovery_attempts: 5
//! ```

use super::error::{ConfigError, ConfigResult};
use super::validation::{check_range, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Parser backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Try the statically linked grammars before the portable ones
    pub prefer_native: bool,

    /// Directory holding `tree-sitter-<format>.wasm` grammar blobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_base_dir: Option<PathBuf>,

    /// Portable grammar load attempts per format (1..=10)
    pub load_attempts: u32,

    /// Linear backoff unit between attempts, in milliseconds (0..=10000)
    pub load_backoff_ms: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            prefer_native: true,
            asset_base_dir: None,
            load_attempts: 3,
            load_backoff_ms: 200,
        }
    }
}

impl ParserConfig {
    pub fn load_attempts(mut self, attempts: u32) -> Self {
        self.load_attempts = attempts;
        self
    }

    pub fn load_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.load_backoff_ms = backoff_ms;
        self
    }

    pub fn prefer_native(mut self, prefer_native: bool) -> Self {
        self.prefer_native = prefer_native;
        self
    }

    pub fn asset_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_base_dir = Some(dir.into());
        self
    }
}

impl Validatable for ParserConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "load_attempts",
            self.load_attempts,
            1,
            10,
            "At least one attempt is needed to load a portable grammar",
        )?;
        check_range(
            "load_backoff_ms",
            self.load_backoff_ms,
            0,
            10_000,
            "Backoff grows linearly per attempt; keep the unit small",
        )
    }

    fn config_name(&self) -> &'static str {
        "ParserConfig"
    }
}

/// Value parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueParserConfig {
    /// Lines dropped while recovering from missing-separator errors (0..=50)
    pub max_recovery_attempts: usize,
}

impl Default for ValueParserConfig {
    fn default() -> Self {
        Self {
            max_recovery_attempts: 5,
        }
    }
}

impl Validatable for ValueParserConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "max_recovery_attempts",
            self.max_recovery_attempts,
            0,
            50,
            "Each attempt drops one line; large values hide real errors",
        )
    }

    fn config_name(&self) -> &'static str {
        "ValueParserConfig"
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub values: ValueParserConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            parser: ParserConfig::default(),
            values: ValueParserConfig::default(),
        }
    }
}

/// Version probe so a missing field gets its own error
#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

impl ModelConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let probe: VersionProbe = serde_yaml::from_str(content)?;
        match probe.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let config: ModelConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Validatable for ModelConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.parser.validate()?;
        self.values.validate()
    }

    fn config_name(&self) -> &'static str {
        "ModelConfig"
    }
}
