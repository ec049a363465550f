//! Configuration for the Outline engine.
//!
//! Everything here is fixed when the caches are constructed; nothing is
//! renegotiated per call.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Language level the frontend compiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    Es5,
    Es2015,
    Es2017,
    Es2020,
    Es2022,
    EsNext,
}

/// Module system assumed for emitted and resolved code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    CommonJs,
    Es2015,
    Es2020,
    EsNext,
    Node16,
    NodeNext,
}

/// How JSX syntax is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsxMode {
    /// JSX is not enabled; `.tsx`/`.jsx` members are flagged
    None,
    Preserve,
    React,
    ReactJsx,
}

/// Compiler configuration shared by every program a cache builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: ScriptTarget,
    pub module: ModuleKind,
    pub strict: bool,
    pub allow_js: bool,
    pub jsx: JsxMode,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target: ScriptTarget::Es2022,
            module: ModuleKind::EsNext,
            strict: true,
            allow_js: true,
            jsx: JsxMode::Preserve,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Options handed to the frontend for every program build
    #[serde(default)]
    pub compiler: CompilerOptions,

    /// Maximum parsed trees kept by the source file cache
    #[serde(default = "default_source_file_cache_capacity")]
    pub source_file_cache_capacity: usize,

    /// Maximum programs kept by the program cache
    #[serde(default = "default_program_cache_capacity")]
    pub program_cache_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_source_file_cache_capacity() -> usize {
    100
}

fn default_program_cache_capacity() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".outline")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compiler: CompilerOptions::default(),
            source_file_cache_capacity: default_source_file_cache_capacity(),
            program_cache_capacity: default_program_cache_capacity(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Location of the user config file, `~/.outline/config.yaml`
    pub fn default_path() -> PathBuf {
        default_config_dir().join("config.yaml")
    }

    /// Load configuration from `~/.outline/config.yaml`, falling back to defaults
    pub fn load() -> Self {
        let config_path = Self::default_path();
        Self::load_or_default(&config_path).unwrap_or_else(|e| {
            tracing::warn!(path = ?config_path, "Failed to load config file: {}", e);
            Self::default()
        })
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// Unlike [`EngineConfig::load`] this does not log; a file that exists
    /// but cannot be read or parsed is returned as an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
