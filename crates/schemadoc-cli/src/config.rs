//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments (applied by the handlers)
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use schemadoc_core::{I18nOverrides, RenderMode, RendererConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render settings
    pub render: RenderSettings,

    /// Logging settings
    pub logging: LoggingSettings,

    /// Output settings
    pub output: OutputSettings,
}

/// Render configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Mode used when `--mode` is not given
    pub mode: RenderMode,

    /// Skip example blocks and example cuts
    pub suppress_examples: bool,

    /// Label overrides, keyed like the label set (`type`, `oneOf`, `minLength`, ...)
    pub i18n: I18nOverrides,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error); `-v` flags win over it
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Use colored output by default
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RenderSettings {
    /// Session settings for the engine renderer
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            i18n: self.i18n.clone(),
            suppress_examples: self.suppress_examples,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "unsupported config format for {}: expected .yaml, .json or .toml",
                    path.display()
                )))
            }
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        match Self::default_config_paths().into_iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let extensions = ["yaml", "json", "toml"];
        let mut paths = Vec::new();

        // Current directory
        for extension in extensions {
            paths.push(PathBuf::from(format!(".schemadoc.{extension}")));
        }
        for extension in extensions {
            paths.push(PathBuf::from(format!("schemadoc.{extension}")));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let schemadoc_dir = config_dir.join("schemadoc");
            for extension in extensions {
                paths.push(schemadoc_dir.join(format!("config.{extension}")));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for extension in extensions {
                paths.push(home_dir.join(format!(".schemadoc.{extension}")));
            }
        }

        paths
    }
}
