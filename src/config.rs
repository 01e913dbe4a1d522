//! Per-interface configuration
//!
//! Mirrors the knobs an interface variant declares: how the view is set up
//! (read-only, word wrap, syntax file), how its template is preprocessed
//! (dedent, skip_first_line), the namespace for region tags, and whether
//! rendering runs in strict mode.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing config files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Namespace prefixed to region tags handed to the view binder,
    /// disambiguating interface-owned spans from other buffer annotations
    pub namespace: String,
    /// Whether the bound view should be read-only
    pub read_only: bool,
    /// Whether the bound view should word-wrap
    pub word_wrap: bool,
    /// Syntax definition for the bound view, if any
    pub syntax_file: Option<String>,
    /// Strip up to this many leading columns from every template line
    pub dedent: usize,
    /// Drop everything up to and including the template's first newline
    pub skip_first_line: bool,
    /// Fail on placeholders with no registered partial instead of passing
    /// them through verbatim
    pub strict: bool,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            namespace: "interface".to_string(),
            read_only: true,
            word_wrap: false,
            syntax_file: None,
            dedent: 0,
            skip_first_line: false,
            strict: false,
        }
    }
}

impl InterfaceConfig {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_dedent(mut self, dedent: usize) -> Self {
        self.dedent = dedent;
        self
    }

    pub fn with_skip_first_line(mut self, skip: bool) -> Self {
        self.skip_first_line = skip;
        self
    }
}
