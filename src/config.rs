//! Project configuration (`.stencil.toml`).
//!
//! Defines the typed configuration for a project's `.stencil.toml`:
//! default template patterns, delimiters, and context settings. A missing
//! file yields all defaults; command-line flags override config values.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the config file, looked up in the working directory.
pub const FILE_NAME: &str = ".stencil.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level stencil project configuration.
///
/// Parsed from `.stencil.toml`. Missing fields use sensible defaults.
/// Missing file → all defaults (no error).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct StencilConfig {
    /// Rendering settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Context (value document) settings.
    #[serde(default)]
    pub context: ContextConfig,
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Rendering settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Glob patterns selecting template files, used when the command line
    /// names no templates and no patterns.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Variable delimiters as a space-separated pair (default: `"{{ }}"`).
    #[serde(default = "default_delims")]
    pub delims: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            delims: default_delims(),
        }
    }
}

fn default_delims() -> String {
    "{{ }}".to_owned()
}

// ---------------------------------------------------------------------------
// ContextConfig
// ---------------------------------------------------------------------------

/// Context (value document) settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct ContextConfig {
    /// Directory where bare value-document names are resolved.
    /// `None` means the XDG default (see [`default_context_dir`]).
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Value documents merged before any given on the command line.
    #[serde(default)]
    pub values: Vec<String>,
}

/// The default context directory: `$XDG_CONFIG_HOME/stencil`, falling back
/// to `$HOME/.config/stencil`.
#[must_use]
pub fn default_context_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_default();
            PathBuf::from(home).join(".config")
        });
    base.join("stencil")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a stencil configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl StencilConfig {
    /// Load configuration from a TOML file.
    ///
    /// - If the file does not exist, returns all defaults (not an error).
    /// - If the file exists but contains invalid TOML or unknown fields,
    ///   returns a [`ConfigError`] with line-level detail.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                // Calculate line number from byte offset.
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
