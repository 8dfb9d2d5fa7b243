//! Unified error type for stencil operations.
//!
//! Defines [`StencilError`], covering every failure the CLI can surface:
//! context resolution, value-document parsing, merge conflicts, template
//! problems, configuration, and I/O. Messages state what went wrong and,
//! where a fix is actionable, how to fix it.

use std::fmt;
use std::path::PathBuf;

use crate::merge::MergeError;

// ---------------------------------------------------------------------------
// StencilError
// ---------------------------------------------------------------------------

/// Unified error type for stencil operations.
#[derive(Debug)]
pub enum StencilError {
    /// A value-document name could not be resolved to a file.
    ContextNotFound {
        /// The name or path that was given.
        name: String,
        /// The context directory that was searched.
        dir: PathBuf,
    },

    /// A value document could not be read, parsed, or represented.
    ValueFile {
        /// Path to the document.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// A value document conflicted with the context built so far.
    Merge {
        /// The document whose merge failed.
        path: PathBuf,
        /// The underlying type mismatch.
        source: MergeError,
    },

    /// The delimiter specification was malformed.
    BadDelimiters {
        /// The specification as given.
        spec: String,
    },

    /// A template could not be read, parsed, or rendered.
    Template {
        /// The template name (its relative path).
        name: String,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// A glob pattern was malformed.
    BadPattern {
        /// The pattern as given.
        pattern: String,
        /// Why the pattern is invalid.
        detail: String,
    },

    /// A configuration file could not be loaded or parsed.
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// An I/O error occurred.
    Io(std::io::Error),
}

// ---------------------------------------------------------------------------
// Display — actionable error messages
// ---------------------------------------------------------------------------

impl fmt::Display for StencilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextNotFound { name, dir } => {
                write!(
                    f,
                    "value document '{name}' not found in '{}'.\n  To fix: check available documents:\n    stencil list",
                    dir.display()
                )
            }
            Self::ValueFile { path, detail } => {
                write!(
                    f,
                    "invalid value document '{}': {detail}\n  To fix: correct the document and retry.",
                    path.display()
                )
            }
            Self::Merge { path, source } => {
                write!(
                    f,
                    "value document '{}' conflicts with earlier documents: {source}\n  To fix: make the conflicting keys structurally compatible, or drop one of the documents.",
                    path.display()
                )
            }
            Self::BadDelimiters { spec } => {
                write!(
                    f,
                    "not enough delimiters specified in '{spec}'.\n  To fix: pass left and right delimiters separated by a space, e.g. -d '<< >>'"
                )
            }
            Self::Template { name, detail } => {
                write!(f, "template '{name}': {detail}")
            }
            Self::BadPattern { pattern, detail } => {
                write!(f, "invalid glob pattern '{pattern}': {detail}")
            }
            Self::Config { path, detail } => {
                write!(
                    f,
                    "configuration error in '{}': {detail}\n  To fix: edit the config file and correct the issue.",
                    path.display()
                )
            }
            Self::Io(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for StencilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Merge { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<std::io::Error> for StencilError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<crate::config::ConfigError> for StencilError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config {
            path: err.path.unwrap_or_default(),
            detail: err.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
