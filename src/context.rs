//! Context assembly from value documents.
//!
//! Resolves value-document specs to files, parses each document into a
//! [`Mapping`] (YAML or JSON, by extension), and folds the documents into a
//! single rendering context with the merge engine — one merge per document,
//! in document order, always into the same accumulating destination.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StencilError;
use crate::merge::merge;
use crate::model::{Mapping, Value};

/// Extensions probed when a bare document name is resolved against the
/// context directory, and listed by [`list_value_documents`].
pub const VALUE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a value-document spec to a file path.
///
/// A spec naming an existing file is used as-is. Otherwise it is treated as
/// a document name inside `ctx_dir`: first probing `<name>.yaml`,
/// `<name>.yml`, `<name>.json`, then the name verbatim (for specs that
/// already carry an extension).
///
/// # Errors
/// Returns [`StencilError::ContextNotFound`] when nothing matches.
pub fn resolve_value_path(spec: &str, ctx_dir: &Path) -> Result<PathBuf, StencilError> {
    let direct = Path::new(spec);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }
    for ext in VALUE_EXTENSIONS {
        let candidate = ctx_dir.join(format!("{spec}.{ext}"));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    let named = ctx_dir.join(spec);
    if named.is_file() {
        return Ok(named);
    }
    Err(StencilError::ContextNotFound {
        name: spec.to_owned(),
        dir: ctx_dir.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse one value document into a [`Mapping`].
///
/// `.json` files parse as JSON; everything else parses as YAML. The
/// document's top level must be a mapping (an empty document counts as an
/// empty mapping).
///
/// # Errors
/// Returns [`StencilError::ValueFile`] on read failures, parse failures,
/// unrepresentable structure, or a non-mapping top level.
pub fn load_value_document(path: &Path) -> Result<Mapping, StencilError> {
    let value_file = |detail: String| StencilError::ValueFile {
        path: path.to_owned(),
        detail,
    };

    let text =
        fs::read_to_string(path).map_err(|e| value_file(format!("could not read file: {e}")))?;

    let value = if path.extension().is_some_and(|ext| ext == "json") {
        let parsed: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| value_file(e.to_string()))?;
        Value::from(parsed)
    } else {
        let parsed: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|e| value_file(e.to_string()))?;
        Value::try_from(parsed).map_err(|e| value_file(e.to_string()))?
    };

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(value_file(format!(
            "top-level value must be a mapping, got {}",
            other.type_name()
        ))),
    }
}

/// Build the rendering context by merging `paths` in order.
///
/// # Errors
/// Propagates document loading errors; a merge conflict is reported as
/// [`StencilError::Merge`] naming the offending document. Processing stops
/// at the first failure.
pub fn build_context(paths: &[PathBuf]) -> Result<Mapping, StencilError> {
    let mut ctx = Mapping::new();
    for path in paths {
        let doc = load_value_document(path)?;
        debug!(path = %path.display(), keys = doc.len(), "merging value document");
        merge(Some(&mut ctx), doc).map_err(|e| StencilError::Merge {
            path: path.clone(),
            source: e,
        })?;
    }
    Ok(ctx)
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// List the value documents available in `dir`, by stem, sorted.
///
/// A missing directory lists as empty rather than erroring — the default
/// context directory may not have been created yet.
///
/// # Errors
/// Returns an I/O error for any failure other than the directory not
/// existing.
pub fn list_value_documents(dir: &Path) -> Result<Vec<String>, StencilError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let has_value_ext = path
            .extension()
            .is_some_and(|ext| VALUE_EXTENSIONS.iter().any(|v| ext == *v));
        if !path.is_file() || !has_value_ext {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            names.push(stem.to_string_lossy().into_owned());
        }
    }
    names.sort();
    names.dedup();
    Ok(names)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
