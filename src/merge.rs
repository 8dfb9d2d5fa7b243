//! Deep merge of value mappings.
//!
//! [`merge`] folds a source mapping into a destination mapping in place:
//! nested mappings merge key-by-key, sequences concatenate, and scalars are
//! overwritten by the source. Every merge point checks type compatibility;
//! the first incompatibility aborts the call with a [`MergeError`] naming
//! the offending key and both types.
//!
//! # Partial mutation
//!
//! A failed merge is **not** rolled back: keys merged before the mismatch
//! stay merged. Callers treat a [`MergeError`] as fatal to the whole merge
//! sequence and discard the destination, so no undo log is kept.
//!
//! # Concurrency
//!
//! The engine is synchronous pure computation plus in-place mutation.
//! Merges into the same destination must be serialized by the caller; the
//! `&mut` receiver enforces that within safe code.

use std::fmt;

use crate::model::{ElementKind, Kind, Mapping, Sequence, Value};

// ---------------------------------------------------------------------------
// MergeError
// ---------------------------------------------------------------------------

/// Two values sharing a key could not be reconciled.
///
/// The only error the merge engine produces. `key` is the dotted path of
/// the conflicting key, relative to the mapping the merge started from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeError {
    key: String,
    src_type: String,
    dst_type: String,
}

impl MergeError {
    fn new(key: &str, src_type: String, dst_type: String) -> Self {
        Self {
            key: key.to_owned(),
            src_type,
            dst_type,
        }
    }

    /// Prefix the conflicting key with the parent key it was reached
    /// through, building a dotted path while the recursion unwinds.
    #[must_use]
    fn nested(mut self, parent: &str) -> Self {
        self.key = format!("{parent}.{}", self.key);
        self
    }

    /// Dotted path of the conflicting key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Type description of the source value.
    #[must_use]
    pub fn src_type(&self) -> &str {
        &self.src_type
    }

    /// Type description of the destination value.
    #[must_use]
    pub fn dst_type(&self) -> &str {
        &self.dst_type
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot assign {} to {} at key '{}'",
            self.src_type, self.dst_type, self.key
        )
    }
}

impl std::error::Error for MergeError {}

// ---------------------------------------------------------------------------
// merge
// ---------------------------------------------------------------------------

/// Merge `src` into `dst` in place.
///
/// `None` models "no destination container": the call is a no-op success,
/// since callers may legitimately hold an unset context. An empty `src` is
/// likewise a no-op.
///
/// For every key of `src`, in insertion order: a key absent from `dst` is
/// inserted unchanged; a shared key is reconciled by the concrete kind of
/// the destination value (references dereferenced on both sides):
///
/// - **Mapping** — the source value must also be a mapping; merge recurses.
/// - **Sequence** — the source value must be a sequence with an assignable
///   element kind; source elements are appended after destination elements,
///   duplicates preserved.
/// - **Leaf** — the source kind must be assignable to the destination kind;
///   the source value replaces the destination (source wins).
///
/// # Errors
///
/// Returns [`MergeError`] on the first incompatible pair. Keys merged
/// earlier in iteration order remain merged (see the module docs).
pub fn merge(dst: Option<&mut Mapping>, src: Mapping) -> Result<(), MergeError> {
    match dst {
        None => Ok(()),
        Some(dst) => merge_mapping(dst, src),
    }
}

fn merge_mapping(dst: &mut Mapping, src: Mapping) -> Result<(), MergeError> {
    for (key, src_val) in src {
        let src_val = src_val.into_resolved();
        match dst.get_mut(&key) {
            None => dst.set(key, src_val),
            Some(slot) => {
                // Mutate at the dereferenced target so reference wrapping
                // on the destination survives the merge.
                let target = slot.resolve_mut();
                match target {
                    Value::Mapping(dst_map) => match src_val {
                        Value::Mapping(src_map) => {
                            merge_mapping(dst_map, src_map).map_err(|e| e.nested(&key))?;
                        }
                        other => {
                            return Err(MergeError::new(
                                &key,
                                other.type_name(),
                                Kind::Mapping.to_string(),
                            ));
                        }
                    },
                    Value::Sequence(dst_seq) => match src_val {
                        Value::Sequence(src_seq) => {
                            if !sequences_compatible(&src_seq, dst_seq) {
                                return Err(MergeError::new(
                                    &key,
                                    src_seq.type_name(),
                                    dst_seq.type_name(),
                                ));
                            }
                            dst_seq.extend(src_seq);
                        }
                        other => {
                            return Err(MergeError::new(
                                &key,
                                other.type_name(),
                                dst_seq.type_name(),
                            ));
                        }
                    },
                    leaf => {
                        if !assignable(src_val.kind(), leaf.kind()) {
                            return Err(MergeError::new(
                                &key,
                                src_val.type_name(),
                                leaf.type_name(),
                            ));
                        }
                        *leaf = src_val;
                    }
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Assignability
// ---------------------------------------------------------------------------

/// Whether a source value of kind `src` may stand in for a destination slot
/// of kind `dst`. Not commutative: evaluated strictly source-to-destination.
///
/// Identical kinds are assignable; `Integer` widens to `Float`; `Null` is
/// the untyped leaf, convertible to and from anything.
fn assignable(src: Kind, dst: Kind) -> bool {
    src == dst
        || matches!((src, dst), (Kind::Integer, Kind::Float))
        || src == Kind::Null
        || dst == Kind::Null
}

/// Whether `src`'s elements may be appended to `dst`.
///
/// An empty source adds nothing; an empty or mixed destination has no
/// established element type to violate. A mixed source never merges into a
/// uniform destination — that would silently widen its element type.
fn sequences_compatible(src: &Sequence, dst: &Sequence) -> bool {
    match (src.element_kind(), dst.element_kind()) {
        (ElementKind::Empty, _) | (_, ElementKind::Empty | ElementKind::Mixed) => true,
        (ElementKind::Mixed, ElementKind::Uniform(_)) => false,
        (ElementKind::Uniform(s), ElementKind::Uniform(d)) => assignable(s, d),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
