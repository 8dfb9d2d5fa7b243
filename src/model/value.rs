//! Dynamically-typed document values.
//!
//! [`Value`] is the in-memory representation of one parsed value document:
//! a closed tagged union over scalars, sequences, mappings, and a transparent
//! [`Value::Reference`] indirection. Kind dispatch is an exhaustive `match` —
//! there is no runtime type inspection anywhere in the tree.
//!
//! Mappings preserve insertion order so that rendering against the merged
//! context stays deterministic across runs.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The concrete kind of a [`Value`] after dereferencing.
///
/// `Reference` is deliberately absent: indirection is transparent and never
/// participates in kind-based decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Absence of a value.
    Null,
    /// Boolean scalar.
    Bool,
    /// Signed integer scalar.
    Integer,
    /// Floating-point scalar.
    Float,
    /// String scalar.
    String,
    /// Ordered list of values.
    Sequence,
    /// String-keyed collection of values.
    Mapping,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// One node of a parsed value document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Integer(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Ordered list of values.
    Sequence(Sequence),
    /// Insertion-ordered collection of unique string keys to values.
    Mapping(Mapping),
    /// Transparent indirection to another value.
    ///
    /// Carries no identity of its own; every kind-based decision sees the
    /// dereferenced target. A reference to nothing behaves as [`Value::Null`].
    Reference(Option<Box<Value>>),
}

static NULL: Value = Value::Null;

impl Value {
    /// The concrete kind of this value, references dereferenced.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.resolve() {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Integer(_) => Kind::Integer,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
            // resolve() never returns a reference.
            Self::Reference(_) => Kind::Null,
        }
    }

    /// Follow reference indirection to the underlying value.
    ///
    /// A dangling reference resolves to [`Value::Null`].
    #[must_use]
    pub fn resolve(&self) -> &Self {
        match self {
            Self::Reference(Some(inner)) => inner.resolve(),
            Self::Reference(None) => &NULL,
            other => other,
        }
    }

    /// Follow reference indirection to the underlying value, mutably.
    ///
    /// A dangling reference resolves to itself; it reports [`Kind::Null`]
    /// and may be overwritten in place.
    pub fn resolve_mut(&mut self) -> &mut Self {
        match self {
            Self::Reference(Some(inner)) => inner.resolve_mut(),
            other => other,
        }
    }

    /// Consume the value, stripping any reference wrapping.
    #[must_use]
    pub fn into_resolved(self) -> Self {
        match self {
            Self::Reference(Some(inner)) => inner.into_resolved(),
            Self::Reference(None) => Self::Null,
            other => other,
        }
    }

    /// Human-readable type description for diagnostics.
    ///
    /// Sequences name their element kind when it is uniform, e.g.
    /// `"sequence of integer"`.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self.resolve() {
            Self::Sequence(seq) => seq.type_name(),
            other => other.kind().to_string(),
        }
    }

    /// Returns `true` if the value dereferences to [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.resolve(), Self::Null)
    }

    /// Borrow the string scalar, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self.resolve() {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer scalar, if this is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.resolve() {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean scalar, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.resolve() {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the mapping, if this is one.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self.resolve() {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow the sequence, if this is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self.resolve() {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Self::Sequence(seq)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// The inferred element type of a [`Sequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// No elements yet — compatible with any element kind.
    Empty,
    /// Every element shares this kind.
    Uniform(Kind),
    /// Heterogeneous elements — behaves as "any".
    Mixed,
}

/// An ordered list of values. Order is significant and preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    items: Vec<Value>,
}

impl Sequence {
    /// Create an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the element at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Append one element.
    pub fn append(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Move every element of `other` onto the end, preserving order.
    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// The element kind inferred from the current contents.
    ///
    /// References among the elements are dereferenced before inspection.
    #[must_use]
    pub fn element_kind(&self) -> ElementKind {
        let mut kinds = self.items.iter().map(Value::kind);
        let Some(first) = kinds.next() else {
            return ElementKind::Empty;
        };
        if kinds.all(|k| k == first) {
            ElementKind::Uniform(first)
        } else {
            ElementKind::Mixed
        }
    }

    /// Human-readable type description, naming the element kind when uniform.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self.element_kind() {
            ElementKind::Uniform(kind) => format!("sequence of {kind}"),
            ElementKind::Empty | ElementKind::Mixed => "sequence".to_owned(),
        }
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// An insertion-ordered collection of unique string keys to values.
///
/// Entries are stored in insertion order; key lookup is linear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Borrow the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k.as_str() == key).then_some(v))
    }

    /// Insert `value` under `key`.
    ///
    /// Re-inserting an existing key replaces its value in place — the key
    /// keeps its original position and is never duplicated.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(index) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries[index].1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ---------------------------------------------------------------------------
// DocumentError
// ---------------------------------------------------------------------------

/// A parsed document used a structure the value model cannot represent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentError {
    /// Human-readable description of the unsupported structure.
    pub reason: String,
}

impl DocumentError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for DocumentError {}

// ---------------------------------------------------------------------------
// Conversions from parser values
// ---------------------------------------------------------------------------

impl TryFrom<serde_yaml::Value> for Value {
    type Error = DocumentError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, DocumentError> {
        Ok(match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => number_value(n.as_i64(), n.as_f64()),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<Sequence, _>>()?,
            ),
            serde_yaml::Value::Mapping(entries) => {
                let mut map = Mapping::new();
                for (key, val) in entries {
                    map.set(yaml_key(key)?, Self::try_from(val)?);
                }
                Self::Mapping(map)
            }
            // A tag carries no structure of its own; keep the tagged value.
            serde_yaml::Value::Tagged(tagged) => Self::try_from(tagged.value)?,
        })
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, DocumentError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_owned()),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => Err(DocumentError::new(
            "mapping keys must be scalars, got a collection",
        )),
        serde_yaml::Value::Tagged(_) => {
            Err(DocumentError::new("mapping keys must be scalars, got a tag"))
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => number_value(n.as_i64(), n.as_f64()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_value(as_i64: Option<i64>, as_f64: Option<f64>) -> Value {
    if let Some(n) = as_i64 {
        Value::Integer(n)
    } else if let Some(n) = as_f64 {
        Value::Float(n)
    } else {
        Value::Null
    }
}

// ---------------------------------------------------------------------------
// Serialize — hands the merged context to the template engine
// ---------------------------------------------------------------------------

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(seq) => seq.serialize(serializer),
            Self::Mapping(map) => map.serialize(serializer),
            Self::Reference(Some(inner)) => inner.serialize(serializer),
            Self::Reference(None) => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(value: Value) -> Value {
        Value::Reference(Some(Box::new(value)))
    }

    // -- Kind --

    #[test]
    fn kind_of_scalars() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(1).kind(), Kind::Integer);
        assert_eq!(Value::from(1.5).kind(), Kind::Float);
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::Sequence(Sequence::new()).kind(), Kind::Sequence);
        assert_eq!(Value::Mapping(Mapping::new()).kind(), Kind::Mapping);
    }

    #[test]
    fn kind_dereferences_indirection() {
        let v = reference(reference(Value::from(7)));
        assert_eq!(v.kind(), Kind::Integer);
    }

    #[test]
    fn dangling_reference_behaves_as_null() {
        let v = Value::Reference(None);
        assert_eq!(v.kind(), Kind::Null);
        assert!(v.is_null());
        assert_eq!(v.resolve(), &Value::Null);
        assert_eq!(v.into_resolved(), Value::Null);
    }

    #[test]
    fn kind_display_names() {
        for (kind, name) in [
            (Kind::Null, "null"),
            (Kind::Bool, "boolean"),
            (Kind::Integer, "integer"),
            (Kind::Float, "float"),
            (Kind::String, "string"),
            (Kind::Sequence, "sequence"),
            (Kind::Mapping, "mapping"),
        ] {
            assert_eq!(kind.to_string(), name);
        }
    }

    // -- resolve --

    #[test]
    fn resolve_returns_self_for_concrete_values() {
        let v = Value::from("plain");
        assert_eq!(v.resolve(), &v);
    }

    #[test]
    fn into_resolved_strips_wrapping() {
        let v = reference(Value::from("inner"));
        assert_eq!(v.into_resolved(), Value::from("inner"));
    }

    #[test]
    fn resolve_mut_reaches_the_target() {
        let mut v = reference(Value::from(1));
        *v.resolve_mut() = Value::from(2);
        assert_eq!(v.resolve(), &Value::from(2));
        // The wrapper survives mutation through it.
        assert!(matches!(v, Value::Reference(Some(_))));
    }

    // -- type_name --

    #[test]
    fn type_name_for_uniform_sequence() {
        let seq: Sequence = vec![Value::from(1), Value::from(2)].into_iter().collect();
        assert_eq!(Value::from(seq).type_name(), "sequence of integer");
    }

    #[test]
    fn type_name_for_mixed_sequence() {
        let seq: Sequence = vec![Value::from(1), Value::from("a")].into_iter().collect();
        assert_eq!(Value::from(seq).type_name(), "sequence");
    }

    #[test]
    fn type_name_for_scalars() {
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::Mapping(Mapping::new()).type_name(), "mapping");
    }

    // -- Sequence --

    #[test]
    fn sequence_append_and_get() {
        let mut seq = Sequence::new();
        assert!(seq.is_empty());
        seq.append(Value::from(1));
        seq.append(Value::from(2));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0), Some(&Value::from(1)));
        assert_eq!(seq.get(2), None);
    }

    #[test]
    fn sequence_extend_preserves_order() {
        let mut a: Sequence = vec![Value::from(1), Value::from(2)].into_iter().collect();
        let b: Sequence = vec![Value::from(3)].into_iter().collect();
        a.extend(b);
        let got: Vec<_> = a.iter().cloned().collect();
        assert_eq!(got, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn element_kind_empty() {
        assert_eq!(Sequence::new().element_kind(), ElementKind::Empty);
    }

    #[test]
    fn element_kind_uniform() {
        let seq: Sequence = vec![Value::from("a"), Value::from("b")].into_iter().collect();
        assert_eq!(seq.element_kind(), ElementKind::Uniform(Kind::String));
    }

    #[test]
    fn element_kind_mixed() {
        let seq: Sequence = vec![Value::from("a"), Value::from(1)].into_iter().collect();
        assert_eq!(seq.element_kind(), ElementKind::Mixed);
    }

    #[test]
    fn element_kind_sees_through_references() {
        let seq: Sequence = vec![reference(Value::from(1)), Value::from(2)]
            .into_iter()
            .collect();
        assert_eq!(seq.element_kind(), ElementKind::Uniform(Kind::Integer));
    }

    // -- Mapping --

    #[test]
    fn mapping_set_and_get() {
        let mut map = Mapping::new();
        map.set("a", Value::from(1));
        assert_eq!(map.get("a"), Some(&Value::from(1)));
        assert_eq!(map.get("b"), None);
        assert!(map.contains_key("a"));
    }

    #[test]
    fn mapping_reinsert_replaces_in_place() {
        let mut map = Mapping::new();
        map.set("a", Value::from(1));
        map.set("b", Value::from(2));
        map.set("a", Value::from(3));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Value::from(3)));
        // "a" keeps its original position.
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn mapping_preserves_insertion_order() {
        let mut map = Mapping::new();
        for key in ["zeta", "alpha", "mid"] {
            map.set(key, Value::Null);
        }
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn mapping_get_mut_mutates() {
        let mut map = Mapping::new();
        map.set("a", Value::from(1));
        *map.get_mut("a").unwrap() = Value::from(9);
        assert_eq!(map.get("a"), Some(&Value::from(9)));
    }

    // -- YAML conversion --

    fn yaml(text: &str) -> Value {
        let parsed: serde_yaml::Value = serde_yaml::from_str(text).unwrap();
        Value::try_from(parsed).unwrap()
    }

    #[test]
    fn yaml_scalars_convert() {
        assert_eq!(yaml("null"), Value::Null);
        assert_eq!(yaml("true"), Value::from(true));
        assert_eq!(yaml("3"), Value::from(3));
        assert_eq!(yaml("2.5"), Value::from(2.5));
        assert_eq!(yaml("hi"), Value::from("hi"));
    }

    #[test]
    fn yaml_nested_structures_convert() {
        let v = yaml("{outer: {inner: [1, 2]}}");
        let outer = v.as_mapping().unwrap();
        let inner = outer.get("outer").unwrap().as_mapping().unwrap();
        let nums = inner.get("inner").unwrap().as_sequence().unwrap();
        assert_eq!(nums.len(), 2);
        assert_eq!(nums.get(0), Some(&Value::from(1)));
    }

    #[test]
    fn yaml_mapping_preserves_document_order() {
        let v = yaml("{b: 1, a: 2, c: 3}");
        let keys: Vec<_> = v.as_mapping().unwrap().keys().map(str::to_owned).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let v = yaml("{1: one, true: yes}");
        let map = v.as_mapping().unwrap();
        assert_eq!(map.get("1").unwrap().as_str(), Some("one"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn yaml_collection_key_is_rejected() {
        let parsed: serde_yaml::Value = serde_yaml::from_str("{[1, 2]: bad}").unwrap();
        let err = Value::try_from(parsed).unwrap_err();
        assert!(err.reason.contains("keys must be scalars"));
    }

    // -- JSON conversion --

    #[test]
    fn json_document_converts() {
        let parsed: serde_json::Value =
            serde_json::from_str(r#"{"name": "x", "count": 2, "tags": ["a"]}"#).unwrap();
        let v = Value::from(parsed);
        let map = v.as_mapping().unwrap();
        assert_eq!(map.get("name").unwrap().as_str(), Some("x"));
        assert_eq!(map.get("count").unwrap().as_i64(), Some(2));
        assert_eq!(map.get("tags").unwrap().as_sequence().unwrap().len(), 1);
    }

    // -- Serialize --

    #[test]
    fn serializes_to_json_shape() {
        let mut map = Mapping::new();
        map.set("name", Value::from("Bob"));
        map.set("nums", Value::from(vec![Value::from(1)].into_iter().collect::<Sequence>()));
        map.set("missing", Value::Null);
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"name":"Bob","nums":[1],"missing":null}"#);
    }

    #[test]
    fn serializes_references_transparently() {
        let mut map = Mapping::new();
        map.set("r", reference(Value::from(5)));
        map.set("dangling", Value::Reference(None));
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"r":5,"dangling":null}"#);
    }
}
