//! Canonical value tree and its serde implementations.

use std::fmt;

use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor,
};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key the `toml` deserializer uses to pass date-times through serde.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Numeric scalar.
///
/// Floats are always finite; equality compares their bit patterns so a
/// value always equals itself.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A value inside a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// String scalar.
    String(String),
    /// Numeric scalar.
    Number(Number),
    /// Boolean scalar.
    Bool(bool),
    /// Ordered sequence of values.
    Sequence(Vec<Value>),
    /// Nested mapping.
    Table(Document),
}

impl Value {
    /// Human-readable name of the value's shape, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Number(_) => "a number",
            Self::Bool(_) => "a boolean",
            Self::Sequence(_) => "a sequence",
            Self::Table(_) => "a mapping",
        }
    }

    /// Returns the string slice when the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements when the value is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested document when the value is a mapping.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Document> {
        match self {
            Self::Table(doc) => Some(doc),
            _ => None,
        }
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

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Integer(v))
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Table(doc)
    }
}

/// Ordered mapping from string keys to [`Value`]s.
///
/// Iteration follows insertion order, which for parsed documents is the
/// order keys appear in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing entry keeps its position and has its value replaced; the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let owned_key = key.into();
        let new_value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == owned_key) {
            return Some(std::mem::replace(slot, new_value));
        }
        self.entries.push((owned_key, new_value));
        None
    }

    /// Iterates over entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of top-level entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the document has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(Number::Integer(v)) => serializer.serialize_i64(*v),
            Self::Number(Number::Float(v)) => serializer.serialize_f64(*v),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Table(doc) => doc.serialize(serializer),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Decoding options threaded through nested values.
#[derive(Debug, Clone, Copy)]
struct ValueSeed {
    /// Flatten `toml`'s private date-time maps into strings.
    toml_datetimes: bool,
}

impl<'de> DeserializeSeed<'de> for ValueSeed {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor(self))
    }
}

struct ValueVisitor(ValueSeed);

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        i64::try_from(v)
            .map(Value::from)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("non-finite number {v} is not supported")));
        }
        Ok(Value::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Err(E::custom("null values are not supported"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        self.0.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.0)? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        collect_map(map, self.0)
    }
}

/// Reads a mapping, rejecting repeated keys.
///
/// When decoding TOML, date-times arrive as a single-entry map under a
/// private key and are flattened to their string form.
fn collect_map<'de, A: MapAccess<'de>>(mut map: A, seed: ValueSeed) -> Result<Value, A::Error> {
    let mut doc = Document::new();
    while let Some(key) = map.next_key::<String>()? {
        if seed.toml_datetimes && doc.is_empty() && key == TOML_DATETIME_KEY {
            let stamp: String = map.next_value()?;
            return Ok(Value::String(stamp));
        }
        if doc.contains_key(&key) {
            return Err(de::Error::custom(format!("duplicate key '{key}'")));
        }
        let value = map.next_value_seed(seed)?;
        doc.entries.push((key, value));
    }
    Ok(Value::Table(doc))
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ValueSeed {
            toml_datetimes: false,
        }
        .deserialize(deserializer)
    }
}

struct DocumentVisitor(ValueSeed);

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping at the document root")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Document, A::Error> {
        match collect_map(map, self.0)? {
            Value::Table(doc) => Ok(doc),
            _ => Err(de::Error::custom("expected a mapping at the document root")),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor(ValueSeed {
            toml_datetimes: false,
        }))
    }
}

/// A [`Document`] decoded with `toml`'s date-time encoding understood.
pub(super) struct TomlDocument(pub(super) Document);

impl<'de> Deserialize<'de> for TomlDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(DocumentVisitor(ValueSeed {
                toml_datetimes: true,
            }))
            .map(Self)
    }
}
