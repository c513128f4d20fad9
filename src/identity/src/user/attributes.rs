//! Attribute multimap with reserved-key normalization

use crate::types::{EMAIL, USERNAME};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered multimap from attribute name to its values
///
/// Keys keep their first insertion position. The first value stored under
/// `username` or `email` is always lower-case, including after
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: IndexMap<String, Vec<String>>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is subject to lower-casing
    pub fn is_normalized(name: &str) -> bool {
        name == USERNAME || name == EMAIL
    }

    /// Replace all values of `name` with a single value
    pub fn set_single(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let mut value = value.into();
        if Self::is_normalized(&name) {
            value = value.to_lowercase();
        }
        self.entries.insert(name, vec![value]);
    }

    /// Replace the full value sequence of `name`
    ///
    /// For reserved keys only the first value is lower-cased; an empty
    /// sequence is stored as-is.
    pub fn set(&mut self, name: impl Into<String>, mut values: Vec<String>) {
        let name = name.into();
        if Self::is_normalized(&name) {
            if let Some(first) = values.first_mut() {
                *first = first.to_lowercase();
            }
        }
        self.entries.insert(name, values);
    }

    /// Delete `name` entirely, returning its previous values
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(name)
    }

    /// First value of `name`, if any
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Values of `name`; empty when the key is absent
    pub fn values(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `name` is present (possibly with no values)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of the underlying map
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        self.entries.clone()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut attributes = Attributes::new();
        for (name, values) in raw {
            attributes.set(name, values);
        }
        Ok(attributes)
    }
}
