//! nbt::compound
//!
//! Keyed tree nodes with stable entry order.
//!
//! # Invariants
//!
//! - Keys are unique within a compound
//! - Entry order is insertion order; replacing a value keeps its position
//!
//! # Representation
//!
//! Entries live in a `Vec` and lookups scan linearly. Display compounds
//! hold a handful of keys, so ordered storage wins over hashing here.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::list::ListTag;
use super::tag::{write_quoted, Tag};

/// A keyed tree node holding named child values.
///
/// # Example
///
/// ```
/// use keepsake::nbt::{CompoundTag, Tag};
///
/// let mut display = CompoundTag::new();
/// display.insert("Name", Tag::from("Steve's Sword"));
/// display.insert("Name", Tag::from("Iron Sword"));
///
/// // Replacement keeps the single entry and its position.
/// assert_eq!(display.len(), 1);
/// assert_eq!(display.get_str("Name"), Some("Iron Sword"));
///
/// assert_eq!(display.remove("Name").and_then(|t| t.as_str().map(String::from)),
///            Some("Iron Sword".to_string()));
/// assert!(display.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundTag {
    entries: Vec<(String, Tag)>,
}

impl CompoundTag {
    /// Create an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tag stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, tag)| tag)
    }

    /// Get the tag stored under `key` mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, tag)| tag)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a tag under `key`, returning the previous value if any.
    ///
    /// Replacing an existing key keeps the entry's position; a new key is
    /// appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        let key = key.into();
        let tag = tag.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, tag)),
            None => {
                self.entries.push((key, tag));
                None
            }
        }
    }

    /// Remove the entry under `key`, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the compound has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, tag)| (k.as_str(), tag))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Get the string stored under `key`.
    ///
    /// Returns `None` if the key is absent or holds a non-string tag.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Tag::as_str)
    }

    /// Get the list stored under `key`.
    pub fn get_list(&self, key: &str) -> Option<&ListTag> {
        self.get(key).and_then(Tag::as_list)
    }

    /// Get the list stored under `key` mutably.
    pub fn get_list_mut(&mut self, key: &str) -> Option<&mut ListTag> {
        self.get_mut(key).and_then(Tag::as_list_mut)
    }

    /// Get the compound stored under `key`.
    pub fn get_compound(&self, key: &str) -> Option<&CompoundTag> {
        self.get(key).and_then(Tag::as_compound)
    }

    /// Get the compound stored under `key` mutably.
    pub fn get_compound_mut(&mut self, key: &str) -> Option<&mut CompoundTag> {
        self.get_mut(key).and_then(Tag::as_compound_mut)
    }

    /// Get the compound under `key`, creating an empty one first if the key
    /// is absent. A non-compound value under `key` is replaced.
    pub fn compound_entry(&mut self, key: impl Into<String>) -> &mut CompoundTag {
        let key = key.into();
        let index = match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => {
                if !matches!(self.entries[i].1, Tag::Compound(_)) {
                    self.entries[i].1 = Tag::Compound(CompoundTag::new());
                }
                i
            }
            None => {
                self.entries
                    .push((key, Tag::Compound(CompoundTag::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[index].1 {
            Tag::Compound(compound) => compound,
            _ => unreachable!(),
        }
    }
}

impl Serialize for CompoundTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, tag) in &self.entries {
            map.serialize_entry(key, tag)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompoundTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CompoundVisitor;

        impl<'de> Visitor<'de> for CompoundVisitor {
            type Value = CompoundTag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of tag names to tags")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut compound = CompoundTag::new();
                while let Some((key, tag)) = access.next_entry::<String, Tag>()? {
                    // Duplicate keys in the input collapse to the last value.
                    compound.insert(key, tag);
                }
                Ok(compound)
            }
        }

        deserializer.deserialize_map(CompoundVisitor)
    }
}

impl fmt::Display for CompoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, tag)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if is_bare_key(key) {
                write!(f, "{key}")?;
            } else {
                write_quoted(f, key)?;
            }
            write!(f, ":{tag}")?;
        }
        write!(f, "}}")
    }
}

/// Keys render unquoted when they use only identifier-safe characters.
fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}
