//! Hierarchical namespace store with dotted-path addressing

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::value::Value;

/// Nested, attribute-addressable mapping of configuration slots.
///
/// Each slot holds either a leaf [`Value`] or a nested `Store`. Slots are
/// addressed by a single name or a dotted path (`blog.posts_per_page`).
/// Writes auto-create empty intermediate stores along the path; reads never
/// do. Independent writers each own a subtree and extend the tree through
/// [`Store::merge`] without having to know each other's keys.
///
/// Iteration follows sorted key order, so two stores with equal content
/// always snapshot identically.
///
/// ```
/// use site_namespace::Store;
///
/// let mut store = Store::new();
/// store.set("blog.posts_per_page", 10).unwrap();
/// assert_eq!(store.get("blog.posts_per_page").unwrap().as_int(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    slots: BTreeMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a dotted path, rejecting empty paths and empty segments.
    fn split(path: &str) -> Result<Vec<&str>> {
        let segments: Vec<&str> = path.split('.').collect();
        if path.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(segments)
    }

    /// Read the value at `path`.
    ///
    /// Fails with `NotFound` when any step is missing or a non-store leaf
    /// blocks an intermediate step. Read-path traversal never auto-creates.
    pub fn get(&self, path: &str) -> Result<&Value> {
        let segments = Self::split(path)?;
        let mut current = self;
        for (i, segment) in segments.iter().enumerate() {
            let slot = current.slots.get(*segment).ok_or_else(|| Error::NotFound {
                path: path.to_string(),
            })?;
            if i + 1 == segments.len() {
                return Ok(slot);
            }
            match slot {
                Value::Store(next) => current = next,
                _ => {
                    return Err(Error::NotFound {
                        path: path.to_string(),
                    });
                }
            }
        }
        Err(Error::NotFound {
            path: path.to_string(),
        })
    }

    /// Non-failing variant of [`Store::get`].
    pub fn try_get(&self, path: &str) -> Option<&Value> {
        self.get(path).ok()
    }

    /// Whether a value exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Write `value` at `path`, overwriting any existing terminal leaf.
    ///
    /// Intermediate stores are created as needed. Fails with `Conflict` if
    /// an intermediate segment already holds a non-store leaf; a scalar
    /// never silently becomes a store.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments = Self::split(path)?;
        let (last, parents) = match segments.split_last() {
            Some(parts) => parts,
            None => {
                return Err(Error::InvalidPath {
                    path: path.to_string(),
                });
            }
        };
        let parent = descend_mut(self, path, parents)?;
        parent.slots.insert((*last).to_string(), value.into());
        Ok(())
    }

    /// Mutable access to the nested store at `path`, creating empty stores
    /// along the way.
    ///
    /// Fails with `Conflict` if any segment holds a non-store leaf.
    pub fn subtree_mut(&mut self, path: &str) -> Result<&mut Store> {
        let segments = Self::split(path)?;
        descend_mut(self, path, &segments)
    }

    /// Set a single named slot directly, without path parsing.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.slots.insert(name.into(), value.into());
    }

    /// Merge another store into this one.
    ///
    /// For each slot: store-into-store recurses, anything else overwrites.
    /// The incoming side wins at the leaf while nested domains stay
    /// additive, so a later stage can override a single key without
    /// clobbering sibling entries written by earlier stages.
    pub fn merge(&mut self, other: &Store) {
        for (name, incoming) in &other.slots {
            match self.slots.entry(name.clone()) {
                Entry::Occupied(mut occupied) => match (occupied.get_mut(), incoming) {
                    (Value::Store(existing), Value::Store(sub)) => existing.merge(sub),
                    (slot, _) => *slot = incoming.clone(),
                },
                Entry::Vacant(vacant) => {
                    vacant.insert(incoming.clone());
                }
            }
        }
    }

    /// Deep copy of the whole tree, for assertions and debugging.
    pub fn snapshot(&self) -> Store {
        self.clone()
    }

    /// JSON rendering of the tree (patterns as source text, hooks as a
    /// placeholder).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Walk `segments` downward from `current`, auto-creating empty stores.
fn descend_mut<'a>(
    mut current: &'a mut Store,
    path: &str,
    segments: &[&str],
) -> Result<&'a mut Store> {
    for segment in segments {
        let slot = current
            .slots
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Store(Store::new()));
        current = match slot {
            Value::Store(next) => next,
            _ => {
                return Err(Error::Conflict {
                    path: path.to_string(),
                    segment: (*segment).to_string(),
                });
            }
        };
    }
    Ok(current)
}

impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (name, value) in &self.slots {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
