//! Stacking modifier layers
//!
//! A [`Modifier`] is one bundle of per-kind integer deltas. A [`ModifierSet`]
//! is an ordered stack of such bundles whose deltas are summed on query.
//! Layers are added and removed as a unit, so a timed effect can be lifted
//! without recomputing anything else on the stack.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a single modifier layer inside a [`ModifierSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A mapping of modifier kind to delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Ord",
    deserialize = "K: Deserialize<'de> + Ord"
))]
pub struct Modifier<K: Ord> {
    deltas: BTreeMap<K, i32>,
}

impl<K: Ord> Default for Modifier<K> {
    fn default() -> Self {
        Self {
            deltas: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Modifier<K> {
    /// Create an empty modifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modifier holding a single delta
    pub fn single(kind: K, value: i32) -> Self {
        let mut m = Self::new();
        m.set_delta(kind, value);
        m
    }

    /// Builder-style variant of [`Modifier::set_delta`]
    pub fn with(mut self, kind: K, value: i32) -> Self {
        self.set_delta(kind, value);
        self
    }

    /// Delta for a kind (0 when unset)
    pub fn delta(&self, kind: K) -> i32 {
        self.deltas.get(&kind).copied().unwrap_or(0)
    }

    /// Set the delta for a kind, replacing any previous value
    pub fn set_delta(&mut self, kind: K, value: i32) {
        self.deltas.insert(kind, value);
    }

    /// Whether no kind has been set
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Iterate over the set kinds and their deltas
    pub fn iter(&self) -> impl Iterator<Item = (K, i32)> + '_ {
        self.deltas.iter().map(|(k, v)| (*k, *v))
    }
}

impl<K: Ord + Copy + fmt::Display> fmt::Display for Modifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", kind, value)?;
        }
        Ok(())
    }
}

/// An ordered stack of modifier layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Ord",
    deserialize = "K: Deserialize<'de> + Ord"
))]
pub struct ModifierSet<K: Ord> {
    layers: Vec<(LayerId, Modifier<K>)>,
}

impl<K: Ord> Default for ModifierSet<K> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<K: Ord + Copy> ModifierSet<K> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a layer and return its identity for later removal
    pub fn add(&mut self, modifier: Modifier<K>) -> LayerId {
        let id = LayerId::new();
        self.layers.push((id, modifier));
        id
    }

    /// Push a single-delta layer
    pub fn add_delta(&mut self, kind: K, value: i32) -> LayerId {
        self.add(Modifier::single(kind, value))
    }

    /// Append every layer of another set, keeping their identities
    pub fn extend(&mut self, other: &ModifierSet<K>) {
        self.layers.extend(other.layers.iter().cloned());
    }

    /// Remove one layer by identity. Returns the layer if it was present.
    pub fn remove(&mut self, id: LayerId) -> Option<Modifier<K>> {
        let pos = self.layers.iter().position(|(lid, _)| *lid == id)?;
        Some(self.layers.remove(pos).1)
    }

    /// Drop every layer
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Sum of a kind across all layers
    pub fn delta(&self, kind: K) -> i32 {
        self.layers.iter().map(|(_, m)| m.delta(kind)).sum()
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the set holds no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Whether a given layer is still on the stack
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.iter().any(|(lid, _)| *lid == id)
    }

    /// Iterate over the layers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Modifier<K>> {
        self.layers.iter().map(|(_, m)| m)
    }
}
