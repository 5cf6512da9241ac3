// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire::{deserialize_fields, serialize_fields};
use crate::model::{Model, Value};

/// A typed set of property changes for one model.
///
/// Merging a patch into an entity is `{...old, ...patch}` over the model's
/// fixed field set.
pub struct Patch<M: Model> {
    changes: BTreeMap<M::Field, Value>,
}

impl<M: Model> Patch<M> {
    pub fn new() -> Self {
        Self {
            changes: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn set(mut self, field: M::Field, value: impl Into<Value>) -> Self {
        self.changes.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: M::Field, value: impl Into<Value>) {
        self.changes.insert(field, value.into());
    }

    pub fn get(&self, field: M::Field) -> Option<&Value> {
        self.changes.get(&field)
    }

    /// Whether the patch supplies any value for `field`.
    pub fn touches(&self, field: M::Field) -> bool {
        self.changes.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = M::Field> + '_ {
        self.changes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (M::Field, &Value)> {
        self.changes.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<M: Model> Default for Patch<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for Patch<M> {
    fn clone(&self) -> Self {
        Self {
            changes: self.changes.clone(),
        }
    }
}

impl<M: Model> PartialEq for Patch<M> {
    fn eq(&self, other: &Self) -> bool {
        self.changes == other.changes
    }
}

impl<M: Model> fmt::Debug for Patch<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("model", &M::NAME)
            .field("fields", &self.changes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<M: Model> FromIterator<(M::Field, Value)> for Patch<M> {
    fn from_iter<I: IntoIterator<Item = (M::Field, Value)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

impl<M: Model> Serialize for Patch<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_fields(&self.changes, serializer)
    }
}

impl<'de, M: Model> Deserialize<'de> for Patch<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            changes: deserialize_fields(deserializer)?,
        })
    }
}
