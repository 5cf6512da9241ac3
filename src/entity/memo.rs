// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{FieldName, Model};
use crate::traits::Mixin;

/// Stable identity of a stateful mixin within one entity lineage.
///
/// ```
/// use entity_mixins::entity::MixinId;
///
/// let id = MixinId::for_targets("hashPasswords", ["password"]);
/// assert_eq!(id.as_str(), "hashPasswords(password)");
///
/// let latch = MixinId::scoped("freezeProperties", "shippingAddress");
/// assert_eq!(latch.as_str(), "freezeProperties:shippingAddress");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MixinId(Cow<'static, str>);

impl MixinId {
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Identity of a mixin configured over a list of targets, e.g.
    /// `encryptProperties(lastName,email)`. Two mixins of the same kind over
    /// different targets never share a memo slot.
    pub fn for_targets<I, S>(base: &str, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = targets.into_iter().map(|t| t.as_ref().to_string()).collect();
        Self(Cow::Owned(format!("{}({})", base, names.join(","))))
    }

    /// Identity scoped to a single property, e.g. a conditional-freeze latch.
    pub fn scoped(base: &str, property: &str) -> Self {
        Self(Cow::Owned(format!("{}:{}", base, property)))
    }

    pub(crate) fn for_fields<F: FieldName>(base: &str, fields: &[F]) -> Self {
        Self::for_targets(base, fields.iter().map(|f| f.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MixinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-entity table of mixin closures installed on first application.
///
/// For a given entity lineage an id resolves to exactly one closure: the one
/// built the first time the mixin ran. Closures are shared through `Arc`, so
/// cloning an entity carries the memo forward without rebuilding anything.
pub struct MixinMemo<M: Model> {
    entries: BTreeMap<MixinId, Arc<dyn Mixin<M>>>,
}

impl<M: Model> MixinMemo<M> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The closure installed under `id`, if any.
    pub fn get(&self, id: &MixinId) -> Option<&Arc<dyn Mixin<M>>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &MixinId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &MixinId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert only if `id` is vacant. Returns whether an entry was added.
    pub(crate) fn insert_once<F>(&mut self, id: MixinId, build: F) -> bool
    where
        F: FnOnce() -> Arc<dyn Mixin<M>>,
    {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, build());
        true
    }
}

impl<M: Model> Default for MixinMemo<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for MixinMemo<M> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

// Only the ids are shown; the closures are bookkeeping.
impl<M: Model> fmt::Debug for MixinMemo<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixinMemo")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
