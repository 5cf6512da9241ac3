// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::crypto::Cipher;
use crate::entity::MixinId;
use crate::model::{FieldName, Model};
use crate::traits::Mixin;

use super::TransformProperties;

/// Personal-information property names encrypted on every model that has them.
pub const PERSONAL_INFO: [&str; 8] = [
    "lastName",
    "address",
    "email",
    "phone",
    "mobile",
    "creditCard",
    "ccv",
    "ssn",
];

/// An ordered list of mixins, applied left to right on create and update.
pub struct MixinList<M: Model> {
    mixins: Vec<Arc<dyn Mixin<M>>>,
}

impl<M: Model> MixinList<M> {
    pub fn new() -> Self {
        Self { mixins: Vec::new() }
    }

    /// Append a mixin.
    pub fn with(mut self, mixin: impl Mixin<M> + 'static) -> Self {
        self.mixins.push(Arc::new(mixin));
        self
    }

    /// Append `defaults` after this list's own mixins.
    pub fn extend_defaults(mut self, defaults: MixinList<M>) -> Self {
        self.mixins.extend(defaults.mixins);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Mixin<M>>> {
        self.mixins.iter()
    }

    pub fn ids(&self) -> Vec<MixinId> {
        self.mixins.iter().map(|m| m.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.mixins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mixins.is_empty()
    }
}

impl<M: Model> Default for MixinList<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for MixinList<M> {
    fn clone(&self) -> Self {
        Self {
            mixins: self.mixins.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for MixinList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

/// Mixins every model extends: encryption of the personal-info properties the
/// model actually declares. Empty when it declares none.
pub fn default_mixins<M: Model>(cipher: Arc<dyn Cipher>) -> MixinList<M> {
    let fields: Vec<M::Field> = PERSONAL_INFO
        .iter()
        .filter_map(|name| M::Field::parse(name))
        .collect();

    if fields.is_empty() {
        return MixinList::new();
    }
    MixinList::new().with(TransformProperties::encrypt(fields, cipher))
}
