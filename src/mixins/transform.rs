// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::crypto::{Cipher, Hasher};
use crate::entity::{Entity, MixinId};
use crate::errors::{CryptoError, MixinError};
use crate::model::{is_absent, plaintext, FieldName, Model, Value};
use crate::observability::messages::{mixin::PropertiesTransformed, StructuredLog};
use crate::traits::{Mixin, Mode, MutationContext};

#[derive(Clone)]
enum Transform {
    Encrypt(Arc<dyn Cipher>),
    Hash(Arc<dyn Hasher>),
}

impl Transform {
    fn name(&self) -> &'static str {
        match self {
            Transform::Encrypt(_) => "encryptProperties",
            Transform::Hash(_) => "hashPasswords",
        }
    }

    fn run(&self, value: &str) -> Result<String, CryptoError> {
        match self {
            Transform::Encrypt(cipher) => cipher.encrypt(value),
            Transform::Hash(hasher) => Ok(hasher.hash(value)),
        }
    }
}

/// Replaces property values with the output of an injected cipher or hasher.
///
/// The input is always the value the incoming patch supplies, never the
/// entity's current value, so applying the mixin again with the same context
/// reproduces the same output instead of transforming its own output. On
/// create every present target is transformed and the update variant is
/// installed in the memo. On update only values the patch actually changes
/// are transformed, so resubmitting a stored ciphertext or digest leaves it
/// untouched.
pub struct TransformProperties<M: Model> {
    transform: Transform,
    targets: Vec<M::Field>,
    installed: bool,
}

impl<M: Model> TransformProperties<M> {
    pub fn encrypt(fields: impl IntoIterator<Item = M::Field>, cipher: Arc<dyn Cipher>) -> Self {
        Self::build(Transform::Encrypt(cipher), fields)
    }

    pub fn hash(fields: impl IntoIterator<Item = M::Field>, hasher: Arc<dyn Hasher>) -> Self {
        Self::build(Transform::Hash(hasher), fields)
    }

    fn build(transform: Transform, fields: impl IntoIterator<Item = M::Field>) -> Self {
        Self {
            transform,
            targets: fields.into_iter().collect(),
            installed: false,
        }
    }

    pub fn targets(&self) -> &[M::Field] {
        &self.targets
    }

    fn update_variant(&self) -> Self {
        Self {
            transform: self.transform.clone(),
            targets: self.targets.clone(),
            installed: true,
        }
    }

    /// The patch value to transform for `field`, if any.
    fn source<'c>(&self, field: M::Field, ctx: &MutationContext<'c, M>) -> Option<&'c Value> {
        let incoming = ctx.patch().get(field).filter(|v| !is_absent(Some(*v)))?;
        match ctx.mode() {
            Mode::Create if !self.installed => Some(incoming),
            _ if ctx.supplies_new_value(field) => Some(incoming),
            _ => None,
        }
    }
}

impl<M: Model> Mixin<M> for TransformProperties<M> {
    fn id(&self) -> MixinId {
        MixinId::for_fields(self.transform.name(), &self.targets)
    }

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let mut replaced: Vec<(M::Field, Value)> = Vec::new();

        for &field in &self.targets {
            let Some(value) = self.source(field, ctx) else {
                continue;
            };
            let output = self
                .transform
                .run(&plaintext(value))
                .map_err(|source| MixinError::Crypto {
                    model: M::NAME,
                    mixin: self.id().to_string(),
                    field: field.as_str().to_string(),
                    source,
                })?;
            replaced.push((field, Value::String(output)));
        }

        if !replaced.is_empty() {
            let id = self.id();
            let names: Vec<&str> = replaced.iter().map(|(f, _)| f.as_str()).collect();
            PropertiesTransformed {
                model: M::NAME,
                mixin_id: id.as_str(),
                fields: &names,
            }
            .log();
        }

        let mut entity = entity.install_once(self.id(), || Arc::new(self.update_variant()));
        for (field, value) in replaced {
            entity = entity.with(field, value);
        }
        Ok(entity)
    }
}
