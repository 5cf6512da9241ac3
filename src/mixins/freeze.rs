// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::entity::{Entity, MixinId};
use crate::errors::MixinError;
use crate::model::{FieldName, Model};
use crate::traits::{Mixin, MutationContext};

use super::{target_names, Target};

const FREEZE: &str = "freezeProperties";

/// Rejects updates that touch frozen properties.
///
/// On create this records intent only: it installs its enforcing variant in
/// the entity memo and checks nothing. Every later update runs that variant.
///
/// A guarded target (`Target::When`) is frozen once its guard holds for the
/// entity as it was before the update. The first time a guard is seen to hold
/// (before or after the mutation) a per-property latch is installed, and the
/// property stays frozen even if the guard later stops holding.
pub struct FreezeProperties<M: Model> {
    targets: Vec<Target<M>>,
    enforce: bool,
}

impl<M: Model> FreezeProperties<M> {
    pub fn new(fields: impl IntoIterator<Item = M::Field>) -> Self {
        Self {
            targets: fields.into_iter().map(Target::Always).collect(),
            enforce: false,
        }
    }

    /// Freeze `field` once `guard` holds.
    pub fn when<G>(mut self, field: M::Field, guard: G) -> Self
    where
        G: Fn(&Entity<M>) -> bool + Send + Sync + 'static,
    {
        self.targets.push(Target::when(field, guard));
        self
    }

    fn enforcing(&self) -> Self {
        Self {
            targets: self.targets.clone(),
            enforce: true,
        }
    }

    fn latch(field: M::Field) -> Self {
        Self {
            targets: vec![Target::Always(field)],
            enforce: true,
        }
    }
}

fn latch_id<F: FieldName>(field: F) -> MixinId {
    MixinId::scoped(FREEZE, field.as_str())
}

impl<M: Model> Mixin<M> for FreezeProperties<M> {
    fn id(&self) -> MixinId {
        MixinId::for_targets(FREEZE, target_names(&self.targets))
    }

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let enforcing = self.enforce || ctx.is_update();
        let touches = |field: M::Field| enforcing && ctx.patch().touches(field);
        let before = ctx.previous().unwrap_or(&entity);

        let mut frozen: Vec<String> = Vec::new();
        let mut new_latches = Vec::new();

        for target in &self.targets {
            let field = target.field();
            match target {
                Target::Always(_) => {
                    if touches(field) {
                        frozen.push(field.as_str().to_string());
                    }
                }
                Target::When { guard, .. } => {
                    if entity.memo().contains(&latch_id(field)) {
                        if touches(field) {
                            frozen.push(field.as_str().to_string());
                        }
                    } else if guard(before) {
                        if touches(field) {
                            frozen.push(field.as_str().to_string());
                        }
                        new_latches.push(field);
                    } else if guard(&entity) {
                        new_latches.push(field);
                    }
                }
            }
        }

        if !frozen.is_empty() {
            return Err(MixinError::ImmutableProperty {
                model: M::NAME,
                fields: frozen,
            });
        }

        let mut entity = entity.install_once(self.id(), || Arc::new(self.enforcing()));
        for field in new_latches {
            entity = entity.install_once(latch_id(field), || Arc::new(Self::latch(field)));
        }
        Ok(entity)
    }
}
