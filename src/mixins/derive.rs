// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::entity::{Entity, MixinId, Patch};
use crate::errors::MixinError;
use crate::model::{FieldName, Model};
use crate::traits::{Mixin, Mode, MutationContext};

type Derivation<M> = Arc<dyn Fn(&Entity<M>) -> Patch<M> + Send + Sync>;

struct Rule<M: Model> {
    trigger: M::Field,
    derive: Derivation<M>,
}

/// Recomputes dependent properties when a trigger property changes.
///
/// On create a rule fires when its trigger is present; on update when the
/// patch touches the trigger. The derived patch is merged into the entity.
pub struct DeriveProperties<M: Model> {
    rules: Vec<Rule<M>>,
}

impl<M: Model> DeriveProperties<M> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn on<D>(mut self, trigger: M::Field, derive: D) -> Self
    where
        D: Fn(&Entity<M>) -> Patch<M> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            trigger,
            derive: Arc::new(derive),
        });
        self
    }
}

impl<M: Model> Default for DeriveProperties<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Mixin<M> for DeriveProperties<M> {
    fn id(&self) -> MixinId {
        MixinId::for_targets("updateProperties", self.rules.iter().map(|r| r.trigger.as_str()))
    }

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let mut entity = entity;
        for rule in &self.rules {
            let fire = match ctx.mode() {
                Mode::Create => entity.is_present(rule.trigger),
                Mode::Update => ctx.patch().touches(rule.trigger),
            };
            if fire {
                let derived = (rule.derive)(&entity);
                entity = entity.merge(&derived);
            }
        }
        Ok(entity)
    }
}
