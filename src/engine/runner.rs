// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Applies a model's mixin list to an entity.
//!
//! The runner is synchronous and performs no I/O of its own. Callers must
//! serialize updates to the same entity; distinct entities can be run
//! concurrently since all per-entity state lives on the entity value.

use std::sync::Arc;
use std::time::Instant;

use crate::entity::{Entity, Patch};
use crate::errors::MixinError;
use crate::mixins::MixinList;
use crate::model::Model;
use crate::observability::messages::engine::{PipelineCompleted, PipelineFailed, PipelineStarted};
use crate::observability::messages::mixin::MixinApplied;
use crate::observability::messages::StructuredLog;
use crate::traits::{Mode, MutationContext};

pub struct PipelineRunner<M: Model> {
    mixins: MixinList<M>,
}

impl<M: Model> PipelineRunner<M> {
    pub fn new(mixins: MixinList<M>) -> Self {
        Self { mixins }
    }

    pub fn mixins(&self) -> &MixinList<M> {
        &self.mixins
    }

    /// Build a new entity from factory output.
    pub fn create(&self, properties: Patch<M>) -> Result<Entity<M>, MixinError> {
        let entity = Entity::new(properties.iter().map(|(field, value)| (field, value.clone())));
        self.apply(entity, &MutationContext::create(&properties))
    }

    /// Run the list against `{...current, ...patch}`.
    ///
    /// `current` is left untouched whether or not the update succeeds.
    pub fn update(&self, current: &Entity<M>, patch: &Patch<M>) -> Result<Entity<M>, MixinError> {
        let merged = current.clone().merge(patch);
        self.apply(merged, &MutationContext::update(current, patch))
    }

    /// Run every mixin left to right, feeding each one's output to the next.
    ///
    /// In update mode a mixin whose id has an entry in the entity memo is
    /// replaced by that entry. The first failure aborts the run and the
    /// partially transformed entity is dropped.
    pub fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let mode = mode_name(ctx.mode());
        let start_msg = PipelineStarted {
            model: M::NAME,
            mode,
            mixin_count: self.mixins.len(),
        };

        let span = start_msg.span("pipeline_run");
        let _guard = span.enter();
        start_msg.log();

        let start_time = Instant::now();
        let mut entity = entity;

        for mixin in self.mixins.iter() {
            let id = mixin.id();
            let memoized = match ctx.mode() {
                Mode::Update => entity.memo().get(&id).cloned(),
                Mode::Create => None,
            };
            let from_memo = memoized.is_some();
            let active = memoized.unwrap_or_else(|| Arc::clone(mixin));

            entity = match active.apply(entity, ctx) {
                Ok(next) => next,
                Err(error) => {
                    PipelineFailed {
                        model: M::NAME,
                        mode,
                        mixin_id: id.as_str(),
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
            };

            MixinApplied {
                model: M::NAME,
                mixin_id: id.as_str(),
                from_memo,
            }
            .log();
        }

        PipelineCompleted {
            model: M::NAME,
            mode,
            memo_size: entity.memo().len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(entity)
    }
}

impl<M: Model> Clone for PipelineRunner<M> {
    fn clone(&self) -> Self {
        Self {
            mixins: self.mixins.clone(),
        }
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Create => "create",
        Mode::Update => "update",
    }
}
