// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reference models and the definition type tying a model's pieces together.

use serde_json::Map;

use crate::engine::PipelineRunner;
use crate::entity::{Entity, Patch};
use crate::errors::{MixinError, SerializerError};
use crate::factory::EntityFactory;
use crate::mixins::MixinList;
use crate::model::{Model, Value};
use crate::serializers::Serializers;

pub mod order;
pub mod user;

/// Everything needed to create, update and read entities of one model.
pub struct ModelDefinition<M: Model, F: EntityFactory<M>> {
    endpoint: &'static str,
    factory: F,
    runner: PipelineRunner<M>,
    serializers: Serializers<M>,
}

impl<M: Model, F: EntityFactory<M>> ModelDefinition<M, F> {
    pub fn new(endpoint: &'static str, factory: F, mixins: MixinList<M>, serializers: Serializers<M>) -> Self {
        Self {
            endpoint,
            factory,
            runner: PipelineRunner::new(mixins),
            serializers,
        }
    }

    pub fn name(&self) -> &'static str {
        M::NAME
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn runner(&self) -> &PipelineRunner<M> {
        &self.runner
    }

    /// Build a new entity from constructor arguments and run it through the
    /// mixins in create mode.
    pub fn create(&self, args: F::Args) -> Result<Entity<M>, MixinError> {
        self.runner.create(self.factory.build(args))
    }

    pub fn update(&self, current: &Entity<M>, patch: &Patch<M>) -> Result<Entity<M>, MixinError> {
        self.runner.update(current, patch)
    }

    /// External representation with deserialize hooks applied.
    pub fn read(&self, entity: &Entity<M>) -> Result<Map<String, Value>, SerializerError> {
        self.serializers.deserialize(entity)
    }
}
