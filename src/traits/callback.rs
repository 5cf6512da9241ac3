// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::entity::{Entity, Patch};
use crate::errors::CallbackError;
use crate::model::{Model, Value};

/// Handler the external orchestrator invokes when a port's produced event
/// arrives (or its timeout elapses).
///
/// Handlers never mutate the entity. They return a patch, which the caller
/// feeds back through the mixin pipeline as an ordinary update.
#[async_trait]
pub trait PortCallback<M: Model>: Send + Sync {
    /// Name the port configuration refers to.
    fn name(&self) -> &'static str;

    async fn handle(&self, entity: &Entity<M>, event: &Value) -> Result<Patch<M>, CallbackError>;
}
