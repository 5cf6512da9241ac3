// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Entity factories and the dependencies they are built with.

use std::sync::Arc;

use uuid::Uuid;

use crate::crypto::CryptoSuite;
use crate::entity::Patch;
use crate::model::Model;

/// Source of new entity identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Collaborators injected into every model definition.
#[derive(Clone)]
pub struct Dependencies {
    pub ids: Arc<dyn IdGenerator>,
    pub crypto: CryptoSuite,
}

impl Dependencies {
    pub fn new(ids: Arc<dyn IdGenerator>, crypto: CryptoSuite) -> Self {
        Self { ids, crypto }
    }
}

/// Turns constructor arguments into the initial properties of a new entity.
///
/// Factory output is raw: it becomes a valid entity only after the model's
/// mixin list has run over it in create mode.
pub trait EntityFactory<M: Model>: Send + Sync {
    type Args;

    fn build(&self, args: Self::Args) -> Patch<M>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_produces_distinct_ids() {
        let ids = UuidGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
