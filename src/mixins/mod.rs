// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Property-level mixins and their composition.
//!
//! Each mixin is configured once per model and applied to every create and
//! update of that model. A model's list is normally composed in the order
//! require -> freeze -> derive -> validate -> encrypt/hash, so presence and
//! mutability are checked before dependent fields are recomputed, and the final
//! state is validated before any irreversible transform runs.
//!
//! ```
//! use std::sync::Arc;
//! use entity_mixins::crypto::Sha256Hasher;
//! use entity_mixins::engine::PipelineRunner;
//! use entity_mixins::entity::Patch;
//! use entity_mixins::mixins::{FreezeProperties, MixinList, RequireProperties, TransformProperties};
//! use entity_mixins::models::user::{User, UserField};
//!
//! let mixins = MixinList::<User>::new()
//!     .with(RequireProperties::new([UserField::UserName, UserField::Password]))
//!     .with(FreezeProperties::new([UserField::UserName]))
//!     .with(TransformProperties::hash([UserField::Password], Arc::new(Sha256Hasher::new("salt"))));
//! let runner = PipelineRunner::new(mixins);
//!
//! let user = runner
//!     .create(Patch::new().set(UserField::UserName, "ada").set(UserField::Password, "pw"))
//!     .unwrap();
//! assert_ne!(user.get(UserField::Password).unwrap(), "pw");
//!
//! let rename = Patch::new().set(UserField::UserName, "grace");
//! assert!(runner.update(&user, &rename).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::model::{FieldName, Model};
use crate::traits::Guard;

mod derive;
mod freeze;
mod list;
mod require;
mod transform;
mod validate;

pub use derive::DeriveProperties;
pub use freeze::FreezeProperties;
pub use list::{default_mixins, MixinList, PERSONAL_INFO};
pub use require::RequireProperties;
pub use transform::TransformProperties;
pub use validate::{FieldSpec, ValidateProperties};

/// A property a mixin acts on, optionally behind a guard.
///
/// `When` guards are evaluated against the entity at application time, never
/// at configuration time.
pub enum Target<M: Model> {
    Always(M::Field),
    When { field: M::Field, guard: Guard<M> },
}

impl<M: Model> Target<M> {
    pub fn when<G>(field: M::Field, guard: G) -> Self
    where
        G: Fn(&Entity<M>) -> bool + Send + Sync + 'static,
    {
        Target::When {
            field,
            guard: Arc::new(guard),
        }
    }

    pub fn field(&self) -> M::Field {
        match self {
            Target::Always(field) | Target::When { field, .. } => *field,
        }
    }

    /// Whether the target is in force for `entity`.
    pub fn holds(&self, entity: &Entity<M>) -> bool {
        match self {
            Target::Always(_) => true,
            Target::When { guard, .. } => guard(entity),
        }
    }
}

impl<M: Model> Clone for Target<M> {
    fn clone(&self) -> Self {
        match self {
            Target::Always(field) => Target::Always(*field),
            Target::When { field, guard } => Target::When {
                field: *field,
                guard: Arc::clone(guard),
            },
        }
    }
}

impl<M: Model> fmt::Debug for Target<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Always(field) => write!(f, "Always({})", field),
            Target::When { field, .. } => write!(f, "When({})", field),
        }
    }
}

pub(crate) fn target_names<M: Model>(targets: &[Target<M>]) -> impl Iterator<Item = &'static str> + '_ {
    targets.iter().map(|t| t.field().as_str())
}
