// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::marker::PhantomData;
use std::sync::Arc;

use crate::entity::{Entity, MixinId, Patch};
use crate::errors::MixinError;
use crate::model::Model;

/// Predicate over the current entity state, evaluated at application time.
pub type Guard<M> = Arc<dyn Fn(&Entity<M>) -> bool + Send + Sync>;

/// Whether the pipeline is building a new entity or updating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Record intent: mixins may install memo entries but have no prior state
    /// to reject against.
    Create,
    /// Enforce: memoized mixins see the previous entity and the patch.
    Update,
}

/// What a mixin can see about the mutation in progress.
pub struct MutationContext<'a, M: Model> {
    mode: Mode,
    previous: Option<&'a Entity<M>>,
    patch: &'a Patch<M>,
}

impl<'a, M: Model> MutationContext<'a, M> {
    /// Creation context. `initial` holds every property the factory produced.
    pub fn create(initial: &'a Patch<M>) -> Self {
        Self {
            mode: Mode::Create,
            previous: None,
            patch: initial,
        }
    }

    pub fn update(previous: &'a Entity<M>, patch: &'a Patch<M>) -> Self {
        Self {
            mode: Mode::Update,
            previous: Some(previous),
            patch,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_update(&self) -> bool {
        self.mode == Mode::Update
    }

    /// The entity before this mutation. `None` on create.
    pub fn previous(&self) -> Option<&'a Entity<M>> {
        self.previous
    }

    /// The incoming changes (the initial properties on create).
    pub fn patch(&self) -> &'a Patch<M> {
        self.patch
    }

    /// Whether the patch supplies a value for `field` that differs from the
    /// stored one. Resubmitting a stored value is not a new value.
    pub fn supplies_new_value(&self, field: M::Field) -> bool {
        match self.patch.get(field) {
            None => false,
            Some(value) => self.previous.and_then(|p| p.get(field)) != Some(value),
        }
    }
}

/// A named, composable transformation of an entity.
///
/// Mixins that need per-entity state install a closure in the entity's memo
/// the first time they run (see [`Entity::install_once`]); in update mode the
/// pipeline invokes that closure instead of the mixin itself.
pub trait Mixin<M: Model>: Send + Sync {
    /// Stable identity, used as the memo key.
    fn id(&self) -> MixinId;

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError>;
}

/// Adapter turning a plain function into a [`Mixin`].
///
/// ```
/// use entity_mixins::entity::{Entity, MixinId};
/// use entity_mixins::models::user::{User, UserField};
/// use entity_mixins::traits::{FnMixin, Mixin, MutationContext};
///
/// let lowercase = FnMixin::<User, _>::new(MixinId::new("lowercaseUserName"), |entity, _ctx| {
///     let name = entity
///         .get(UserField::UserName)
///         .and_then(|v| v.as_str())
///         .map(str::to_lowercase);
///     Ok(match name {
///         Some(name) => entity.with(UserField::UserName, name),
///         None => entity,
///     })
/// });
///
/// let user = Entity::<User>::new([(UserField::UserName, "ADA".into())]);
/// let patch = user.to_patch();
/// let user = lowercase.apply(user, &MutationContext::create(&patch)).unwrap();
/// assert_eq!(user.get(UserField::UserName).unwrap(), "ada");
/// ```
pub struct FnMixin<M, F> {
    id: MixinId,
    f: F,
    _model: PhantomData<fn() -> M>,
}

impl<M, F> FnMixin<M, F>
where
    M: Model,
    F: Fn(Entity<M>, &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> + Send + Sync,
{
    pub fn new(id: MixinId, f: F) -> Self {
        Self {
            id,
            f,
            _model: PhantomData,
        }
    }
}

impl<M, F> Mixin<M> for FnMixin<M, F>
where
    M: Model,
    F: Fn(Entity<M>, &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> + Send + Sync,
{
    fn id(&self) -> MixinId {
        self.id.clone()
    }

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        (self.f)(entity, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{User, UserField};
    use serde_json::json;

    #[test]
    fn test_supplies_new_value() {
        let previous: Entity<User> = Entity::new([
            (UserField::Password, json!("digest")),
            (UserField::Phone, json!("555")),
        ]);
        let patch = Patch::new()
            .set(UserField::Password, "digest")
            .set(UserField::Phone, "556")
            .set(UserField::Email, "a@b.c");
        let ctx = MutationContext::update(&previous, &patch);

        assert!(!ctx.supplies_new_value(UserField::Password));
        assert!(ctx.supplies_new_value(UserField::Phone));
        assert!(ctx.supplies_new_value(UserField::Email));
        assert!(!ctx.supplies_new_value(UserField::FirstName));
    }

    #[test]
    fn test_create_context_has_no_previous() {
        let patch: Patch<User> = Patch::new().set(UserField::UserName, "ada");
        let ctx = MutationContext::create(&patch);
        assert_eq!(ctx.mode(), Mode::Create);
        assert!(ctx.previous().is_none());
        assert!(ctx.supplies_new_value(UserField::UserName));
    }
}
