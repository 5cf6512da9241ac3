// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::memo::{MixinId, MixinMemo};
use super::patch::Patch;
use super::wire::{deserialize_fields, serialize_fields};
use crate::model::{is_absent, Model, Value};
use crate::observability::messages::{mixin::MemoInstalled, StructuredLog};
use crate::traits::Mixin;

/// A domain entity: a property map over the model's fields plus the mixin memo.
///
/// Entities are never mutated in place. Every operation that changes a
/// property consumes the entity and returns a new one, so a caller holding the
/// previous value always sees it unchanged.
///
/// ```
/// use entity_mixins::entity::{Entity, Patch};
/// use entity_mixins::models::user::{User, UserField};
/// use serde_json::json;
///
/// let user: Entity<User> = Entity::new([(UserField::UserName, json!("ada"))]);
/// let patch = Patch::new().set(UserField::FirstName, "Ada");
/// let updated = user.clone().merge(&patch);
///
/// assert!(user.get(UserField::FirstName).is_none());
/// assert_eq!(updated.get(UserField::FirstName), Some(&json!("Ada")));
/// ```
pub struct Entity<M: Model> {
    properties: BTreeMap<M::Field, Value>,
    memo: MixinMemo<M>,
}

impl<M: Model> Entity<M> {
    pub fn new<I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (M::Field, Value)>,
    {
        Self {
            properties: properties.into_iter().collect(),
            memo: MixinMemo::new(),
        }
    }

    pub fn get(&self, field: M::Field) -> Option<&Value> {
        self.properties.get(&field)
    }

    /// Whether `field` holds a non-absent value.
    pub fn is_present(&self, field: M::Field) -> bool {
        !is_absent(self.get(field))
    }

    pub fn properties(&self) -> impl Iterator<Item = (M::Field, &Value)> {
        self.properties.iter().map(|(field, value)| (*field, value))
    }

    pub fn memo(&self) -> &MixinMemo<M> {
        &self.memo
    }

    /// A new entity with `field` set to `value`.
    pub fn with(mut self, field: M::Field, value: impl Into<Value>) -> Self {
        self.properties.insert(field, value.into());
        self
    }

    /// `{...self, ...patch}`; the memo is carried over.
    pub fn merge(mut self, patch: &Patch<M>) -> Self {
        for (field, value) in patch.iter() {
            self.properties.insert(field, value.clone());
        }
        self
    }

    /// The entity's current properties as a patch.
    pub fn to_patch(&self) -> Patch<M> {
        self.properties
            .iter()
            .map(|(field, value)| (*field, value.clone()))
            .collect()
    }

    /// Install a mixin closure under `id` unless one is already present.
    ///
    /// `build` runs at most once per id for this entity's lineage. When the id
    /// is already taken the entity is returned unchanged.
    pub fn install_once<F>(mut self, id: MixinId, build: F) -> Self
    where
        F: FnOnce() -> Arc<dyn Mixin<M>>,
    {
        if self.memo.contains(&id) {
            return self;
        }
        MemoInstalled {
            model: M::NAME,
            mixin_id: id.as_str(),
        }
        .log();
        self.memo.insert_once(id, build);
        self
    }
}

impl<M: Model> Clone for Entity<M> {
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
            memo: self.memo.clone(),
        }
    }
}

// Equality is over domain data only.
impl<M: Model> PartialEq for Entity<M> {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
    }
}

impl<M: Model> fmt::Debug for Entity<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("model", &M::NAME)
            .field("fields", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<M: Model> Serialize for Entity<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_fields(&self.properties, serializer)
    }
}

impl<'de, M: Model> Deserialize<'de> for Entity<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            properties: deserialize_fields(deserializer)?,
            memo: MixinMemo::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{User, UserField};
    use crate::traits::FnMixin;
    use serde_json::json;

    fn marker(name: &'static str) -> Arc<dyn Mixin<User>> {
        Arc::new(FnMixin::<User, _>::new(MixinId::new(name), |entity, _ctx| Ok(entity)))
    }

    #[test]
    fn test_merge_produces_new_value() {
        let original: Entity<User> = Entity::new([
            (UserField::UserName, json!("ada")),
            (UserField::FirstName, json!("Ada")),
        ]);
        let patch = Patch::new().set(UserField::FirstName, "Augusta");

        let merged = original.clone().merge(&patch);

        assert_eq!(original.get(UserField::FirstName), Some(&json!("Ada")));
        assert_eq!(merged.get(UserField::FirstName), Some(&json!("Augusta")));
        assert_eq!(merged.get(UserField::UserName), Some(&json!("ada")));
    }

    #[test]
    fn test_install_once_builds_only_first_time() {
        let mut builds = 0;
        let entity: Entity<User> = Entity::new([]);

        let entity = entity.install_once(MixinId::new("m"), || {
            builds += 1;
            marker("first")
        });
        let entity = entity.install_once(MixinId::new("m"), || {
            builds += 1;
            marker("second")
        });

        assert_eq!(builds, 1);
        assert_eq!(entity.memo().len(), 1);
        let installed = entity.memo().get(&MixinId::new("m")).unwrap();
        assert_eq!(installed.id(), MixinId::new("first"));
    }

    #[test]
    fn test_memo_excluded_from_equality_and_serialization() {
        let plain: Entity<User> = Entity::new([(UserField::UserName, json!("ada"))]);
        let memoized = plain.clone().install_once(MixinId::new("m"), || marker("m"));

        assert_eq!(plain, memoized);
        assert_eq!(
            serde_json::to_value(&memoized).unwrap(),
            json!({"userName": "ada"})
        );
        assert!(!format!("{:?}", memoized).contains("MixinMemo"));
    }

    #[test]
    fn test_memo_travels_with_clone_and_merge() {
        let entity: Entity<User> = Entity::new([]).install_once(MixinId::new("m"), || marker("m"));
        let merged = entity.clone().merge(&Patch::new().set(UserField::Phone, "555"));
        assert!(merged.memo().contains(&MixinId::new("m")));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<Entity<User>, _> =
            serde_json::from_value(json!({"userName": "ada", "shoeSize": 9}));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("unknown field 'shoeSize'"));
    }

    #[test]
    fn test_presence() {
        let entity: Entity<User> = Entity::new([
            (UserField::UserName, json!("ada")),
            (UserField::Phone, json!("")),
        ]);
        assert!(entity.is_present(UserField::UserName));
        assert!(!entity.is_present(UserField::Phone));
        assert!(!entity.is_present(UserField::Email));
    }
}
