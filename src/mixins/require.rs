// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::entity::{Entity, MixinId};
use crate::errors::MixinError;
use crate::model::{FieldName, Model};
use crate::traits::{Mixin, MutationContext};

use super::{target_names, Target};

/// Fails with [`MixinError::MissingProperty`] naming every required property
/// that is absent on the merged entity.
pub struct RequireProperties<M: Model> {
    targets: Vec<Target<M>>,
}

impl<M: Model> RequireProperties<M> {
    pub fn new(fields: impl IntoIterator<Item = M::Field>) -> Self {
        Self {
            targets: fields.into_iter().map(Target::Always).collect(),
        }
    }

    /// Require `field` only while `guard` holds.
    pub fn when<G>(mut self, field: M::Field, guard: G) -> Self
    where
        G: Fn(&Entity<M>) -> bool + Send + Sync + 'static,
    {
        self.targets.push(Target::when(field, guard));
        self
    }
}

impl<M: Model> Mixin<M> for RequireProperties<M> {
    fn id(&self) -> MixinId {
        MixinId::for_targets("requireProperties", target_names(&self.targets))
    }

    fn apply(&self, entity: Entity<M>, _ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let missing: Vec<String> = self
            .targets
            .iter()
            .filter(|target| target.holds(&entity) && !entity.is_present(target.field()))
            .map(|target| target.field().as_str().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(MixinError::MissingProperty {
                model: M::NAME,
                fields: missing,
            });
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Patch;
    use crate::models::user::{User, UserField};
    use serde_json::json;

    fn run(mixin: &RequireProperties<User>, entity: Entity<User>) -> Result<Entity<User>, MixinError> {
        let patch = entity.to_patch();
        mixin.apply(entity, &MutationContext::create(&patch))
    }

    #[test]
    fn test_reports_every_missing_name() {
        let mixin = RequireProperties::<User>::new([UserField::UserName, UserField::Password, UserField::FirstName]);
        let entity = Entity::new([(UserField::UserName, json!("ada")), (UserField::Password, json!(""))]);

        let error = run(&mixin, entity).unwrap_err();

        assert!(matches!(error, MixinError::MissingProperty { .. }));
        assert_eq!(error.fields(), vec!["password", "firstName"]);
    }

    #[test]
    fn test_absent_value_table() {
        let mixin = RequireProperties::<User>::new([UserField::Phone]);
        let cases = vec![
            (json!(null), false),
            (json!(""), false),
            (json!([]), false),
            (json!({}), false),
            (json!(0), true),
            (json!(false), true),
            (json!("555"), true),
        ];

        for (value, accepted) in cases {
            let entity = Entity::new([(UserField::Phone, value.clone())]);
            assert_eq!(run(&mixin, entity).is_ok(), accepted, "value {}", value);
        }
    }

    #[test]
    fn test_guarded_requirement() {
        let mixin = RequireProperties::<User>::new([]).when(UserField::Email, |e| e.is_present(UserField::CustomerId));

        let guest = Entity::new([(UserField::UserName, json!("ada"))]);
        assert!(run(&mixin, guest).is_ok());

        let customer = Entity::new([(UserField::CustomerId, json!("c-1"))]);
        let error = run(&mixin, customer).unwrap_err();
        assert_eq!(error.fields(), vec!["email"]);
    }

    #[test]
    fn test_id_names_targets() {
        let mixin = RequireProperties::<User>::new([UserField::UserName]).when(UserField::Email, |_| true);
        assert_eq!(mixin.id().as_str(), "requireProperties(userName,email)");
    }

    #[test]
    fn test_update_checks_merged_entity() {
        let mixin = RequireProperties::<User>::new([UserField::FirstName]);
        let previous = Entity::new([(UserField::FirstName, json!("Ada"))]);
        let patch = Patch::new().set(UserField::FirstName, "");
        let merged = previous.clone().merge(&patch);

        let result = mixin.apply(merged, &MutationContext::update(&previous, &patch));
        assert!(result.is_err());
    }
}
