// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::entity::{Entity, MixinId};
use crate::errors::{MixinError, Violation};
use crate::model::{FieldName, Model, Value};
use crate::traits::{Mixin, MutationContext};

type Predicate<M> = Arc<dyn Fn(Option<&Value>, &Value, &Entity<M>) -> bool + Send + Sync>;

/// Checks applied to one property.
///
/// `is_valid` receives the stored value (`None` on create), the new value and
/// the merged entity. Transition rules such as legal status changes live in
/// that predicate.
pub struct FieldSpec<M: Model> {
    field: M::Field,
    allowed: Option<Vec<Value>>,
    max: Option<f64>,
    is_valid: Option<Predicate<M>>,
}

impl<M: Model> FieldSpec<M> {
    pub fn new(field: M::Field) -> Self {
        Self {
            field,
            allowed: None,
            max: None,
            is_valid: None,
        }
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn is_valid<P>(mut self, predicate: P) -> Self
    where
        P: Fn(Option<&Value>, &Value, &Entity<M>) -> bool + Send + Sync + 'static,
    {
        self.is_valid = Some(Arc::new(predicate));
        self
    }

    fn check(&self, old: Option<&Value>, new: &Value, entity: &Entity<M>, violations: &mut Vec<Violation>) {
        let field = self.field.as_str().to_string();

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(new) {
                violations.push(Violation::NotAllowed {
                    field: field.clone(),
                    value: new.clone(),
                });
            }
        }

        if let (Some(max), Some(number)) = (self.max, new.as_f64()) {
            if number > max {
                violations.push(Violation::ExceedsMax {
                    field: field.clone(),
                    value: number,
                    max,
                });
            }
        }

        if let Some(predicate) = &self.is_valid {
            if !predicate(old, new, entity) {
                violations.push(Violation::Rejected { field });
            }
        }
    }
}

/// Validates the merged value of every configured, present property and
/// reports all violations of one run together.
pub struct ValidateProperties<M: Model> {
    specs: Vec<FieldSpec<M>>,
}

impl<M: Model> ValidateProperties<M> {
    pub fn new(specs: impl IntoIterator<Item = FieldSpec<M>>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
        }
    }
}

impl<M: Model> Mixin<M> for ValidateProperties<M> {
    fn id(&self) -> MixinId {
        MixinId::for_targets("validateProperties", self.specs.iter().map(|s| s.field.as_str()))
    }

    fn apply(&self, entity: Entity<M>, ctx: &MutationContext<'_, M>) -> Result<Entity<M>, MixinError> {
        let mut violations = Vec::new();

        for spec in &self.specs {
            if !entity.is_present(spec.field) {
                continue;
            }
            if let Some(new) = entity.get(spec.field) {
                let old = ctx.previous().and_then(|p| p.get(spec.field));
                spec.check(old, new, &entity, &mut violations);
            }
        }

        if !violations.is_empty() {
            return Err(MixinError::Validation {
                model: M::NAME,
                violations,
            });
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Patch;
    use crate::models::order::{Order, OrderField};
    use serde_json::json;

    fn total_spec() -> ValidateProperties<Order> {
        ValidateProperties::new([FieldSpec::<Order>::new(OrderField::OrderTotal).max(99999.99)])
    }

    fn create(mixin: &ValidateProperties<Order>, entity: Entity<Order>) -> Result<Entity<Order>, MixinError> {
        let patch = entity.to_patch();
        mixin.apply(entity, &MutationContext::create(&patch))
    }

    #[test]
    fn test_max_bound() {
        let cases = vec![
            (json!(99999.99), true),
            (json!(100000.00), false),
            (json!(0), true),
            (json!("not a number"), true),
        ];

        for (value, accepted) in cases {
            let entity = Entity::new([(OrderField::OrderTotal, value.clone())]);
            assert_eq!(create(&total_spec(), entity).is_ok(), accepted, "value {}", value);
        }
    }

    #[test]
    fn test_allowed_values() {
        let mixin = ValidateProperties::new([FieldSpec::<Order>::new(OrderField::OrderStatus).one_of(["PENDING", "APPROVED"])]);

        assert!(create(&mixin, Entity::new([(OrderField::OrderStatus, json!("PENDING"))])).is_ok());

        let error = create(&mixin, Entity::new([(OrderField::OrderStatus, json!("LOST"))])).unwrap_err();
        match error {
            MixinError::Validation { violations, .. } => {
                assert_eq!(
                    violations,
                    vec![Violation::NotAllowed {
                        field: "orderStatus".to_string(),
                        value: json!("LOST"),
                    }]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_predicate_sees_old_and_new() {
        let mixin = ValidateProperties::new([FieldSpec::<Order>::new(OrderField::OrderStatus)
            .is_valid(|old: Option<&Value>, new: &Value, _: &Entity<Order>| {
                !(old == Some(&json!("COMPLETE")) && new != "COMPLETE")
            })]);

        let previous = Entity::new([(OrderField::OrderStatus, json!("COMPLETE"))]);
        let patch = Patch::new().set(OrderField::OrderStatus, "PENDING");
        let merged = previous.clone().merge(&patch);

        let result = mixin.apply(merged, &MutationContext::update(&previous, &patch));
        assert!(result.is_err());
    }

    #[test]
    fn test_aggregates_violations_and_skips_absent() {
        let mixin = ValidateProperties::new([
            FieldSpec::<Order>::new(OrderField::OrderStatus).one_of(["PENDING"]),
            FieldSpec::<Order>::new(OrderField::OrderTotal).max(10.0).is_valid(|_, _, _| false),
            FieldSpec::<Order>::new(OrderField::TrackingId).is_valid(|_, _, _| false),
        ]);
        let entity = Entity::new([
            (OrderField::OrderStatus, json!("LOST")),
            (OrderField::OrderTotal, json!(11)),
        ]);

        let error = create(&mixin, entity).unwrap_err();

        assert_eq!(error.fields(), vec!["orderStatus", "orderTotal", "orderTotal"]);
    }
}
