use std::sync::Arc;

use serde_json::json;

use crate::crypto::{Cipher, CryptoSuite, Hasher, MockCipher, MockHasher};
use crate::entity::{Entity, Patch};
use crate::errors::{CryptoError, MixinError, Violation};
use crate::factory::{Dependencies, MockIdGenerator};
use crate::models::order::{self, NewOrder, Order, OrderCallback, OrderField};
use crate::models::user::{self, NewUser, UserField};
use crate::traits::{MutationContext, PortCallback};

/// End-to-end pipeline scenarios over the reference models
#[cfg(test)]
mod tests {
    use super::*;

    fn prefix_cipher() -> MockCipher {
        let mut cipher = MockCipher::new();
        cipher.expect_encrypt().returning(|v| Ok(format!("enc:{}", v)));
        cipher.expect_decrypt().returning(|v| {
            v.strip_prefix("enc:")
                .map(str::to_string)
                .ok_or_else(|| CryptoError::Decrypt(format!("not ciphertext: {}", v)))
        });
        cipher
    }

    fn deps(cipher: MockCipher, hasher: MockHasher) -> Dependencies {
        let mut ids = MockIdGenerator::new();
        ids.expect_next_id().returning(|| "A-1".to_string());
        let cipher: Arc<dyn Cipher> = Arc::new(cipher);
        let hasher: Arc<dyn Hasher> = Arc::new(hasher);
        Dependencies::new(Arc::new(ids), CryptoSuite::new(cipher, hasher))
    }

    fn order_deps() -> Dependencies {
        deps(prefix_cipher(), MockHasher::new())
    }

    fn new_order() -> NewOrder {
        NewOrder {
            customer_info: json!({"customerId": "c-9"}),
            order_items: json!([
                {"itemId": "widget", "price": 10.0, "qty": 2},
                {"itemId": "gadget", "price": 5.5, "qty": 1},
            ]),
            credit_card_number: json!("4111111111111111"),
            shipping_address: json!("1 Main St"),
            billing_address: json!("1 Main St"),
            last_name: json!("Lovelace"),
            email: json!("ada@example.com"),
        }
    }

    fn total(entity: &Entity<Order>) -> Option<f64> {
        entity.get(OrderField::OrderTotal).and_then(|v| v.as_f64())
    }

    #[test]
    fn test_create_without_credit_card_fails() {
        let orders = order::definition(&order_deps());

        let result = orders.create(NewOrder {
            credit_card_number: json!(null),
            ..new_order()
        });

        match result {
            Err(MixinError::MissingProperty { model, fields }) => {
                assert_eq!(model, "order");
                assert_eq!(fields, vec!["creditCardNumber"]);
            }
            other => panic!("expected MissingProperty, got {:?}", other),
        }
    }

    #[test]
    fn test_create_then_update_items_recomputes_total() {
        let orders = order::definition(&order_deps());

        let created = orders.create(new_order()).unwrap();
        assert_eq!(created.get(OrderField::OrderNo), Some(&json!("A-1")));
        assert_eq!(created.get(OrderField::OrderStatus), Some(&json!("PENDING")));
        assert_eq!(total(&created), Some(25.5));
        assert_eq!(created.get(OrderField::CreditCardNumber), Some(&json!("enc:4111111111111111")));
        assert_eq!(created.get(OrderField::LastName), Some(&json!("enc:Lovelace")));

        let patch = Patch::new().set(OrderField::OrderItems, json!([{"itemId": "widget", "price": 10.0, "qty": 3}]));
        let updated = orders.update(&created, &patch).unwrap();

        assert_eq!(total(&updated), Some(30.0));
        assert_eq!(updated.get(OrderField::CreditCardNumber), Some(&json!("enc:4111111111111111")));
    }

    #[test]
    fn test_unknown_status_fails_validation() {
        let orders = order::definition(&order_deps());
        let created = orders.create(new_order()).unwrap();

        let result = orders.update(&created, &Patch::new().set(OrderField::OrderStatus, "LOST"));

        match result {
            Err(MixinError::Validation { violations, .. }) => {
                assert!(violations.contains(&Violation::NotAllowed {
                    field: "orderStatus".to_string(),
                    value: json!("LOST"),
                }));
                assert!(violations.iter().all(|v| v.field() == "orderStatus"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_order_number_is_frozen() {
        let orders = order::definition(&order_deps());
        let created = orders.create(new_order()).unwrap();

        let result = orders.update(&created, &Patch::new().set(OrderField::OrderNo, "B-2"));

        match result {
            Err(MixinError::ImmutableProperty { fields, .. }) => assert_eq!(fields, vec!["orderNo"]),
            other => panic!("expected ImmutableProperty, got {:?}", other),
        }
    }

    #[test]
    fn test_approval_freezes_purchase_details() {
        let orders = order::definition(&order_deps());
        let created = orders.create(new_order()).unwrap();

        // still pending: items may change
        let pending = orders
            .update(&created, &Patch::new().set(OrderField::OrderItems, json!([{"price": 1.0, "qty": 1}])))
            .unwrap();

        let approved = orders
            .update(&pending, &Patch::new().set(OrderField::OrderStatus, "APPROVED"))
            .unwrap();

        let result = orders.update(
            &approved,
            &Patch::new()
                .set(OrderField::OrderItems, json!([{"price": 2.0, "qty": 1}]))
                .set(OrderField::ShippingAddress, "2 Side St"),
        );
        match result {
            Err(MixinError::ImmutableProperty { fields, .. }) => {
                assert_eq!(fields, vec!["orderItems", "shippingAddress"]);
            }
            other => panic!("expected ImmutableProperty, got {:?}", other),
        }

        // the freeze outlives the approval
        let canceled = orders
            .update(&approved, &Patch::new().set(OrderField::OrderStatus, "CANCELED"))
            .unwrap();
        let result = orders.update(&canceled, &Patch::new().set(OrderField::BillingAddress, "3 Other St"));
        assert!(matches!(result, Err(MixinError::ImmutableProperty { .. })));
    }

    #[test]
    fn test_total_boundary() {
        let orders = order::definition(&order_deps());

        let at_max = orders.create(NewOrder {
            order_items: json!([{"price": 99999.99, "qty": 1}]),
            ..new_order()
        });
        assert_eq!(at_max.map(|o| total(&o)).ok().flatten(), Some(99999.99));

        let over_max = orders.create(NewOrder {
            order_items: json!([{"price": 100000.00, "qty": 1}]),
            ..new_order()
        });
        match over_max {
            Err(MixinError::Validation { violations, .. }) => {
                assert_eq!(
                    violations,
                    vec![Violation::ExceedsMax {
                        field: "orderTotal".to_string(),
                        value: 100000.0,
                        max: 99999.99,
                    }]
                );
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_update_leaves_original_intact() {
        let orders = order::definition(&order_deps());
        let created = orders.create(new_order()).unwrap();
        let snapshot = created.clone();
        let memo_size = created.memo().len();

        let result = orders.update(
            &created,
            &Patch::new()
                .set(OrderField::OrderItems, json!([{"price": 1.0, "qty": 1}]))
                .set(OrderField::OrderNo, "B-2"),
        );

        assert!(result.is_err());
        assert_eq!(created, snapshot);
        assert_eq!(created.memo().len(), memo_size);
    }

    #[tokio::test]
    async fn test_workflow_callbacks_drive_order_to_completion() {
        let orders = order::definition(&order_deps());
        let mut current = orders.create(new_order()).unwrap();

        let steps = vec![
            (OrderCallback::PaymentAuthorized, json!({"authorization": "AUTH-7"})),
            (OrderCallback::OrderFilled, json!({})),
            (OrderCallback::OrderShipped, json!({"trackingId": "TRK-3"})),
            (OrderCallback::DeliveryVerified, json!({"proofOfDelivery": "signed"})),
            (OrderCallback::PaymentCompleted, json!({})),
        ];
        for (callback, event) in steps {
            let patch = callback.handle(&current, &event).await.unwrap();
            current = orders.update(&current, &patch).unwrap();
        }

        assert_eq!(current.get(OrderField::OrderStatus), Some(&json!("COMPLETE")));
        assert_eq!(current.get(OrderField::TrackingId), Some(&json!("TRK-3")));

        let reopen = orders.update(&current, &Patch::new().set(OrderField::OrderStatus, "CANCELED"));
        assert!(matches!(reopen, Err(MixinError::ImmutableProperty { .. })));
    }

    #[tokio::test]
    async fn test_completion_requires_proof_of_delivery() {
        let orders = order::definition(&order_deps());
        let created = orders.create(new_order()).unwrap();
        let shipping = orders
            .update(&created, &Patch::new().set(OrderField::OrderStatus, "APPROVED"))
            .and_then(|o| orders.update(&o, &Patch::new().set(OrderField::OrderStatus, "SHIPPING")))
            .unwrap();

        let patch = OrderCallback::PaymentCompleted
            .handle(&shipping, &json!({}))
            .await
            .unwrap();
        let result = orders.update(&shipping, &patch);

        match result {
            Err(MixinError::MissingProperty { fields, .. }) => assert_eq!(fields, vec!["proofOfDelivery"]),
            other => panic!("expected MissingProperty, got {:?}", other),
        }
    }

    #[test]
    fn test_user_side_effects_run_once() {
        let mut hasher = MockHasher::new();
        hasher.expect_hash().times(2).returning(|v| format!("h:{}", v));
        let mut cipher = MockCipher::new();
        cipher.expect_encrypt().times(3).returning(|v| Ok(format!("enc:{}", v)));
        cipher
            .expect_decrypt()
            .returning(|v| Ok(v.trim_start_matches("enc:").to_string()));
        let users = user::definition(&deps(cipher, hasher));

        let created = users
            .create(NewUser {
                user_name: json!("ada"),
                password: json!("pw"),
                first_name: json!("Ada"),
                last_name: json!("Lovelace"),
                phone: json!("555-0100"),
                email: json!("ada@example.com"),
                ..NewUser::default()
            })
            .unwrap();
        assert_eq!(created.get(UserField::Password), Some(&json!("h:pw")));

        let renamed = users
            .update(&created, &Patch::new().set(UserField::FirstName, "Augusta"))
            .unwrap();
        assert_eq!(renamed.get(UserField::Password), Some(&json!("h:pw")));
        assert_eq!(renamed.get(UserField::Phone), Some(&json!("enc:555-0100")));

        let resubmitted = users
            .update(&renamed, &Patch::new().set(UserField::Password, "h:pw"))
            .unwrap();
        assert_eq!(resubmitted.get(UserField::Password), Some(&json!("h:pw")));

        let changed = users
            .update(&resubmitted, &Patch::new().set(UserField::Password, "new"))
            .unwrap();
        assert_eq!(changed.get(UserField::Password), Some(&json!("h:new")));

        let read = users.read(&changed).unwrap();
        assert_eq!(read.get("lastName"), Some(&json!("Lovelace")));
        assert_eq!(read.get("firstName"), Some(&json!("Augusta")));
    }

    fn user_deps() -> Dependencies {
        let mut hasher = MockHasher::new();
        hasher.expect_hash().returning(|v| format!("h:{}", v));
        deps(prefix_cipher(), hasher)
    }

    fn new_user() -> NewUser {
        NewUser {
            user_name: json!("ada"),
            password: json!("pw"),
            first_name: json!("Ada"),
            last_name: json!("Lovelace"),
            phone: json!("555-0100"),
            email: json!("ada@example.com"),
            ..NewUser::default()
        }
    }

    #[test]
    fn test_reapplying_update_with_same_context_is_stable() {
        let users = user::definition(&user_deps());
        let created = users.create(new_user()).unwrap();
        let patch = Patch::new()
            .set(UserField::Password, "new")
            .set(UserField::Phone, "556");
        let ctx = MutationContext::update(&created, &patch);

        let once = users.runner().apply(created.clone().merge(&patch), &ctx).unwrap();
        let twice = users.runner().apply(once.clone(), &ctx).unwrap();

        assert_eq!(once.get(UserField::Password), Some(&json!("h:new")));
        assert_eq!(once.get(UserField::Phone), Some(&json!("enc:556")));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_reapplying_create_with_same_context_is_stable() {
        let users = user::definition(&user_deps());
        let created = users.create(new_user()).unwrap();
        let initial = Patch::new()
            .set(UserField::UserName, "ada")
            .set(UserField::Password, "pw")
            .set(UserField::FirstName, "Ada")
            .set(UserField::Phone, "555-0100");
        let ctx = MutationContext::create(&initial);

        let twice = users.runner().apply(created.clone(), &ctx).unwrap();

        assert_eq!(created.get(UserField::Password), Some(&json!("h:pw")));
        assert_eq!(twice.get(UserField::Password), Some(&json!("h:pw")));
        assert_eq!(twice.get(UserField::Phone), Some(&json!("enc:555-0100")));
        assert_eq!(twice, created);
    }

    #[test]
    fn test_repeated_plaintext_update_is_stable() {
        let users = user::definition(&user_deps());
        let created = users.create(new_user()).unwrap();
        let patch = Patch::new()
            .set(UserField::Password, "new")
            .set(UserField::Phone, "556");

        let first = users.update(&created, &patch).unwrap();
        let second = users.update(&first, &patch).unwrap();

        assert_eq!(second.get(UserField::Password), Some(&json!("h:new")));
        assert_eq!(second.get(UserField::Phone), Some(&json!("enc:556")));
        assert_eq!(second, first);
    }
}
