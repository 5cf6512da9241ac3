// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The order reference model.
//!
//! An order moves `PENDING -> APPROVED -> SHIPPING -> COMPLETE` and may be
//! `CANCELED` from any state before completion. Approval freezes the
//! purchase details (items, card, addresses); completion freezes the status
//! and requires a proof of delivery.
//!
//! Port callbacks translate workflow events into patches. They never touch
//! frozen properties, so the patches they return pass the order's mixins as
//! long as the workflow advances along legal transitions.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::CallbackRegistry;
use crate::crypto::CryptoSuite;
use crate::entity::{Entity, Patch};
use crate::errors::CallbackError;
use crate::factory::{Dependencies, EntityFactory, IdGenerator};
use crate::mixins::{
    default_mixins, DeriveProperties, FieldSpec, FreezeProperties, MixinList, RequireProperties,
    TransformProperties, ValidateProperties,
};
use crate::model::{is_absent, Model, Value};
use crate::models::ModelDefinition;
use crate::serializers::{FieldHook, Serializers};
use crate::traits::PortCallback;

crate::model_fields! {
    pub enum OrderField {
        OrderNo => "orderNo",
        CustomerInfo => "customerInfo",
        OrderItems => "orderItems",
        OrderTotal => "orderTotal",
        OrderStatus => "orderStatus",
        CreditCardNumber => "creditCardNumber",
        ShippingAddress => "shippingAddress",
        BillingAddress => "billingAddress",
        ProofOfDelivery => "proofOfDelivery",
        PaymentAuthorization => "paymentAuthorization",
        TrackingId => "trackingId",
        LastName => "lastName",
        Email => "email",
    }
}

pub struct Order;

impl Model for Order {
    type Field = OrderField;
    const NAME: &'static str = "order";
}

/// Largest total an order may carry.
pub const MAX_ORDER_TOTAL: f64 = 99999.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Approved,
    Shipping,
    Complete,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Shipping,
        OrderStatus::Complete,
        OrderStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Shipping => "SHIPPING",
            OrderStatus::Complete => "COMPLETE",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    pub fn parse(value: &Value) -> Option<Self> {
        let name = value.as_str()?;
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Legal edges of the status graph. Staying put is always allowed.
    pub fn can_become(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Approved)
                    | (Pending, Canceled)
                    | (Approved, Shipping)
                    | (Approved, Canceled)
                    | (Shipping, Complete)
                    | (Shipping, Canceled)
            )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for Value {
    fn from(status: OrderStatus) -> Self {
        Value::String(status.as_str().to_string())
    }
}

fn status_of(entity: &Entity<Order>) -> Option<OrderStatus> {
    entity.get(OrderField::OrderStatus).and_then(OrderStatus::parse)
}

/// New orders start `PENDING`; afterwards only legal transitions pass.
pub fn status_change_valid(old: Option<&Value>, new: &Value, _: &Entity<Order>) -> bool {
    let Some(next) = OrderStatus::parse(new) else {
        return false;
    };
    match old.and_then(OrderStatus::parse) {
        Some(current) => current.can_become(next),
        None => next == OrderStatus::Pending,
    }
}

pub fn order_total_valid(_: Option<&Value>, new: &Value, _: &Entity<Order>) -> bool {
    new.as_f64().map_or(false, |total| total >= 0.0)
}

/// Guard: the order has been approved and not yet canceled.
pub fn freeze_on_approval(entity: &Entity<Order>) -> bool {
    matches!(
        status_of(entity),
        Some(OrderStatus::Approved | OrderStatus::Shipping | OrderStatus::Complete)
    )
}

/// Guard: the order is complete.
pub fn freeze_on_completion(entity: &Entity<Order>) -> bool {
    status_of(entity) == Some(OrderStatus::Complete)
}

/// Guard: properties only needed once the order is complete.
pub fn required_for_completion(entity: &Entity<Order>) -> bool {
    freeze_on_completion(entity)
}

/// `orderTotal` as the sum of `price * qty` over the order items, rounded to
/// cents. Items missing either number count as zero.
pub fn recalc_total(entity: &Entity<Order>) -> Patch<Order> {
    let total: f64 = entity
        .get(OrderField::OrderItems)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let price = item.get("price").and_then(Value::as_f64).unwrap_or(0.0);
                    let qty = item.get("qty").and_then(Value::as_f64).unwrap_or(0.0);
                    price * qty
                })
                .sum()
        })
        .unwrap_or(0.0);

    Patch::new().set(OrderField::OrderTotal, (total * 100.0).round() / 100.0)
}

pub fn order_mixins(crypto: &CryptoSuite) -> MixinList<Order> {
    MixinList::new()
        .with(
            RequireProperties::<Order>::new([
                OrderField::CustomerInfo,
                OrderField::OrderItems,
                OrderField::CreditCardNumber,
                OrderField::ShippingAddress,
                OrderField::BillingAddress,
            ])
            .when(OrderField::ProofOfDelivery, required_for_completion),
        )
        .with(
            FreezeProperties::<Order>::new([OrderField::OrderNo, OrderField::CustomerInfo])
                .when(OrderField::OrderItems, freeze_on_approval)
                .when(OrderField::CreditCardNumber, freeze_on_approval)
                .when(OrderField::ShippingAddress, freeze_on_approval)
                .when(OrderField::BillingAddress, freeze_on_approval)
                .when(OrderField::OrderStatus, freeze_on_completion),
        )
        .with(DeriveProperties::<Order>::new().on(OrderField::OrderItems, recalc_total))
        .with(ValidateProperties::new([
            FieldSpec::<Order>::new(OrderField::OrderStatus)
                .one_of(OrderStatus::ALL)
                .is_valid(status_change_valid),
            FieldSpec::<Order>::new(OrderField::OrderTotal)
                .max(MAX_ORDER_TOTAL)
                .is_valid(order_total_valid),
        ]))
        .with(TransformProperties::<Order>::encrypt(
            [OrderField::CreditCardNumber],
            Arc::clone(&crypto.cipher),
        ))
        .extend_defaults(default_mixins(Arc::clone(&crypto.cipher)))
}

/// Constructor arguments for a new order.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub customer_info: Value,
    pub order_items: Value,
    pub credit_card_number: Value,
    pub shipping_address: Value,
    pub billing_address: Value,
    pub last_name: Value,
    pub email: Value,
}

pub struct OrderFactory {
    ids: Arc<dyn IdGenerator>,
}

impl OrderFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl EntityFactory<Order> for OrderFactory {
    type Args = NewOrder;

    fn build(&self, args: NewOrder) -> Patch<Order> {
        [
            (OrderField::OrderNo, Value::String(self.ids.next_id())),
            (OrderField::OrderStatus, OrderStatus::Pending.into()),
            (OrderField::CustomerInfo, args.customer_info),
            (OrderField::OrderItems, args.order_items),
            (OrderField::CreditCardNumber, args.credit_card_number),
            (OrderField::ShippingAddress, args.shipping_address),
            (OrderField::BillingAddress, args.billing_address),
            (OrderField::LastName, args.last_name),
            (OrderField::Email, args.email),
        ]
        .into_iter()
        .filter(|(_, value)| !is_absent(Some(value)))
        .collect()
    }
}

/// Handlers for the order's port events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCallback {
    AddressValidated,
    PaymentAuthorized,
    OrderFilled,
    OrderShipped,
    TrackingUpdate,
    HandleLatePickup,
    DeliveryVerified,
    PaymentCompleted,
    TimeoutCallback,
}

impl OrderCallback {
    pub const ALL: [OrderCallback; 9] = [
        OrderCallback::AddressValidated,
        OrderCallback::PaymentAuthorized,
        OrderCallback::OrderFilled,
        OrderCallback::OrderShipped,
        OrderCallback::TrackingUpdate,
        OrderCallback::HandleLatePickup,
        OrderCallback::DeliveryVerified,
        OrderCallback::PaymentCompleted,
        OrderCallback::TimeoutCallback,
    ];

    /// The event's `key` member, which must be present.
    fn required(self, event: &Value, key: &str) -> Result<Value, CallbackError> {
        match event.get(key) {
            Some(value) if !is_absent(Some(value)) => Ok(value.clone()),
            _ => Err(CallbackError::InvalidEvent {
                callback: self.name().to_string(),
                reason: format!("missing '{}'", key),
            }),
        }
    }
}

#[async_trait]
impl PortCallback<Order> for OrderCallback {
    fn name(&self) -> &'static str {
        match self {
            OrderCallback::AddressValidated => "addressValidated",
            OrderCallback::PaymentAuthorized => "paymentAuthorized",
            OrderCallback::OrderFilled => "orderFilled",
            OrderCallback::OrderShipped => "orderShipped",
            OrderCallback::TrackingUpdate => "trackingUpdate",
            OrderCallback::HandleLatePickup => "handleLatePickup",
            OrderCallback::DeliveryVerified => "deliveryVerified",
            OrderCallback::PaymentCompleted => "paymentCompleted",
            OrderCallback::TimeoutCallback => "timeoutCallback",
        }
    }

    async fn handle(&self, _entity: &Entity<Order>, event: &Value) -> Result<Patch<Order>, CallbackError> {
        let patch = Patch::new();
        Ok(match self {
            OrderCallback::AddressValidated => {
                patch.set(OrderField::ShippingAddress, self.required(event, "shippingAddress")?)
            }
            OrderCallback::PaymentAuthorized => patch
                .set(OrderField::PaymentAuthorization, self.required(event, "authorization")?)
                .set(OrderField::OrderStatus, OrderStatus::Approved),
            OrderCallback::OrderFilled => patch.set(OrderField::OrderStatus, OrderStatus::Shipping),
            OrderCallback::OrderShipped => patch.set(OrderField::TrackingId, self.required(event, "trackingId")?),
            OrderCallback::TrackingUpdate => match event.get("trackingId") {
                Some(id) if !is_absent(Some(id)) => patch.set(OrderField::TrackingId, id.clone()),
                _ => patch,
            },
            OrderCallback::HandleLatePickup => patch.set(OrderField::OrderStatus, OrderStatus::Canceled),
            OrderCallback::DeliveryVerified => {
                patch.set(OrderField::ProofOfDelivery, self.required(event, "proofOfDelivery")?)
            }
            OrderCallback::PaymentCompleted => patch.set(OrderField::OrderStatus, OrderStatus::Complete),
            OrderCallback::TimeoutCallback => patch,
        })
    }
}

pub fn order_callbacks() -> CallbackRegistry<Order> {
    OrderCallback::ALL
        .into_iter()
        .fold(CallbackRegistry::new(), |registry, callback| registry.register(callback))
}

pub fn order_serializers(crypto: &CryptoSuite) -> Serializers<Order> {
    Serializers::new([
        FieldHook::decrypt(OrderField::CreditCardNumber, Arc::clone(&crypto.cipher)),
        FieldHook::decrypt(OrderField::LastName, Arc::clone(&crypto.cipher)),
        FieldHook::decrypt(OrderField::Email, Arc::clone(&crypto.cipher)),
    ])
}

pub type OrderDefinition = ModelDefinition<Order, OrderFactory>;

pub fn definition(deps: &Dependencies) -> OrderDefinition {
    ModelDefinition::new(
        "orders",
        OrderFactory::new(Arc::clone(&deps.ids)),
        order_mixins(&deps.crypto),
        order_serializers(&deps.crypto),
    )
}
