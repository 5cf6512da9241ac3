// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::crypto::CryptoSuite;
use crate::entity::Patch;
use crate::factory::{Dependencies, EntityFactory, IdGenerator};
use crate::mixins::{default_mixins, FreezeProperties, MixinList, RequireProperties, TransformProperties};
use crate::model::{is_absent, Model, Value};
use crate::models::ModelDefinition;
use crate::serializers::{FieldHook, Serializers};

crate::model_fields! {
    pub enum UserField {
        UserId => "userId",
        UserName => "userName",
        Password => "password",
        CustomerId => "customerId",
        FirstName => "firstName",
        LastName => "lastName",
        Phone => "phone",
        Email => "email",
    }
}

pub struct User;

impl Model for User {
    type Field = UserField;
    const NAME: &'static str = "user";
}

pub fn user_mixins(crypto: &CryptoSuite) -> MixinList<User> {
    MixinList::new()
        .with(RequireProperties::<User>::new([
            UserField::UserName,
            UserField::Password,
            UserField::FirstName,
        ]))
        .with(FreezeProperties::<User>::new([UserField::UserId, UserField::UserName]))
        .with(TransformProperties::<User>::hash(
            [UserField::Password],
            Arc::clone(&crypto.hasher),
        ))
        .extend_defaults(default_mixins(Arc::clone(&crypto.cipher)))
}

/// Reverse the default personal-info encryption on read.
pub fn user_serializers(crypto: &CryptoSuite) -> Serializers<User> {
    Serializers::new(
        [UserField::Phone, UserField::Email, UserField::LastName]
            .into_iter()
            .map(|field| FieldHook::decrypt(field, Arc::clone(&crypto.cipher))),
    )
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub user_name: Value,
    pub password: Value,
    pub customer_id: Value,
    pub first_name: Value,
    pub last_name: Value,
    pub phone: Value,
    pub email: Value,
}

pub struct UserFactory {
    ids: Arc<dyn IdGenerator>,
}

impl UserFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl EntityFactory<User> for UserFactory {
    type Args = NewUser;

    fn build(&self, args: NewUser) -> Patch<User> {
        [
            (UserField::UserId, Value::String(self.ids.next_id())),
            (UserField::UserName, args.user_name),
            (UserField::Password, args.password),
            (UserField::CustomerId, args.customer_id),
            (UserField::FirstName, args.first_name),
            (UserField::LastName, args.last_name),
            (UserField::Phone, args.phone),
            (UserField::Email, args.email),
        ]
        .into_iter()
        .filter(|(_, value)| !is_absent(Some(value)))
        .collect()
    }
}

pub type UserDefinition = ModelDefinition<User, UserFactory>;

pub fn definition(deps: &Dependencies) -> UserDefinition {
    ModelDefinition::new(
        "users",
        UserFactory::new(Arc::clone(&deps.ids)),
        user_mixins(&deps.crypto),
        user_serializers(&deps.crypto),
    )
}
