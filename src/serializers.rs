// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-field read/write hooks.
//!
//! Hooks map one property value at a time and never see each other's output,
//! so their order across distinct fields does not matter. Models use
//! deserialize hooks to reverse encryption when an entity is read back.

use std::sync::Arc;

use serde_json::Map;

use crate::crypto::Cipher;
use crate::entity::Entity;
use crate::errors::{CryptoError, SerializerError};
use crate::model::{FieldName, Model, Value};

/// When a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Serialize,
    Deserialize,
}

/// JSON type a hook accepts. Values of any other type pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Any,
}

impl ValueKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Any => true,
        }
    }
}

type HookFn<M> = Arc<dyn Fn(<M as Model>::Field, &Value) -> Result<Value, CryptoError> + Send + Sync>;

pub struct FieldHook<M: Model> {
    pub on: HookPhase,
    pub key: M::Field,
    pub kind: ValueKind,
    value: HookFn<M>,
}

impl<M: Model> FieldHook<M> {
    pub fn new<F>(on: HookPhase, key: M::Field, kind: ValueKind, value: F) -> Self
    where
        F: Fn(M::Field, &Value) -> Result<Value, CryptoError> + Send + Sync + 'static,
    {
        Self {
            on,
            key,
            kind,
            value: Arc::new(value),
        }
    }

    /// Deserialize hook replacing a ciphertext string with its plaintext.
    pub fn decrypt(key: M::Field, cipher: Arc<dyn Cipher>) -> Self {
        Self::new(HookPhase::Deserialize, key, ValueKind::String, move |_, value| {
            let ciphertext = value.as_str().unwrap_or_default();
            cipher.decrypt(ciphertext).map(Value::String)
        })
    }
}

impl<M: Model> Clone for FieldHook<M> {
    fn clone(&self) -> Self {
        Self {
            on: self.on,
            key: self.key,
            kind: self.kind,
            value: Arc::clone(&self.value),
        }
    }
}

/// A model's hook set.
pub struct Serializers<M: Model> {
    hooks: Vec<FieldHook<M>>,
}

impl<M: Model> Serializers<M> {
    pub fn new(hooks: impl IntoIterator<Item = FieldHook<M>>) -> Self {
        Self {
            hooks: hooks.into_iter().collect(),
        }
    }

    pub fn hooks(&self) -> &[FieldHook<M>] {
        &self.hooks
    }

    /// The entity's external representation with every `phase` hook applied.
    pub fn render(&self, entity: &Entity<M>, phase: HookPhase) -> Result<Map<String, Value>, SerializerError> {
        let mut map = match serde_json::to_value(entity)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        for hook in self.hooks.iter().filter(|h| h.on == phase) {
            let key = hook.key.as_str();
            let Some(current) = map.get(key) else {
                continue;
            };
            if !hook.kind.accepts(current) {
                continue;
            }
            let mapped = (hook.value)(hook.key, current).map_err(|source| SerializerError::Hook {
                field: key.to_string(),
                source,
            })?;
            map.insert(key.to_string(), mapped);
        }
        Ok(map)
    }

    /// Shorthand for the read side.
    pub fn deserialize(&self, entity: &Entity<M>) -> Result<Map<String, Value>, SerializerError> {
        self.render(entity, HookPhase::Deserialize)
    }
}

impl<M: Model> Default for Serializers<M> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::MockCipher;
    use crate::models::user::{User, UserField};
    use serde_json::json;

    fn reversing_cipher() -> Arc<dyn Cipher> {
        let mut cipher = MockCipher::new();
        cipher
            .expect_decrypt()
            .returning(|c| Ok(c.chars().rev().collect()));
        Arc::new(cipher)
    }

    #[test]
    fn test_decrypt_hooks_restore_plaintext() {
        let cipher = reversing_cipher();
        let serializers = Serializers::new([
            FieldHook::<User>::decrypt(UserField::Phone, Arc::clone(&cipher)),
            FieldHook::<User>::decrypt(UserField::Email, cipher),
        ]);
        let entity: Entity<User> = Entity::new([
            (UserField::UserName, json!("ada")),
            (UserField::Phone, json!("555-1")),
        ]);

        let rendered = serializers.deserialize(&entity).unwrap();

        assert_eq!(rendered.get("phone"), Some(&json!("1-555")));
        assert_eq!(rendered.get("userName"), Some(&json!("ada")));
        assert!(rendered.get("email").is_none());
    }

    #[test]
    fn test_kind_mismatch_and_phase_skip() {
        let hooks = vec![
            FieldHook::<User>::new(HookPhase::Deserialize, UserField::Phone, ValueKind::String, |_, _| {
                Ok(json!("mapped"))
            }),
            FieldHook::<User>::new(HookPhase::Serialize, UserField::Email, ValueKind::Any, |_, _| {
                Ok(json!("mapped"))
            }),
        ];
        let serializers = Serializers::new(hooks);
        let entity: Entity<User> = Entity::new([
            (UserField::Phone, json!(5551234)),
            (UserField::Email, json!("a@b.c")),
        ]);

        let read = serializers.deserialize(&entity).unwrap();
        assert_eq!(read.get("phone"), Some(&json!(5551234)));
        assert_eq!(read.get("email"), Some(&json!("a@b.c")));

        let written = serializers.render(&entity, HookPhase::Serialize).unwrap();
        assert_eq!(written.get("email"), Some(&json!("mapped")));
    }

    #[test]
    fn test_hook_failure_names_field() {
        let mut cipher = MockCipher::new();
        cipher
            .expect_decrypt()
            .returning(|_| Err(CryptoError::Decrypt("bad padding".to_string())));
        let serializers = Serializers::new([FieldHook::<User>::decrypt(UserField::LastName, Arc::new(cipher))]);
        let entity: Entity<User> = Entity::new([(UserField::LastName, json!("zz"))]);

        let error = serializers.deserialize(&entity).unwrap_err();

        assert!(matches!(error, SerializerError::Hook { ref field, .. } if field == "lastName"));
    }
}
