// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Model and field-name abstractions.
//!
//! Every model declares a closed set of fields as an enum. Entities, patches and
//! mixins are all keyed by that enum, so a mixin can never target a property the
//! model does not have, and (de)serialization never discovers fields dynamically.
//!
//! Field enums are normally declared with [`model_fields!`](crate::model_fields):
//!
//! ```
//! use entity_mixins::model::{FieldName, Model};
//!
//! entity_mixins::model_fields! {
//!     pub enum AccountField {
//!         AccountId => "accountId",
//!         Owner => "owner",
//!     }
//! }
//!
//! pub struct Account;
//!
//! impl Model for Account {
//!     type Field = AccountField;
//!     const NAME: &'static str = "account";
//! }
//!
//! assert_eq!(AccountField::Owner.as_str(), "owner");
//! assert_eq!(AccountField::parse("accountId"), Some(AccountField::AccountId));
//! ```

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Property values are plain JSON values.
pub type Value = serde_json::Value;

/// A model's closed set of property names.
pub trait FieldName: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// External (serialized) name of the field.
    fn as_str(self) -> &'static str;

    /// Every field of the model, in declaration order.
    fn all() -> &'static [Self];

    /// Look a field up by its external name.
    fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.as_str() == name)
    }
}

/// A domain model whose entities flow through a mixin pipeline.
pub trait Model: Sized + Send + Sync + 'static {
    type Field: FieldName;

    /// Model name used in logs and errors.
    const NAME: &'static str;
}

/// Whether a property value counts as missing.
///
/// Missing keys, `null`, empty strings, empty arrays and empty objects are
/// absent. `0` and `false` are present.
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// Render a value as the plaintext handed to crypto collaborators.
pub(crate) fn plaintext(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Declare a model field enum together with its [`FieldName`] impl.
#[macro_export]
macro_rules! model_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::model::FieldName for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::model::FieldName::as_str(*self))
            }
        }
    };
}
