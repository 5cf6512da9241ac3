// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the mixin pipeline.
//!
//! Every variant names all offending properties, not just the first one found.
//! A failed pipeline run never hands back a partially transformed entity.

use std::fmt;

use thiserror::Error;

use super::CryptoError;
use crate::model::Value;

#[derive(Debug, Error)]
pub enum MixinError {
    /// One or more required properties are absent.
    #[error("{model}: missing required properties: {}", .fields.join(", "))]
    MissingProperty {
        model: &'static str,
        fields: Vec<String>,
    },

    /// The patch touches properties that are frozen.
    #[error("{model}: cannot update readonly properties: {}", .fields.join(", "))]
    ImmutableProperty {
        model: &'static str,
        fields: Vec<String>,
    },

    /// Enumerated-value, max-bound or custom predicate violations.
    #[error("{model}: invalid properties: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Validation {
        model: &'static str,
        violations: Vec<Violation>,
    },

    /// An injected encrypt/hash collaborator failed.
    #[error("{model}: {mixin} failed on '{field}': {source}")]
    Crypto {
        model: &'static str,
        mixin: String,
        field: String,
        #[source]
        source: CryptoError,
    },
}

impl MixinError {
    /// Names of the properties this error is about.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            MixinError::MissingProperty { fields, .. } | MixinError::ImmutableProperty { fields, .. } => {
                fields.iter().map(String::as_str).collect()
            }
            MixinError::Validation { violations, .. } => violations.iter().map(Violation::field).collect(),
            MixinError::Crypto { field, .. } => vec![field.as_str()],
        }
    }
}

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Value is not one of the allowed values.
    NotAllowed { field: String, value: Value },
    /// Numeric value is above the configured maximum.
    ExceedsMax { field: String, value: f64, max: f64 },
    /// The injected predicate returned false.
    Rejected { field: String },
}

impl Violation {
    pub fn field(&self) -> &str {
        match self {
            Violation::NotAllowed { field, .. }
            | Violation::ExceedsMax { field, .. }
            | Violation::Rejected { field } => field,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotAllowed { field, value } => {
                write!(f, "'{}' does not allow value {}", field, value)
            }
            Violation::ExceedsMax { field, value, max } => {
                write!(f, "'{}' value {} exceeds maximum {}", field, value, max)
            }
            Violation::Rejected { field } => write!(f, "'{}' rejected by validator", field),
        }
    }
}
