// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Injected crypto collaborators.
//!
//! The pipeline never implements encryption itself. Models receive a
//! [`CryptoSuite`] and hand its collaborators to the encrypt/hash mixins and
//! to the read-side serializer hooks. `decrypt` is only ever called from
//! serializers, never inside a mutation pipeline.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::errors::CryptoError;

/// Reversible encryption of a single property value.
#[cfg_attr(test, mockall::automock)]
pub trait Cipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError>;
}

/// One-way digest of a single property value.
#[cfg_attr(test, mockall::automock)]
pub trait Hasher: Send + Sync {
    fn hash(&self, value: &str) -> String;
}

/// Salted SHA-256, base64 encoded.
#[derive(Debug, Clone)]
pub struct Sha256Hasher {
    salt: String,
}

impl Sha256Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl Hasher for Sha256Hasher {
    fn hash(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(value.as_bytes());
        STANDARD.encode(hasher.finalize())
    }
}

/// The collaborators a model's mixins and serializers are built with.
#[derive(Clone)]
pub struct CryptoSuite {
    pub cipher: Arc<dyn Cipher>,
    pub hasher: Arc<dyn Hasher>,
}

impl CryptoSuite {
    pub fn new(cipher: Arc<dyn Cipher>, hasher: Arc<dyn Hasher>) -> Self {
        Self { cipher, hasher }
    }
}
