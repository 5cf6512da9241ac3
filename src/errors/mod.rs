// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod callback;
mod config;
mod crypto;
mod mixin;
mod serializer;

pub use callback::{BindError, CallbackError, CallbackRef};
pub use config::{ConfigError, ValidationError};
pub use crypto::CryptoError;
pub use mixin::{MixinError, Violation};
pub use serializer::SerializerError;
