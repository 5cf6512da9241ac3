// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - pipeline run lifecycle
//! * `mixin` - mixin application and memo events
//! * `port` - port binding and callback dispatch
//! * `validation` - port configuration warnings and errors

use std::fmt::Display;

use tracing::Span;

pub mod engine;
pub mod mixin;
pub mod port;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message at its level with structured fields attached.
    fn log(&self);

    /// A span carrying the same structured fields.
    fn span(&self, name: &str) -> Span;
}
