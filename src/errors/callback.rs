// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for binding port callbacks and invoking them.

use std::fmt;

use thiserror::Error;

/// A port's reference to a callback by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRef {
    pub port: String,
    pub callback: String,
}

impl fmt::Display for CallbackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.port, self.callback)
    }
}

/// Errors that can occur while resolving port callbacks against a registry
#[derive(Debug, Error)]
pub enum BindError {
    /// Callback names no handler is registered for, across all ports
    #[error("Unknown callbacks: {}", .references.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    UnknownCallbacks { references: Vec<CallbackRef> },
}

/// Errors raised when a bound port handles an event.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Unknown port '{0}'")]
    UnknownPort(String),

    #[error("Port '{0}' has no callback bound")]
    NoCallback(String),

    /// Fields the port reads are absent on the entity.
    #[error("Port '{port}' is not ready: missing {}", .missing.join(", "))]
    NotReady { port: String, missing: Vec<String> },

    /// The event payload lacks what the handler needs.
    #[error("Callback '{callback}' received an invalid event: {reason}")]
    InvalidEvent { callback: String, reason: String },
}
