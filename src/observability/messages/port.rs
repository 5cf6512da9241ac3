// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for port binding and callback dispatch.
//!
//! This module contains message types for logging events related to:
//! * Resolving port callbacks against a registry
//! * Callback invocation, including timeout callbacks
//! * Callback failure

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Ports bound to their callbacks.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::port::PortsBound;
///
/// let msg = PortsBound {
///     model: "order",
///     port_count: 12,
///     callback_count: 9,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PortsBound<'a> {
    pub model: &'a str,
    pub port_count: usize,
    pub callback_count: usize,
}

impl Display for PortsBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bound {} '{}' ports to {} callbacks",
            self.port_count, self.model, self.callback_count
        )
    }
}

impl StructuredLog for PortsBound<'_> {
    fn log(&self) {
        tracing::info!(
            model = self.model,
            port_count = self.port_count,
            callback_count = self.callback_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            model = self.model,
            port_count = self.port_count,
        )
    }
}

/// A port's callback is about to run.
///
/// # Log Level
/// `debug!` - Per-event dispatch
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::port::CallbackInvoked;
///
/// let msg = CallbackInvoked {
///     port: "shipOrder",
///     callback: "handleLatePickup",
///     timed_out: true,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct CallbackInvoked<'a> {
    pub port: &'a str,
    pub callback: &'a str,
    pub timed_out: bool,
}

impl Display for CallbackInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.timed_out {
            write!(f, "Port '{}' timed out, invoking '{}'", self.port, self.callback)
        } else {
            write!(f, "Port '{}' invoking '{}'", self.port, self.callback)
        }
    }
}

impl StructuredLog for CallbackInvoked<'_> {
    fn log(&self) {
        tracing::debug!(
            port = self.port,
            callback = self.callback,
            timed_out = self.timed_out,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "port_callback",
            span_name = name,
            port = self.port,
            callback = self.callback,
            timed_out = self.timed_out,
        )
    }
}

/// A port's callback returned an error.
///
/// # Log Level
/// `warn!` - The orchestrator decides whether to compensate
pub struct CallbackFailed<'a> {
    pub port: &'a str,
    pub callback: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CallbackFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback '{}' on port '{}' failed: {}",
            self.callback, self.port, self.error
        )
    }
}

impl StructuredLog for CallbackFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            port = self.port,
            callback = self.callback,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            port = self.port,
            callback = self.callback,
        )
    }
}
