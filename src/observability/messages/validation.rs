// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for port configuration validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Event chain cycle detection
//! * Duplicate port names
//! * Timeout callbacks declared without a timeout
//! * Callback binding failures
//! * Validation start / completion / failure

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic event chain detected in a port configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::validation::CyclicEventChainDetected;
///
/// let cycle = vec!["fillOrder", "shipOrder", "fillOrder"];
/// let msg = CyclicEventChainDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicEventChainDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicEventChainDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic event chain detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicEventChainDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// Duplicate port name detected in a port configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicatePortName<'a> {
    pub port: &'a str,
}

impl Display for DuplicatePortName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate port name: '{}'", self.port)
    }
}

impl StructuredLog for DuplicatePortName<'_> {
    fn log(&self) {
        tracing::error!(port = self.port, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(tracing::Level::ERROR, "span_name", name = name, port = self.port)
    }
}

/// A port declares an `on_timeout` callback but no timeout, so the callback
/// can never fire.
///
/// # Log Level
/// `warn!` - Suspicious but loadable configuration
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::validation::TimeoutCallbackWithoutTimeout;
///
/// let msg = TimeoutCallbackWithoutTimeout {
///     port: "completePayment",
///     callback: "timeoutCallback",
/// };
///
/// assert!(msg.to_string().contains("completePayment"));
/// ```
pub struct TimeoutCallbackWithoutTimeout<'a> {
    pub port: &'a str,
    pub callback: &'a str,
}

impl Display for TimeoutCallbackWithoutTimeout<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Port '{}' declares on_timeout '{}' but no timeout; the callback will never fire",
            self.port, self.callback
        )
    }
}

impl StructuredLog for TimeoutCallbackWithoutTimeout<'_> {
    fn log(&self) {
        tracing::warn!(port = self.port, callback = self.callback, "{}", self);
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

/// A port references a callback that is not registered.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnknownCallback<'a> {
    pub port: &'a str,
    pub callback: &'a str,
}

impl Display for UnknownCallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Port '{}' references unknown callback '{}'",
            self.port, self.callback
        )
    }
}

impl StructuredLog for UnknownCallback<'_> {
    fn log(&self) {
        tracing::error!(port = self.port, callback = self.callback, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            port = self.port,
            callback = self.callback,
        )
    }
}

/// Port configuration validation started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationStarted<'a> {
    pub model: &'a str,
    pub port_count: usize,
}

impl Display for ValidationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting port validation for '{}' ({} ports)",
            self.model, self.port_count
        )
    }
}

impl StructuredLog for ValidationStarted<'_> {
    fn log(&self) {
        tracing::info!(model = self.model, port_count = self.port_count, "{}", self);
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

/// Port configuration validation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     model: "order",
///     port_count: 14,
///     warning_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationCompleted<'a> {
    pub model: &'a str,
    pub port_count: usize,
    pub warning_count: usize,
}

impl Display for ValidationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.warning_count > 0 {
            write!(
                f,
                "Port validation completed for '{}' ({} ports) with {} warnings",
                self.model, self.port_count, self.warning_count
            )
        } else {
            write!(
                f,
                "Port validation completed successfully for '{}' ({} ports)",
                self.model, self.port_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            model = self.model,
            port_count = self.port_count,
            warning_count = self.warning_count,
            has_warnings = self.warning_count > 0,
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
            warning_count = self.warning_count,
        )
    }
}

/// Port configuration validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationFailed<'a> {
    pub model: &'a str,
    pub error_count: usize,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Port validation for '{}' failed with {} errors",
            self.model, self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(model = self.model, error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            model = self.model,
            error_count = self.error_count,
        )
    }
}
