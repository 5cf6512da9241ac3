// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

/// Errors that can occur during port graph validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two ports share a name
    DuplicatePortName {
        /// The duplicate port name
        port: String,
    },
    /// An inbound port declares a positive timeout
    TimeoutOnInbound {
        /// The inbound port
        port: String,
        /// The configured timeout
        timeout_ms: u64,
    },
    /// A port consumes the same event it produces
    SelfReferentialPort {
        /// The offending port
        port: String,
        /// The event it both consumes and produces
        event: String,
    },
    /// The consumed -> produced event chaining forms a cycle
    CyclicEventChain {
        /// Port names along the cycle, first name repeated at the end
        cycle: Vec<String>,
    },
    /// A port reads an entity field the model does not have
    UnknownReadField {
        /// The port declaring the read
        port: String,
        /// The unknown field name
        field: String,
        /// The model the ports belong to
        model: String,
    },
    /// The configuration was written for a different model
    ModelMismatch {
        /// Model the caller expected
        expected: String,
        /// Model named in the configuration
        found: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicatePortName { port } => {
                write!(f, "Duplicate port name: '{}'", port)
            }
            ValidationError::TimeoutOnInbound { port, timeout_ms } => {
                write!(
                    f,
                    "Inbound port '{}' declares a timeout of {} ms; timeouts apply to outbound ports only",
                    port, timeout_ms
                )
            }
            ValidationError::SelfReferentialPort { port, event } => {
                write!(f, "Port '{}' consumes and produces the same event '{}'", port, event)
            }
            ValidationError::CyclicEventChain { cycle } => {
                write!(f, "Cyclic event chain detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnknownReadField { port, field, model } => {
                write!(
                    f,
                    "Port '{}' reads field '{}' which model '{}' does not have",
                    port, field, model
                )
            }
            ValidationError::ModelMismatch { expected, found } => {
                write!(
                    f,
                    "Port configuration is for model '{}' but '{}' was expected",
                    found, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors loading a port configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML.
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ValidationError>),
}
