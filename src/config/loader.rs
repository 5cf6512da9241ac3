// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::model::Model;

/// Port configuration for one model.
///
/// Ports are pure configuration: they are loaded once when a model is
/// defined and never mutated. Only an external orchestrator keeps runtime
/// state per in-flight entity.
///
/// # Example
/// ```yaml
/// model: order
/// ports:
///   - name: authorizePayment
///     service: Payment
///     direction: outbound
///     consumes_event: authorizePayment
///     produces_event: paymentAuthorized
///     callback: paymentAuthorized
///     reads: [creditCardNumber, billingAddress]
///   - name: refundPayment
///     service: Payment
///     direction: outbound
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PortConfig {
    pub model: String,
    #[serde(default)]
    pub ports: Vec<PortSpec>,
}

impl PortConfig {
    pub fn port(&self, name: &str) -> Option<&PortSpec> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Ports still in the active graph.
    pub fn enabled(&self) -> impl Iterator<Item = &PortSpec> {
        self.ports.iter().filter(|p| p.enabled)
    }
}

/// A single workflow port.
///
/// # Fields
/// * `name` - Unique port name within the model
/// * `service` - Service the port talks to
/// * `direction` - Whether the model consumes (`inbound`) or produces (`outbound`) the event
/// * `consumes_event` / `produces_event` - Event chaining; a port consuming the event
///   another port produces runs after it
/// * `timeout_ms` - How long to wait for `produces_event`; `0` or absent waits indefinitely
/// * `on_timeout` - Callback name fired when the timeout elapses
/// * `callback` - Callback name handling the produced event
/// * `enabled` - `false` removes the port from the active graph (defaults to `true`)
/// * `reads` - Entity fields the callback relies on
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PortSpec {
    pub name: String,
    pub service: String,
    pub direction: Direction,
    pub consumes_event: Option<String>,
    pub produces_event: Option<String>,
    pub timeout_ms: Option<u64>,
    pub on_timeout: Option<String>,
    pub callback: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub reads: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl PortSpec {
    /// The response window, `None` for "wait indefinitely".
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms {
            None | Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        }
    }

    /// Whether the port takes part in event chaining at all.
    pub fn is_wired(&self) -> bool {
        self.consumes_event.is_some() || self.produces_event.is_some()
    }

    /// Callback names referenced by this port.
    pub fn callback_refs(&self) -> impl Iterator<Item = &str> {
        self.callback.iter().chain(self.on_timeout.iter()).map(String::as_str)
    }
}

/// Which side of the event the model's own component is on.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Serialization format of a port configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a port configuration from a string.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<PortConfig, ConfigError> {
    let cfg: PortConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(cfg)
}

/// Load a port configuration from a YAML or TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PortConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format)
}

/// Load a port configuration and validate it against model `M`.
pub fn load_and_validate_config<M: Model, P: AsRef<Path>>(path: P) -> Result<PortConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_port_config::<M>(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
