// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Port configuration validation.
//!
//! Checks run in this order and errors are accumulated so every problem is
//! reported at once:
//!
//! 1. **Model**: the configuration names the model it is validated against
//! 2. **Uniqueness**: port names are unique
//! 3. **Port shape**: no timeout on inbound ports, no port consuming the event it
//!    produces, every `reads` field exists on the model
//! 4. **Cycle detection**: DFS over the consumed -> produced event chain of enabled
//!    ports, skipped when earlier checks failed
//!
//! A port declaring `on_timeout` without a timeout is a warning, not an error:
//! the callback can never fire but the graph is still executable.
//!
//! # Example
//! ```rust
//! use entity_mixins::config::{parse_config, validate_port_config, ConfigFormat};
//! use entity_mixins::errors::ValidationError;
//! use entity_mixins::models::order::Order;
//!
//! let cfg = parse_config(
//!     r#"
//! model: order
//! ports:
//!   - name: listen
//!     service: Event
//!     direction: inbound
//!     timeout_ms: 5000
//! "#,
//!     ConfigFormat::Yaml,
//! )
//! .unwrap();
//!
//! let errors = validate_port_config::<Order>(&cfg).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::TimeoutOnInbound { .. }));
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::{Direction, PortConfig, PortSpec};
use crate::errors::ValidationError;
use crate::model::{FieldName, Model};
use crate::observability::messages::validation::{
    CyclicEventChainDetected, DuplicatePortName, TimeoutCallbackWithoutTimeout, ValidationCompleted,
    ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// Validate a port configuration against model `M`.
pub fn validate_port_config<M: Model>(config: &PortConfig) -> Result<(), Vec<ValidationError>> {
    ValidationStarted {
        model: M::NAME,
        port_count: config.ports.len(),
    }
    .log();

    let mut errors = Vec::new();

    if config.model != M::NAME {
        errors.push(ValidationError::ModelMismatch {
            expected: M::NAME.to_string(),
            found: config.model.clone(),
        });
    }

    if let Err(duplicate_errors) = validate_unique_port_names(config) {
        errors.extend(duplicate_errors);
    }

    for port in &config.ports {
        errors.extend(validate_port_shape::<M>(port, &config.model));
    }

    // cycle detection needs unique names
    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_event_chain(config) {
            errors.extend(cycle_errors);
        }
    }

    if !errors.is_empty() {
        ValidationFailed {
            model: M::NAME,
            error_count: errors.len(),
        }
        .log();
        return Err(errors);
    }

    let warnings = timeout_callbacks_without_timeout(config);
    for port in &warnings {
        TimeoutCallbackWithoutTimeout {
            port: &port.name,
            callback: port.on_timeout.as_deref().unwrap_or_default(),
        }
        .log();
    }

    ValidationCompleted {
        model: M::NAME,
        port_count: config.ports.len(),
        warning_count: warnings.len(),
    }
    .log();

    Ok(())
}

/// Enabled ports declaring an `on_timeout` callback that can never fire.
pub fn timeout_callbacks_without_timeout(config: &PortConfig) -> Vec<&PortSpec> {
    config
        .enabled()
        .filter(|p| p.on_timeout.is_some() && p.timeout().is_none())
        .collect()
}

fn validate_unique_port_names(config: &PortConfig) -> Result<(), Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for port in &config.ports {
        if !seen.insert(port.name.as_str()) {
            DuplicatePortName { port: &port.name }.log();
            errors.push(ValidationError::DuplicatePortName {
                port: port.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_port_shape<M: Model>(port: &PortSpec, model: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if port.direction == Direction::Inbound {
        if let Some(timeout_ms) = port.timeout_ms.filter(|ms| *ms > 0) {
            errors.push(ValidationError::TimeoutOnInbound {
                port: port.name.clone(),
                timeout_ms,
            });
        }
    }

    if let (Some(consumed), Some(produced)) = (&port.consumes_event, &port.produces_event) {
        if consumed == produced {
            errors.push(ValidationError::SelfReferentialPort {
                port: port.name.clone(),
                event: consumed.clone(),
            });
        }
    }

    for field in &port.reads {
        if M::Field::parse(field).is_none() {
            errors.push(ValidationError::UnknownReadField {
                port: port.name.clone(),
                field: field.clone(),
                model: model.to_string(),
            });
        }
    }

    errors
}

/// Builds producer -> consumer edges over enabled ports and runs DFS with a
/// recursion stack, reporting the first cycle found with its full path.
fn validate_acyclic_event_chain(config: &PortConfig) -> Result<(), Vec<ValidationError>> {
    let ports: Vec<&PortSpec> = config.enabled().collect();

    let mut consumers: HashMap<&str, Vec<&str>> = HashMap::new();
    for port in &ports {
        if let Some(event) = &port.consumes_event {
            consumers.entry(event.as_str()).or_default().push(port.name.as_str());
        }
    }

    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for port in &ports {
        let next = port
            .produces_event
            .as_deref()
            .and_then(|event| consumers.get(event))
            .cloned()
            .unwrap_or_default();
        graph.insert(port.name.as_str(), next);
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    // declaration order keeps the reported cycle stable
    for port in &ports {
        if !visited.contains(port.name.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(&port.name, &graph, &mut visited, &mut rec_stack, &mut path) {
                let names: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicEventChainDetected { cycle: &names }.log();
                return Err(vec![ValidationError::CyclicEventChain { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection(
    node: &str,
    graph: &HashMap<&str, Vec<&str>>,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|x| x == neighbor).unwrap_or(0);
                let mut cycle = path[cycle_start..].to_vec();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
