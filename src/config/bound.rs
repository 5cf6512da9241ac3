// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ports with their callbacks resolved.
//!
//! Binding happens once per model definition. Every enabled port's `callback`
//! and `on_timeout` names must resolve in the registry; unknown names are all
//! reported together. Dispatch afterwards is by port name: the orchestrator
//! tells a bound port that its event arrived (or that its window elapsed) and
//! gets back a patch to run through the mixin pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{CallbackRegistry, PortGraph, PortSpec};
use crate::entity::{Entity, Patch};
use crate::errors::{BindError, CallbackError, CallbackRef};
use crate::model::{is_absent, FieldName, Model, Value};
use crate::observability::messages::port::{CallbackFailed, CallbackInvoked, PortsBound};
use crate::observability::messages::validation::UnknownCallback;
use crate::observability::messages::StructuredLog;
use crate::traits::PortCallback;

struct BoundPort<M: Model> {
    spec: PortSpec,
    callback: Option<Arc<dyn PortCallback<M>>>,
    on_timeout: Option<Arc<dyn PortCallback<M>>>,
}

impl<M: Model> Clone for BoundPort<M> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            callback: self.callback.clone(),
            on_timeout: self.on_timeout.clone(),
        }
    }
}

pub struct BoundPorts<M: Model> {
    ports: HashMap<String, BoundPort<M>>,
}

impl<M: Model> BoundPorts<M> {
    pub fn bind(graph: &PortGraph, registry: &CallbackRegistry<M>) -> Result<Self, BindError> {
        let mut unknown = Vec::new();
        let mut resolve = |port: &str, name: &Option<String>| -> Option<Arc<dyn PortCallback<M>>> {
            let name = name.as_deref()?;
            let found = registry.get(name).cloned();
            if found.is_none() {
                UnknownCallback { port, callback: name }.log();
                unknown.push(CallbackRef {
                    port: port.to_string(),
                    callback: name.to_string(),
                });
            }
            found
        };

        let mut ports = HashMap::new();
        for spec in graph.ports() {
            let callback = resolve(&spec.name, &spec.callback);
            let on_timeout = resolve(&spec.name, &spec.on_timeout);
            ports.insert(
                spec.name.clone(),
                BoundPort {
                    spec: spec.clone(),
                    callback,
                    on_timeout,
                },
            );
        }

        if !unknown.is_empty() {
            return Err(BindError::UnknownCallbacks { references: unknown });
        }

        PortsBound {
            model: M::NAME,
            port_count: ports.len(),
            callback_count: registry.len(),
        }
        .log();

        Ok(Self { ports })
    }

    pub fn spec(&self, port: &str) -> Option<&PortSpec> {
        self.ports.get(port).map(|p| &p.spec)
    }

    /// Fails with the names of every field the port reads that is absent
    /// on `entity`.
    pub fn ready_to_fire(&self, port: &str, entity: &Entity<M>) -> Result<(), CallbackError> {
        let bound = self.lookup(port)?;
        let missing: Vec<String> = bound
            .spec
            .reads
            .iter()
            .filter(|name| match M::Field::parse(name) {
                Some(field) => is_absent(entity.get(field)),
                None => true,
            })
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CallbackError::NotReady {
                port: port.to_string(),
                missing,
            })
        }
    }

    /// The port's produced event arrived.
    pub async fn handle(&self, port: &str, entity: &Entity<M>, event: &Value) -> Result<Patch<M>, CallbackError> {
        let bound = self.lookup(port)?;
        let callback = bound
            .callback
            .as_ref()
            .ok_or_else(|| CallbackError::NoCallback(port.to_string()))?;
        self.ready_to_fire(port, entity)?;
        Self::invoke(port, callback, entity, event, false).await
    }

    /// The port's response window elapsed without its event.
    pub async fn handle_timeout(&self, port: &str, entity: &Entity<M>) -> Result<Patch<M>, CallbackError> {
        let bound = self.lookup(port)?;
        let callback = bound
            .on_timeout
            .as_ref()
            .ok_or_else(|| CallbackError::NoCallback(port.to_string()))?;
        Self::invoke(port, callback, entity, &Value::Null, true).await
    }

    fn lookup(&self, port: &str) -> Result<&BoundPort<M>, CallbackError> {
        self.ports
            .get(port)
            .ok_or_else(|| CallbackError::UnknownPort(port.to_string()))
    }

    async fn invoke(
        port: &str,
        callback: &Arc<dyn PortCallback<M>>,
        entity: &Entity<M>,
        event: &Value,
        timed_out: bool,
    ) -> Result<Patch<M>, CallbackError> {
        let msg = CallbackInvoked {
            port,
            callback: callback.name(),
            timed_out,
        };
        msg.log();

        let result = callback.handle(entity, event).await;
        if let Err(error) = &result {
            CallbackFailed {
                port,
                callback: callback.name(),
                error,
            }
            .log();
        }
        result
    }
}

impl<M: Model> Clone for BoundPorts<M> {
    fn clone(&self) -> Self {
        Self {
            ports: self.ports.clone(),
        }
    }
}
