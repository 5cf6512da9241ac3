// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::Model;
use crate::traits::PortCallback;

/// Port callbacks by the name port configurations refer to them with.
pub struct CallbackRegistry<M: Model> {
    callbacks: HashMap<String, Arc<dyn PortCallback<M>>>,
}

impl<M: Model> CallbackRegistry<M> {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }

    /// Register under the callback's own name; a later registration with the
    /// same name replaces the earlier one.
    pub fn register(mut self, callback: impl PortCallback<M> + 'static) -> Self {
        self.callbacks
            .insert(callback.name().to_string(), Arc::new(callback));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn PortCallback<M>>> {
        self.callbacks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<M: Model> Default for CallbackRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for CallbackRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for CallbackRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.names())
            .finish()
    }
}
