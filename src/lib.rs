// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // port graph config + callback registry
pub mod crypto;        // injected encrypt/hash collaborators
pub mod engine;        // pipeline runner
pub mod entity;        // entity, patch, memo
pub mod errors;        // error handling
pub mod factory;       // id generation + entity factories
pub mod mixins;        // property transformations
pub mod model;         // model + field traits
pub mod models;        // order and user models
pub mod observability;
pub mod serializers;   // read-side field hooks
pub mod traits;        // unified abstractions
