// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic emitted by the pipeline and the port-graph loader goes
//! through a message struct implementing `Display` and [`messages::StructuredLog`].
//! Messages carry field names and mixin ids, never property values.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - pipeline run lifecycle
//! * `messages::mixin` - individual mixin application, transforms and memo installs
//! * `messages::port` - port binding and callback dispatch
//! * `messages::validation` - port configuration validation
//!
//! # Usage
//!
//! ```rust
//! use entity_mixins::observability::messages::{mixin::PropertiesTransformed, StructuredLog};
//!
//! let fields = ["password"];
//! let msg = PropertiesTransformed {
//!     model: "user",
//!     mixin_id: "hashPasswords(password)",
//!     fields: &fields,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
