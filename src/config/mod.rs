// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod bound;
mod entry_points;
mod event_chain;
mod graph;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod integration_tests;

pub use bound::BoundPorts;
pub use entry_points::EntryPoints;
pub use event_chain::EventChain;
pub use graph::PortGraph;
pub use loader::{
    load_and_validate_config, load_config, parse_config, ConfigFormat, Direction, PortConfig,
    PortSpec,
};
pub use registry::CallbackRegistry;
pub use validation::{timeout_callbacks_without_timeout, validate_port_config};
