// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Entities, patches and the per-entity mixin memo.
//!
//! An [`Entity`] is immutable once built: every transformation consumes it and
//! hands back a new value. It carries a [`MixinMemo`] recording which stateful
//! mixins have already run for its lineage. The memo travels with clones and
//! merges, but never appears in equality, `Debug` or serialized output.

mod entity;
mod memo;
mod patch;
mod wire;

pub use entity::Entity;
pub use memo::{MixinId, MixinMemo};
pub use patch::Patch;
