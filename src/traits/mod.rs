// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod callback;
pub mod mixin;

pub use callback::PortCallback;
pub use mixin::{FnMixin, Guard, Mixin, Mode, MutationContext};
