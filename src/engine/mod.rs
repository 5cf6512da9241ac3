// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod runner;
#[cfg(test)]
pub mod integration_tests;

pub use runner::PipelineRunner;
