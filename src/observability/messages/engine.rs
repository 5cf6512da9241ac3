// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Pipeline start (create or update)
//! * Pipeline completion
//! * Pipeline failure and the mixin that aborted it

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline run started.
///
/// # Log Level
/// `debug!` - Per-mutation event
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::engine::PipelineStarted;
///
/// let msg = PipelineStarted {
///     model: "order",
///     mode: "update",
///     mixin_count: 5,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PipelineStarted<'a> {
    pub model: &'a str,
    pub mode: &'a str,
    pub mixin_count: usize,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Applying {} mixins to '{}' ({})",
            self.mixin_count, self.model, self.mode
        )
    }
}

impl StructuredLog for PipelineStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            model = self.model,
            mode = self.mode,
            mixin_count = self.mixin_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pipeline",
            span_name = name,
            model = self.model,
            mode = self.mode,
            mixin_count = self.mixin_count,
        )
    }
}

/// Pipeline run completed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::engine::PipelineCompleted;
/// use std::time::Duration;
///
/// let msg = PipelineCompleted {
///     model: "order",
///     mode: "create",
///     memo_size: 3,
///     duration: Duration::from_micros(40),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineCompleted<'a> {
    pub model: &'a str,
    pub mode: &'a str,
    pub memo_size: usize,
    pub duration: std::time::Duration,
}

impl Display for PipelineCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' {} completed: memo_size={}, duration={:?}",
            self.model, self.mode, self.memo_size, self.duration
        )
    }
}

impl StructuredLog for PipelineCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            model = self.model,
            mode = self.mode,
            memo_size = self.memo_size,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_completed",
            span_name = name,
            model = self.model,
            mode = self.mode,
            memo_size = self.memo_size,
        )
    }
}

/// Pipeline run aborted by a mixin.
///
/// # Log Level
/// `warn!` - Rejected mutation; the caller decides what happens next
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::engine::PipelineFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = PipelineFailed {
///     model: "order",
///     mode: "update",
///     mixin_id: "validateProperties(orderStatus)",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct PipelineFailed<'a> {
    pub model: &'a str,
    pub mode: &'a str,
    pub mixin_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' {} aborted by '{}': {}",
            self.model, self.mode, self.mixin_id, self.error
        )
    }
}

impl StructuredLog for PipelineFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            model = self.model,
            mode = self.mode,
            mixin_id = self.mixin_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "pipeline_failed",
            span_name = name,
            model = self.model,
            mode = self.mode,
            mixin_id = self.mixin_id,
        )
    }
}
