// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for individual mixin events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Mixin applied successfully.
///
/// # Log Level
/// `trace!` - Fine-grained pipeline step
pub struct MixinApplied<'a> {
    pub model: &'a str,
    pub mixin_id: &'a str,
    /// Whether the closure came from the entity's memo.
    pub from_memo: bool,
}

impl Display for MixinApplied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let source = if self.from_memo { "memo" } else { "list" };
        write!(f, "Mixin '{}' applied to '{}' (from {})", self.mixin_id, self.model, source)
    }
}

impl StructuredLog for MixinApplied<'_> {
    fn log(&self) {
        tracing::trace!(
            model = self.model,
            mixin_id = self.mixin_id,
            from_memo = self.from_memo,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "mixin",
            span_name = name,
            model = self.model,
            mixin_id = self.mixin_id,
            from_memo = self.from_memo,
        )
    }
}

/// A stateful mixin installed its closure in an entity's memo.
///
/// # Log Level
/// `debug!`
///
/// # Example
/// ```
/// use entity_mixins::observability::messages::mixin::MemoInstalled;
///
/// let msg = MemoInstalled {
///     model: "user",
///     mixin_id: "hashPasswords(password)",
/// };
///
/// assert_eq!(msg.to_string(), "Installed 'hashPasswords(password)' in 'user' memo");
/// ```
pub struct MemoInstalled<'a> {
    pub model: &'a str,
    pub mixin_id: &'a str,
}

impl Display for MemoInstalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Installed '{}' in '{}' memo", self.mixin_id, self.model)
    }
}

impl StructuredLog for MemoInstalled<'_> {
    fn log(&self) {
        tracing::debug!(model = self.model, mixin_id = self.mixin_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "memo_installed",
            span_name = name,
            model = self.model,
            mixin_id = self.mixin_id,
        )
    }
}

/// Properties replaced by an encrypt/hash collaborator.
///
/// # Log Level
/// `debug!`
pub struct PropertiesTransformed<'a> {
    pub model: &'a str,
    pub mixin_id: &'a str,
    pub fields: &'a [&'a str],
}

impl Display for PropertiesTransformed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Mixin '{}' transformed {} properties of '{}': {}",
            self.mixin_id,
            self.fields.len(),
            self.model,
            self.fields.join(", ")
        )
    }
}

impl StructuredLog for PropertiesTransformed<'_> {
    fn log(&self) {
        tracing::debug!(
            model = self.model,
            mixin_id = self.mixin_id,
            field_count = self.fields.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "properties_transformed",
            span_name = name,
            model = self.model,
            mixin_id = self.mixin_id,
        )
    }
}
