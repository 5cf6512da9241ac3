// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::CryptoError;

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field hook failed to map its value.
    #[error("hook for '{field}' failed: {source}")]
    Hook {
        field: String,
        #[source]
        source: CryptoError,
    },
}
