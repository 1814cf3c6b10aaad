// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the binder builder.

use thiserror::Error;

/// Top-level error type for all binder operations.
#[derive(Debug, Error)]
pub enum BinderError {
    // -- Input validation --
    #[error("binder is not ready: {}", .0.join("; "))]
    NotReady(Vec<String>),

    #[error("attachment {name} is not a readable PDF: {detail}")]
    InvalidAttachment { name: String, detail: String },

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("font loading failed: {0}")]
    FontError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BinderError>;
