// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Drehwerk.

use thiserror::Error;

/// Top-level error type for all Drehwerk operations.
///
/// Only failures to reach the input (the hOCR report, the PDF, a config file)
/// are errors. Anything the orientation heuristic can absorb is reported
/// through the decision result and a log line instead.
#[derive(Debug, Error)]
pub enum DrehwerkError {
    // -- Input access --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DrehwerkError>;
