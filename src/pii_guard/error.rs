// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for PII Guard

use thiserror::Error;

/// Errors raised at the crate boundary
///
/// Detection, masking, and highlighting never fail; only parsing of
/// externally supplied values does.
#[derive(Debug, Error)]
pub enum PiiError {
    /// Settings payload is not valid JSON
    #[error("Invalid detector settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// Category key outside the six supported types
    #[error("Unknown PII type: {0}")]
    UnknownPiiType(String),
}

pub type Result<T> = std::result::Result<T, PiiError>;
