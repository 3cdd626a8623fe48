// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Rule-based PII detection for wiki page content
// Detects, masks, and highlights six kinds of personal identifiers

pub mod pii_guard;

#[cfg(feature = "python")]
mod python;

pub use pii_guard::{
    aggregate::AggregatedFinding,
    config::{DetectorConfig, PiiType},
    detector::{detect, scan, PiiDetector, PiiHit},
    error::PiiError,
    highlight::highlight,
    masking::mask,
};
