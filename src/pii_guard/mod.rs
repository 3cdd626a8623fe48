// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PII Guard - detection engine
//
// Fixed-order regex passes with claim-based overlap arbitration:
// - Keyword context disambiguates bare numeric/alphanumeric identifiers
// - Per-category aggregation in scan order
// - Tag-aware highlighting that splices by offset

pub mod aggregate;
pub mod claims;
pub mod config;
pub mod context;
pub mod detector;
pub mod error;
pub mod highlight;
pub mod markup;
pub mod masking;
pub mod patterns;
pub mod report;

pub use detector::PiiDetector;
