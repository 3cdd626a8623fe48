// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Core PII detection logic

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::aggregate::{aggregate, AggregatedFinding};
use super::claims::ClaimSet;
use super::config::{DetectorConfig, PiiType};
use super::context::{classify_alphanumeric, classify_nine_digit, context_window};
use super::masking::mask;
use super::patterns::Pass;

/// An accepted match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiHit {
    pub pii_type: PiiType,
    /// Byte offset into the scanned text
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub value: String,
    /// 0 (guess) to 10 (certain)
    pub confidence: u8,
}

impl PiiHit {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Run every enabled pass over `text` and return accepted hits in pass order
///
/// A candidate touching any offset already claimed by an earlier hit is
/// dropped, so precedence follows pass order rather than confidence.
pub fn scan(text: &str, config: &DetectorConfig) -> Vec<PiiHit> {
    let mut hits = Vec::new();
    if text.is_empty() {
        return hits;
    }

    let mut claims = ClaimSet::new();

    for pass in Pass::ORDER {
        if !pass.is_active(config) {
            continue;
        }
        let Some(regex) = pass.regex() else {
            tracing::warn!(?pass, "Skipping pass without a compiled pattern");
            continue;
        };

        for mat in regex.find_iter(text) {
            let candidate = mat.as_str();
            if !pass.accepts(candidate) {
                continue;
            }
            if claims.overlaps(&mat.range()) {
                tracing::trace!(
                    ?pass,
                    start = mat.start(),
                    "Candidate overlaps an earlier hit"
                );
                continue;
            }

            let assignment = pass.fixed_assignment().or_else(|| {
                let context = context_window(text, mat.range());
                match pass {
                    Pass::NineDigit => classify_nine_digit(&context, config),
                    _ => classify_alphanumeric(candidate, &context, config),
                }
            });
            let Some((pii_type, confidence)) = assignment else {
                continue;
            };

            if claims.try_claim(mat.range()) {
                hits.push(PiiHit {
                    pii_type,
                    start: mat.start(),
                    len: mat.len(),
                    value: candidate.to_string(),
                    confidence,
                });
            }
        }
    }

    hits
}

/// Scan `text` and roll the hits up per category
pub fn detect(text: &str, config: &DetectorConfig) -> Vec<AggregatedFinding> {
    let findings = aggregate(&scan(text, config));

    for finding in &findings {
        tracing::debug!(
            pii_type = %finding.pii_type,
            count = finding.count,
            example = %finding
                .matches
                .first()
                .map(|m| mask(m, finding.pii_type))
                .unwrap_or_default(),
            "PII detected"
        );
    }

    findings
}

/// Detector bound to one configuration
///
/// # Example
/// ```
/// use pii_guard::{DetectorConfig, PiiDetector, PiiType};
///
/// let detector = PiiDetector::new(DetectorConfig::default());
/// let findings = detector.detect("SSN: 123-45-6789");
///
/// assert_eq!(findings[0].pii_type, PiiType::Ssn);
/// assert_eq!(findings[0].matches, vec!["123-45-6789"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PiiDetector {
    config: DetectorConfig,
    max_input_bytes: Option<usize>,
}

impl PiiDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            max_input_bytes: None,
        }
    }

    /// Only scan the first `limit` bytes of each input
    ///
    /// The cut is moved back to the nearest char boundary.
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn scan(&self, text: &str) -> Vec<PiiHit> {
        scan(self.bounded(text), &self.config)
    }

    pub fn detect(&self, text: &str) -> Vec<AggregatedFinding> {
        detect(self.bounded(text), &self.config)
    }

    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        match self.max_input_bytes {
            Some(limit) if text.len() > limit => {
                let mut cut = limit;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                tracing::warn!(
                    input_bytes = text.len(),
                    scanned_bytes = cut,
                    "Input exceeds scan limit; truncating"
                );
                &text[..cut]
            }
            _ => text,
        }
    }
}
