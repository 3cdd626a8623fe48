// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Keyword context classification for ambiguous identifiers

use std::ops::Range;

use super::config::{DetectorConfig, PiiType};

/// Characters inspected on each side of a match
pub const CONTEXT_RADIUS: usize = 30;

const PASSPORT_KEYWORDS: &[&str] = &["passport"];
const SSN_KEYWORDS: &[&str] = &["social", "ssn", "security"];
const LICENSE_KEYWORDS: &[&str] = &["license", "driving", "driver"];
const ID_LICENSE_KEYWORDS: &[&str] = &["license", "driver", "dl"];

/// Lower-cased text around `span`, clamped to the bounds of `text`
///
/// The window covers up to [`CONTEXT_RADIUS`] characters before the span
/// start and after the span end, and includes the span itself.
pub fn context_window(text: &str, span: Range<usize>) -> String {
    let end = span.end.min(text.len());
    let start = span.start.min(end);

    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS - 1)
        .map_or(0, |(idx, _)| idx);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_RADIUS)
        .map_or(text.len(), |(idx, _)| end + idx);

    text[from..to].to_lowercase()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Assign a bare 9-digit number to a category
///
/// Checks run in priority order and each one only fires when its category
/// is enabled. Without a keyword the number falls back to a confidence-1
/// SSN, then a confidence-1 passport.
pub fn classify_nine_digit(context: &str, config: &DetectorConfig) -> Option<(PiiType, u8)> {
    if config.passport && contains_any(context, PASSPORT_KEYWORDS) {
        Some((PiiType::Passport, 10))
    } else if config.ssn && contains_any(context, SSN_KEYWORDS) {
        Some((PiiType::Ssn, 9))
    } else if config.drivers_license && contains_any(context, LICENSE_KEYWORDS) {
        Some((PiiType::DriversLicense, 8))
    } else if config.ssn {
        Some((PiiType::Ssn, 1))
    } else if config.passport {
        Some((PiiType::Passport, 1))
    } else {
        None
    }
}

/// Assign an alphanumeric token to the driver's-license category
///
/// Explicit context wins; otherwise only mixed letter/digit tokens count.
pub fn classify_alphanumeric(
    token: &str,
    context: &str,
    config: &DetectorConfig,
) -> Option<(PiiType, u8)> {
    if !config.drivers_license {
        return None;
    }

    if contains_any(context, ID_LICENSE_KEYWORDS) {
        return Some((PiiType::DriversLicense, 10));
    }

    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let has_letter = token.chars().any(|c| c.is_ascii_alphabetic());
    if has_digit && has_letter {
        Some((PiiType::DriversLicense, 5))
    } else {
        None
    }
}
