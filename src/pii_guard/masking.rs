// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Masking of detected PII for logs and reports

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use uuid::Uuid;

use super::config::PiiType;
use super::detector::PiiHit;

/// Display-safe form of a raw match
///
/// * SSN: `XXX-XX-` and the last 4 digits
/// * credit card: `XXXX-XXXX-XXXX-` and the last 4 digits
/// * anything else: first 2 and last 2 characters around `***`, or just
///   `***` for values of 4 characters or fewer
pub fn mask(raw: &str, pii_type: PiiType) -> String {
    match pii_type {
        PiiType::Ssn => format!("XXX-XX-{}", last_digits(raw, 4)),
        PiiType::CreditCard => format!("XXXX-XXXX-XXXX-{}", last_digits(raw, 4)),
        _ => {
            let chars: Vec<char> = raw.chars().collect();
            if chars.len() > 4 {
                let head: String = chars[..2].iter().collect();
                let tail: String = chars[chars.len() - 2..].iter().collect();
                format!("{}***{}", head, tail)
            } else {
                "***".to_string()
            }
        }
    }
}

fn last_digits(raw: &str, n: usize) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits[digits.len().saturating_sub(n)..].iter().collect()
}

/// How a hit is rewritten by [`redact_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaskingStrategy {
    #[default]
    Partial, // Type-aware mask (e.g., XXX-XX-6789)
    Redact,   // Replace with the redaction text
    Hash,     // Replace with hash (e.g., [HASH:abc12345])
    Tokenize, // Replace with token (e.g., [TOKEN:xyz78901])
    Remove,   // Remove entirely
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionOptions {
    pub strategy: MaskingStrategy,
    pub redaction_text: String,
}

impl Default for RedactionOptions {
    fn default() -> Self {
        Self {
            strategy: MaskingStrategy::Partial,
            redaction_text: "[REDACTED]".to_string(),
        }
    }
}

/// Rewrite every hit in `text` according to `options`
///
/// Hits must come from a scan of this same `text`. Returns the input
/// borrowed when there is nothing to rewrite.
pub fn redact_text<'a>(
    text: &'a str,
    hits: &[PiiHit],
    options: &RedactionOptions,
) -> Cow<'a, str> {
    if hits.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut ordered: Vec<&PiiHit> = hits
        .iter()
        .filter(|hit| text.get(hit.range()) == Some(hit.value.as_str()))
        .collect();
    if ordered.is_empty() {
        return Cow::Borrowed(text);
    }

    // Back to front so earlier offsets stay valid
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = text.to_string();
    for hit in ordered {
        let replacement = apply_mask_strategy(&hit.value, hit.pii_type, options);
        result.replace_range(hit.range(), &replacement);
    }

    Cow::Owned(result)
}

fn apply_mask_strategy(value: &str, pii_type: PiiType, options: &RedactionOptions) -> String {
    match options.strategy {
        MaskingStrategy::Partial => mask(value, pii_type),
        MaskingStrategy::Redact => options.redaction_text.clone(),
        MaskingStrategy::Hash => hash_mask(value),
        MaskingStrategy::Tokenize => tokenize_mask(),
        MaskingStrategy::Remove => String::new(),
    }
}

/// Hash masking using SHA256
fn hash_mask(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("[HASH:{}]", &format!("{:x}", result)[..8])
}

/// Tokenize using UUID v4
fn tokenize_mask() -> String {
    let token = Uuid::new_v4();
    format!("[TOKEN:{}]", &token.simple().to_string()[..8])
}
