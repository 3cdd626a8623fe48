// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Regex patterns for PII detection
// Passes run in a fixed order; earlier passes win overlapping spans

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::config::{DetectorConfig, PiiType};

// Word boundaries are ASCII-only, so a digit run right after a non-ASCII
// letter (CJK, accented Latin) still starts a word.

// Strict SSN (XXX-XX-XXXX with hyphen or space separators)
static STRICT_SSN: Lazy<Option<Regex>> = Lazy::new(|| {
    build(
        r"(?-u:\b)[0-9]{3}[-\s][0-9]{2}[-\s][0-9]{4}(?-u:\b)",
        false,
    )
});

// Email address; case folding stays within ASCII
static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| build(r"(?-u:\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b)", true));

// US phone number, optional +1 / 1 prefix
static PHONE: Lazy<Option<Regex>> = Lazy::new(|| {
    build(
        r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}(?-u:\b)",
        false,
    )
});

// 13-16 digits, optionally grouped by space or hyphen
static CREDIT_CARD: Lazy<Option<Regex>> =
    Lazy::new(|| build(r"(?-u:\b(?:[0-9][ -]?){13,16}\b)", false));

// Bare 9-digit number (SSN, passport, or license)
static NINE_DIGIT: Lazy<Option<Regex>> = Lazy::new(|| build(r"(?-u:\b[0-9]{9}\b)", false));

// Uppercase alphanumeric ID token
static ALPHANUMERIC_ID: Lazy<Option<Regex>> =
    Lazy::new(|| build(r"(?-u:\b[A-Z0-9]{6,12}\b)", false));

// A pattern that fails to compile disables its pass instead of aborting the scan.
fn build(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| tracing::error!(pattern, error = %e, "Failed to compile PII pattern"))
        .ok()
}

/// One detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    StrictSsn,
    Email,
    Phone,
    CreditCard,
    NineDigit,
    AlphanumericId,
}

impl Pass {
    /// Precedence order: a span claimed by an earlier pass is never reassigned
    pub const ORDER: [Pass; 6] = [
        Pass::StrictSsn,
        Pass::Email,
        Pass::Phone,
        Pass::CreditCard,
        Pass::NineDigit,
        Pass::AlphanumericId,
    ];

    pub fn regex(&self) -> Option<&'static Regex> {
        let regex: &'static Lazy<Option<Regex>> = match self {
            Pass::StrictSsn => &STRICT_SSN,
            Pass::Email => &EMAIL,
            Pass::Phone => &PHONE,
            Pass::CreditCard => &CREDIT_CARD,
            Pass::NineDigit => &NINE_DIGIT,
            Pass::AlphanumericId => &ALPHANUMERIC_ID,
        };
        (**regex).as_ref()
    }

    /// Whether the pass can produce any hit under `config`
    pub fn is_active(&self, config: &DetectorConfig) -> bool {
        match self {
            Pass::StrictSsn => config.ssn,
            Pass::Email => config.email,
            Pass::Phone => config.phone,
            Pass::CreditCard => config.credit_card,
            Pass::NineDigit => config.ssn || config.passport || config.drivers_license,
            Pass::AlphanumericId => config.drivers_license,
        }
    }

    /// Category and confidence for passes that do not consult context
    pub fn fixed_assignment(&self) -> Option<(PiiType, u8)> {
        match self {
            Pass::StrictSsn => Some((PiiType::Ssn, 10)),
            Pass::Email => Some((PiiType::Email, 10)),
            Pass::Phone => Some((PiiType::Phone, 5)),
            Pass::CreditCard => Some((PiiType::CreditCard, 10)),
            Pass::NineDigit | Pass::AlphanumericId => None,
        }
    }

    /// Post-match filter applied before a candidate is considered
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Pass::Phone => is_valid_phone(candidate),
            Pass::CreditCard => is_valid_credit_card(candidate),
            Pass::AlphanumericId => !is_all_letters(candidate),
            Pass::StrictSsn | Pass::Email | Pass::NineDigit => true,
        }
    }
}

/// At least 10 digits once formatting is removed
pub fn is_valid_phone(candidate: &str) -> bool {
    candidate.chars().filter(|c| c.is_ascii_digit()).count() >= 10
}

/// 13 to 16 characters once hyphens and whitespace are removed
///
/// Length only; there is no Luhn check.
pub fn is_valid_credit_card(candidate: &str) -> bool {
    let stripped = candidate
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .count();
    (13..=16).contains(&stripped)
}

fn is_all_letters(candidate: &str) -> bool {
    candidate.chars().all(|c| c.is_ascii_uppercase())
}
