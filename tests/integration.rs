// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Integration tests for the PII Guard public API

use pii_guard::pii_guard::{
    highlight::{annotate, tokenize, Segment},
    markup::extract_content_preview,
    masking::{redact_text, RedactionOptions},
    report::{PiiReport, DEFAULT_MAX_EXAMPLES, QUARANTINE_LABELS},
};
use pii_guard::{
    detect, highlight, mask, scan, AggregatedFinding, DetectorConfig, PiiDetector, PiiType,
};

fn finding(findings: &[AggregatedFinding], pii_type: PiiType) -> Option<&AggregatedFinding> {
    findings.iter().find(|f| f.pii_type == pii_type)
}

#[test]
fn test_email_and_phone_detection() {
    let findings = detect(
        "Contact: jane@example.com or call 555-123-4567",
        &DetectorConfig::default(),
    );

    let email = finding(&findings, PiiType::Email).expect("email finding");
    assert_eq!(email.count, 1);
    assert_eq!(email.matches, vec!["jane@example.com"]);

    let phone = finding(&findings, PiiType::Phone).expect("phone finding");
    assert_eq!(phone.count, 1);
    assert_eq!(phone.matches, vec!["555-123-4567"]);

    assert_eq!(findings.len(), 2);
}

#[test]
fn test_strict_ssn_detection() {
    let text = "SSN: 123-45-6789";
    let findings = detect(text, &DetectorConfig::default());
    assert_eq!(
        findings,
        vec![AggregatedFinding {
            pii_type: PiiType::Ssn,
            count: 1,
            matches: vec!["123-45-6789".to_string()],
        }]
    );

    let hits = scan(text, &DetectorConfig::default());
    assert_eq!(hits[0].confidence, 10);
}

#[test]
fn test_passport_by_keyword() {
    let findings = detect("My passport number is 123456789", &DetectorConfig::default());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].pii_type, PiiType::Passport);
    assert_eq!(findings[0].matches, vec!["123456789"]);
}

#[test]
fn test_bare_nine_digits_fall_back_to_ssn() {
    let hits = scan("123456789", &DetectorConfig::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].pii_type, PiiType::Ssn);
    assert_eq!(hits[0].confidence, 1);

    let findings = detect("123456789", &DetectorConfig::default());
    assert_eq!(findings[0].pii_type, PiiType::Ssn);
    assert_eq!(findings[0].count, 1);
}

#[test]
fn test_disabled_credit_card_not_reported() {
    let text = "Card on file: 4111 1111 1111 1111";
    let config = DetectorConfig::default().with(PiiType::CreditCard, false);
    let findings = detect(text, &config);
    assert!(finding(&findings, PiiType::CreditCard).is_none());

    let findings = detect(text, &DetectorConfig::default());
    let card = finding(&findings, PiiType::CreditCard).expect("card finding");
    assert_eq!(card.matches, vec!["4111 1111 1111 1111"]);
}

#[test]
fn test_highlight_wraps_email_only_in_text() {
    let findings = vec![AggregatedFinding {
        pii_type: PiiType::Email,
        count: 1,
        matches: vec!["a@b.com".to_string()],
    }];
    let out = highlight("<p>Email: a@b.com</p>", &findings);

    assert!(out.starts_with("<p>Email: <span "));
    assert!(out.ends_with("a@b.com</span></p>"));
    assert!(out.contains(r#"title="EMAIL Detected""#));
}

#[test]
fn test_keyword_context_priority() {
    let config = DetectorConfig::default();

    let hits = scan("Social security: 123456789", &config);
    assert_eq!((hits[0].pii_type, hits[0].confidence), (PiiType::Ssn, 9));

    let hits = scan("Driver license 123456789", &config);
    assert_eq!(
        (hits[0].pii_type, hits[0].confidence),
        (PiiType::DriversLicense, 8)
    );

    // Passport outranks the other keywords
    let hits = scan("passport (not ssn) 123456789", &config);
    assert_eq!(hits[0].pii_type, PiiType::Passport);
}

#[test]
fn test_keyword_outside_window_ignored() {
    let text = format!("passport{}123456789", " ".repeat(40));
    let hits = scan(&text, &DetectorConfig::default());
    assert_eq!((hits[0].pii_type, hits[0].confidence), (PiiType::Ssn, 1));
}

#[test]
fn test_contiguous_card_loses_tail_to_phone() {
    // The optional "1" prefix lets the phone pass claim the last 11 digits
    // first; the card candidate then overlaps and is dropped.
    let hits = scan("4111111111111111", &DetectorConfig::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].pii_type, PiiType::Phone);
    assert_eq!(hits[0].value, "11111111111");

    let config = DetectorConfig::default().with(PiiType::Phone, false);
    let hits = scan("4111111111111111", &config);
    assert_eq!(hits[0].pii_type, PiiType::CreditCard);
}

#[test]
fn test_mixed_document() {
    let text = "Employee: John Smith, SSN 987-65-4321, email john.smith@corp.example, \
                phone (555) 987-6543, license D1234567, passport 123456789.";
    let findings = detect(text, &DetectorConfig::default());
    let types: Vec<PiiType> = findings.iter().map(|f| f.pii_type).collect();

    assert_eq!(
        types,
        vec![
            PiiType::Ssn,
            PiiType::Email,
            PiiType::Phone,
            PiiType::Passport,
            PiiType::DriversLicense,
        ]
    );
    assert_eq!(
        finding(&findings, PiiType::DriversLicense).unwrap().matches,
        vec!["D1234567"]
    );
}

#[test]
fn test_detector_with_settings_json() {
    let config = DetectorConfig::from_json(r#"{"email": true, "phone": false}"#).unwrap();
    let detector = PiiDetector::new(config);
    let findings = detector.detect("jane@example.com 555-123-4567 123-45-6789");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].pii_type, PiiType::Email);
}

#[test]
fn test_page_pipeline() {
    let body = r#"<h1>Onboarding</h1><p>Reach <strong>jane@example.com</strong></p><p>SSN 123-45-6789</p>"#;

    let preview = extract_content_preview(body).expect("paragraph text");
    assert_eq!(preview, "Reach jane@example.com SSN 123-45-6789");

    let findings = detect(&preview, &DetectorConfig::default());
    assert_eq!(findings.len(), 2);

    let updated = annotate(body, &findings);
    assert!(updated.contains("PII DETECTED - PLEASE REVIEW"));
    assert!(updated.contains(r#"title="EMAIL Detected">jane@example.com</span>"#));
    assert!(updated.contains(r#"title="SSN Detected">123-45-6789</span>"#));

    // The original body's tags survive in order after the banner
    let original_tags: Vec<&str> = tokenize(body)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Tag(t) => Some(t),
            Segment::Text(_) => None,
        })
        .collect();
    let highlighted = highlight(body, &findings);
    let kept_tags: Vec<&str> = tokenize(&highlighted)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Tag(t) if !t.starts_with("<span ") && t != "</span>" => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(original_tags, kept_tags);

    let report = PiiReport::from_findings(&findings, DEFAULT_MAX_EXAMPLES);
    let json = report.to_json().unwrap();
    assert!(json.contains("XXX-XX-6789"));
    assert!(!json.contains("jane@example.com"));
    assert_eq!(QUARANTINE_LABELS, ["confidential", "pii-detected"]);
}

#[test]
fn test_redact_scanned_text() {
    let text = "Send to jane@example.com, card 4111-1111-1111-1234.";
    let hits = scan(text, &DetectorConfig::default());
    let redacted = redact_text(text, &hits, &RedactionOptions::default());
    assert_eq!(redacted, "Send to ja***om, card XXXX-XXXX-XXXX-1234.");
}

#[test]
fn test_mask_formats() {
    assert_eq!(mask("123-45-6789", PiiType::Ssn), "XXX-XX-6789");
    assert_eq!(
        mask("4111111111111234", PiiType::CreditCard),
        "XXXX-XXXX-XXXX-1234"
    );
    assert_eq!(mask("123456789", PiiType::Passport), "12***89");
    assert_eq!(mask("abcd", PiiType::Email), "***");
}

#[test]
fn test_detection_in_text_without_spaces() {
    let config = DetectorConfig::default();

    let hits = scan("社会保障号123-45-6789", &config);
    assert_eq!(hits.len(), 1);
    assert_eq!(
        (hits[0].pii_type, hits[0].value.as_str()),
        (PiiType::Ssn, "123-45-6789")
    );

    let hits = scan("护照号码123456789", &config);
    assert_eq!(hits.len(), 1);
    assert_eq!((hits[0].pii_type, hits[0].confidence), (PiiType::Ssn, 1));

    let hits = scan("passport号码123456789", &config);
    assert_eq!(hits[0].pii_type, PiiType::Passport);

    let findings = detect("电邮jane@example.com", &config);
    assert_eq!(
        findings,
        vec![AggregatedFinding {
            pii_type: PiiType::Email,
            count: 1,
            matches: vec!["jane@example.com".to_string()],
        }]
    );
}

#[test]
fn test_detection_after_accented_letters() {
    let hits = scan("Nº123-45-6789 éé123456789", &DetectorConfig::default());
    let values: Vec<(PiiType, &str)> = hits
        .iter()
        .map(|h| (h.pii_type, h.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![(PiiType::Ssn, "123-45-6789"), (PiiType::Ssn, "123456789")]
    );
}
