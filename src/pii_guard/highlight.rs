// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Re-insert findings into page markup as highlighted spans
//
// Only text between tags is rewritten. All literals are matched in a single
// pass over the original markup and wrappers are spliced in by offset, so
// inserted markup is never searched again.

use regex::Regex;
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::aggregate::AggregatedFinding;
use super::config::PiiType;

const HIGHLIGHT_STYLE: &str = "background-color: #fffae6; border: 1px solid #ffeb3b; padding: 1px 2px;";

/// A run of markup: either one tag or the text between tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Tag(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Tag(s) | Segment::Text(s) => s,
        }
    }
}

/// Split markup into tags (`<` through the next `>`) and text
///
/// A `<` with no closing `>` is ordinary text. Concatenating the segments
/// gives back the input.
pub fn tokenize(markup: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(lt) = markup[cursor..].find('<') {
        let open = cursor + lt;
        let Some(gt) = markup[open..].find('>') else {
            break;
        };
        let close = open + gt + 1;

        if open > text_start {
            segments.push(Segment::Text(&markup[text_start..open]));
        }
        segments.push(Segment::Tag(&markup[open..close]));
        text_start = close;
        cursor = close;
    }

    if text_start < markup.len() {
        segments.push(Segment::Text(&markup[text_start..]));
    }

    segments
}

/// Wrap one matched literal in the highlight span
pub fn wrap(text: &str, pii_type: PiiType) -> String {
    format!(
        r#"<span style="{}" title="{} Detected">{}</span>"#,
        HIGHLIGHT_STYLE,
        pii_type.as_str().to_uppercase(),
        text
    )
}

/// Highlight every literal occurrence of every finding's matches
///
/// Tags are copied through untouched. When the same literal belongs to
/// several findings, the first finding labels it; at a shared start
/// position the literal listed first wins. Returns the input borrowed when
/// nothing was wrapped.
///
/// # Example
/// ```
/// use pii_guard::{highlight, AggregatedFinding, PiiType};
///
/// let findings = vec![AggregatedFinding {
///     pii_type: PiiType::Email,
///     count: 1,
///     matches: vec!["a@b.com".to_string()],
/// }];
/// let out = highlight("<p>Email: a@b.com</p>", &findings);
///
/// assert!(out.starts_with("<p>Email: <span "));
/// assert!(out.contains(r#"title="EMAIL Detected">a@b.com</span>"#));
/// assert!(out.ends_with("</p>"));
/// ```
pub fn highlight<'a>(markup: &'a str, findings: &[AggregatedFinding]) -> Cow<'a, str> {
    if markup.is_empty() || findings.is_empty() {
        return Cow::Borrowed(markup);
    }

    let mut labels: HashMap<&str, PiiType> = HashMap::new();
    let mut literals: Vec<&str> = Vec::new();
    for finding in findings {
        for literal in finding.matches.iter().filter(|m| !m.is_empty()) {
            if let Entry::Vacant(entry) = labels.entry(literal.as_str()) {
                entry.insert(finding.pii_type);
                literals.push(literal);
            }
        }
    }
    if literals.is_empty() {
        return Cow::Borrowed(markup);
    }

    let pattern = literals
        .iter()
        .map(|literal| regex::escape(literal))
        .collect::<Vec<_>>()
        .join("|");
    let matcher = match Regex::new(&pattern) {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::warn!(
                literals = literals.len(),
                error = %e,
                "Cannot build highlight matcher"
            );
            return Cow::Borrowed(markup);
        }
    };

    let mut result = String::with_capacity(markup.len());
    let mut wrapped = 0usize;

    for segment in tokenize(markup) {
        let text = match segment {
            Segment::Tag(tag) => {
                result.push_str(tag);
                continue;
            }
            Segment::Text(text) => text,
        };

        let mut last = 0;
        for mat in matcher.find_iter(text) {
            let Some(&pii_type) = labels.get(mat.as_str()) else {
                continue;
            };
            result.push_str(&text[last..mat.start()]);
            result.push_str(&wrap(mat.as_str(), pii_type));
            last = mat.end();
            wrapped += 1;
        }
        result.push_str(&text[last..]);
    }

    if wrapped == 0 {
        return Cow::Borrowed(markup);
    }

    tracing::debug!(wrapped, "Highlighted PII in markup");
    Cow::Owned(result)
}

/// Red CONFIDENTIAL status banner listing each category and its count
pub fn render_banner(findings: &[AggregatedFinding]) -> String {
    let mut list = String::new();
    if !findings.is_empty() {
        list.push_str("<ul>");
        for finding in findings {
            list.push_str(&format!(
                "<li><strong>{}</strong>: {} detected</li>",
                finding.pii_type, finding.count
            ));
        }
        list.push_str("</ul>");
    }

    format!(
        concat!(
            "<p>",
            r#"<ac:structured-macro ac:name="status" ac:schema-version="1">"#,
            r#"<ac:parameter ac:name="title">CONFIDENTIAL</ac:parameter>"#,
            r#"<ac:parameter ac:name="colour">Red</ac:parameter>"#,
            "</ac:structured-macro>",
            "<strong> PII DETECTED - PLEASE REVIEW</strong>",
            "</p>",
            "<p>The following sensitive information was detected and highlighted:</p>",
            "{}",
            "<hr/>"
        ),
        list
    )
}

/// Banner followed by the highlighted markup: the page body to persist
pub fn annotate(markup: &str, findings: &[AggregatedFinding]) -> String {
    let mut body = render_banner(findings);
    body.push_str(&highlight(markup, findings));
    body
}
