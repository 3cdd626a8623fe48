// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Plain-text extraction and comment policy rewrites for page storage markup

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static PARAGRAPH: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?is)<p[^>]*>.*?</p>").ok());
static TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]+>").ok());
// A link element wrapping a user reference, on one line
static USER_MENTION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"<ac:link>.*?<ri:user.*?</ac:link>").ok());

/// Markup that replaces each user mention in a regulated comment
pub const MENTION_PLACEHOLDER: &str =
    r#"<span style="color:red; font-weight:bold;">[MENTIONS NOT ALLOWED]</span>"#;

// Decoded in this order, so "&amp;lt;" ends up as "<"
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Text content of `html` with tags removed and whitespace collapsed
pub fn strip_tags(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut text = match (*TAG).as_ref() {
        Some(tag) => tag.replace_all(html, " ").into_owned(),
        None => html.to_string(),
    };
    for (entity, decoded) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, decoded);
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain text of every `<p>` block, which is what gets scanned for PII
///
/// Returns `None` when the markup has no paragraph.
pub fn extract_content_preview(markup: &str) -> Option<String> {
    if markup.is_empty() {
        return None;
    }

    let paragraph = (*PARAGRAPH).as_ref()?;
    let blocks: Vec<&str> = paragraph.find_iter(markup).map(|m| m.as_str()).collect();
    if blocks.is_empty() {
        return None;
    }

    Some(strip_tags(&blocks.join(" ")))
}

/// Text to scan for a stored page body: the paragraph preview, or the
/// whole body with tags stripped when there are no paragraphs
pub fn content_text(markup: &str) -> String {
    extract_content_preview(markup)
        .filter(|preview| !preview.is_empty())
        .unwrap_or_else(|| strip_tags(markup))
}

/// True when comment markup references a user
pub fn has_mention(markup: &str) -> bool {
    markup.contains("ri:user") || markup.contains("ri:account-id")
}

/// Replace every linked user mention with [`MENTION_PLACEHOLDER`]
///
/// Returns the input borrowed when nothing was replaced.
pub fn redact_mentions(markup: &str) -> Cow<'_, str> {
    if !has_mention(markup) {
        return Cow::Borrowed(markup);
    }
    match (*USER_MENTION).as_ref() {
        Some(mention) => mention.replace_all(markup, MENTION_PLACEHOLDER),
        None => Cow::Borrowed(markup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<p>Email: <strong>a@b.com</strong></p>"),
            "Email: a@b.com"
        );
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(
            strip_tags("Tom&nbsp;&amp;&nbsp;Jerry &lt;3 &quot;hi&quot; it&#39;s"),
            "Tom & Jerry <3 \"hi\" it's"
        );
        assert_eq!(strip_tags("&amp;lt;"), "<");
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("  a\n\n<br/>\tb  "), "a b");
    }

    #[test]
    fn test_extract_content_preview() {
        let markup = "<h1>Title 123-45-6789</h1><p>First</p>\n<P class=\"x\">Second\nline</P>";
        assert_eq!(
            extract_content_preview(markup).as_deref(),
            Some("First Second line")
        );
    }

    #[test]
    fn test_extract_content_preview_none() {
        assert_eq!(extract_content_preview(""), None);
        assert_eq!(extract_content_preview("<h1>No paragraphs</h1>"), None);
    }

    #[test]
    fn test_content_text_prefers_paragraphs() {
        let markup = "<h1>Title</h1><p>Body a@b.com</p>";
        assert_eq!(content_text(markup), "Body a@b.com");
    }

    #[test]
    fn test_content_text_falls_back_to_stripped_body() {
        let markup = "<h1>Title</h1><ul><li>SSN 123-45-6789</li></ul>";
        assert_eq!(content_text(markup), "Title SSN 123-45-6789");
        assert_eq!(content_text("<p></p><div>x</div>"), "x");
        assert_eq!(content_text(""), "");
    }

    #[test]
    fn test_has_mention() {
        assert!(has_mention(r#"<ac:link><ri:user ri:account-id="abc"/></ac:link>"#));
        assert!(has_mention(r#"<x ri:account-id="abc"/>"#));
        assert!(!has_mention("<p>Plain comment</p>"));
    }

    #[test]
    fn test_redact_mentions() {
        let markup =
            r#"<p>Ping <ac:link><ri:user ri:account-id="abc"/></ac:link> please</p>"#;
        assert_eq!(
            redact_mentions(markup),
            format!("<p>Ping {} please</p>", MENTION_PLACEHOLDER)
        );
    }

    #[test]
    fn test_redact_every_mention() {
        let markup = concat!(
            r#"<p><ac:link><ri:user ri:account-id="a"/></ac:link> and "#,
            r#"<ac:link><ri:user ri:account-id="b"/></ac:link></p>"#
        );
        let out = redact_mentions(markup);
        assert_eq!(out.matches("[MENTIONS NOT ALLOWED]").count(), 2);
        assert!(!out.contains("ri:user"));
    }

    #[test]
    fn test_redact_mentions_noop() {
        let plain = "<p>No mentions</p>";
        assert!(matches!(redact_mentions(plain), Cow::Borrowed(_)));

        // A bare account reference outside a link is detected but left alone
        let bare = r#"<p><ri:user ri:account-id="abc"/></p>"#;
        assert!(has_mention(bare));
        assert!(matches!(redact_mentions(bare), Cow::Borrowed(_)));
    }
}
