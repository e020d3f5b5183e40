//! Patterns applied to extracted regions.

use std::sync::LazyLock;

use regex::Regex;

use crate::comment::{collapse_whitespace, RawText};
use crate::error::{ParseError, ParseResult};
use crate::ident::derive_identifier;
use crate::model::Webhook;

#[allow(clippy::unwrap_used)]
static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h2\b[^>]*>(?:.*</(?:a|div)\s*>)?\s*([^<>]+?)\s*</h2\s*>").unwrap()
});

#[allow(clippy::unwrap_used)]
static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p>\s*(.+)\s*</p>").unwrap());

#[allow(clippy::unwrap_used)]
static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h3\b[^>]*>(?:.*</(?:a|div)\s*>)?\s*([^<>]+?)\s*</h3\s*>").unwrap()
});

#[allow(clippy::unwrap_used)]
static RE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tr\b[^>]*>.*?</tr\s*>").unwrap());

#[allow(clippy::unwrap_used)]
static RE_WEBHOOK_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)<tr\b[^>]*>\s*",
        r"<td\b[^>]*>\s*<code\b[^>]*>\s*([^<\s]+)\s*</code\s*>\s*</td\s*>\s*",
        r"<td\b[^>]*>\s*(.+?)\s*</td\s*>\s*",
        r"<td\b[^>]*>\s*(.*?)\s*</td\s*>",
    ))
    .unwrap()
});

fn first_capture<'a>(re: &Regex, pattern: &'static str, text: &'a str) -> ParseResult<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseError::NotFound { pattern })
}

/// Heading text of a group, with the permalink markup stripped.
pub fn parse_title(region: &str) -> ParseResult<&str> {
    first_capture(&RE_TITLE, "group title", region)
}

/// Paragraph text with whitespace collapsed and one trailing colon removed.
pub fn parse_description(region: &str) -> ParseResult<String> {
    let raw = first_capture(&RE_DESCRIPTION, "group description", region)?;
    let mut text = collapse_whitespace(RawText::new(raw).as_str());
    if text.ends_with(':') {
        text.pop();
    }
    Ok(text)
}

pub fn parse_version(region: &str) -> ParseResult<&str> {
    first_capture(&RE_VERSION, "version label", region)
}

/// Splits a table body into rows. Every row must match the three-column
/// layout; one bad row fails the whole table.
pub fn parse_webhooks(region: &str, doc_base_url: &str) -> ParseResult<Vec<Webhook>> {
    RE_ROW
        .find_iter(region)
        .enumerate()
        .map(|(index, row)| {
            parse_webhook(row.as_str(), doc_base_url)
                .map_err(|err| match err {
                    ParseError::NotFound { .. } => ParseError::MalformedRow { index },
                    other => other,
                })
        })
        .collect()
}

pub fn parse_webhook(row: &str, doc_base_url: &str) -> ParseResult<Webhook> {
    let caps = RE_WEBHOOK_ROW.captures(row).ok_or(ParseError::NotFound {
        pattern: "webhook row",
    })?;
    let event = &caps[1];

    Ok(Webhook {
        id: derive_identifier(event)?,
        event: event.to_string(),
        trigger: RawText::new(&caps[2])
            .replace_anchored_code()
            .replace_code()
            .collapse_whitespace()
            .into_comment(doc_base_url),
        related_method: RawText::new(&caps[3])
            .replace_code()
            .collapse_whitespace()
            .into_comment(doc_base_url),
        repeated: false,
    })
}
