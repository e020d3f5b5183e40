use tracing::{debug, trace};

use crate::comment::{Comment, RawText, DEFAULT_DOC_BASE_URL};
use crate::error::{ParseError, ParseResult, Stage};
use crate::fields::{parse_description, parse_title, parse_version, parse_webhooks};
use crate::model::{Document, Webhook, WebhookGroup};
use crate::region::{Markers, Scanner, SECTION_BOUNDARY};
use crate::tracker::DuplicateTracker;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Prefix for relative link targets found in the catalog.
    pub doc_base_url: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            doc_base_url: DEFAULT_DOC_BASE_URL.to_string(),
        }
    }
}

/// Parses the whole event catalog in one forward pass.
///
/// Any structural mismatch aborts the parse; no partial document is
/// returned.
pub fn parse_document(input: &str, options: &ParseOptions) -> ParseResult<Document> {
    let mut scanner = Scanner::new(input);
    let mut tracker = DuplicateTracker::new();
    let mut groups = Vec::new();

    while let Some(heading) = scanner.next_region(Markers::GROUP_HEADING) {
        let group = parse_group(&mut scanner, heading.text, &mut tracker, options)?;
        debug!(
            title = %group.title,
            versions = group.webhooks.len(),
            "parsed webhook group"
        );
        groups.push(group);
    }

    // A heading that is still ahead of the cursor was never closed.
    if scanner.remaining().contains(SECTION_BOUNDARY) {
        return Err(ParseError::NotFound {
            pattern: Markers::GROUP_HEADING.end,
        }
        .at(Stage::Title));
    }

    Ok(Document { groups })
}

/// Parses the regions that follow one group heading, up to the next one.
pub fn parse_group(
    scanner: &mut Scanner<'_>,
    heading: &str,
    tracker: &mut DuplicateTracker,
    options: &ParseOptions,
) -> ParseResult<WebhookGroup> {
    let title = parse_title(heading).map_err(|err| err.at(Stage::Title))?;

    let description = match scanner.next_region(Markers::PARAGRAPH) {
        Some(region) => {
            let text = parse_description(region.text).map_err(|err| err.at(Stage::Description))?;
            RawText::new(&text).into_comment(&options.doc_base_url)
        }
        None => Comment::default(),
    };

    let mut group = WebhookGroup {
        title: title.to_string(),
        description,
        ..WebhookGroup::default()
    };

    while let Some(region) = scanner.next_region(Markers::VERSION_HEADING) {
        let version = parse_version(region.text).map_err(|err| err.at(Stage::Version))?;
        let Some(table) = scanner.next_region(Markers::TABLE_BODY) else {
            debug!(version, "version heading without a table");
            break;
        };
        let webhooks = parse_table(table.text, tracker, options)?;
        debug!(version, rows = webhooks.len(), "parsed versioned table");
        group
            .webhooks
            .entry(version.to_string())
            .or_default()
            .extend(webhooks);
    }

    if let Some(table) = scanner.next_region(Markers::TABLE_BODY) {
        let webhooks = parse_table(table.text, tracker, options)?;
        debug!(rows = webhooks.len(), "parsed unversioned table");
        group.webhooks.entry(String::new()).or_default().extend(webhooks);
    }

    Ok(group)
}

fn parse_table(
    region: &str,
    tracker: &mut DuplicateTracker,
    options: &ParseOptions,
) -> ParseResult<Vec<Webhook>> {
    let mut webhooks =
        parse_webhooks(region, &options.doc_base_url).map_err(|err| err.at(Stage::Webhooks))?;
    for webhook in &mut webhooks {
        tracker.observe(webhook);
        trace!(
            event = %webhook.event,
            repeated = webhook.repeated,
            reference = webhook.is_ref(),
            "webhook"
        );
    }
    Ok(webhooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_groups() {
        let document = parse_document("", &ParseOptions::default()).unwrap();
        assert!(document.groups.is_empty());
    }

    #[test]
    fn group_without_description_or_tables() {
        let input = r#"<h2 id="a">Lonely</h2><h2 id="b">Next</h2>"#;
        let document = parse_document(input, &ParseOptions::default()).unwrap();
        assert_eq!(document.groups.len(), 2);
        assert_eq!(document.groups[0].title, "Lonely");
        assert!(document.groups[0].description.is_empty());
        assert!(document.groups[0].webhooks.is_empty());
    }

    #[test]
    fn unclosed_group_heading_fails_instead_of_truncating() {
        let input = r#"<h2 id="a">Orders</h2><h2 id="b">Payments<p>text</p><h2 id="c">Disputes</h2>"#;
        let err = parse_document(input, &ParseOptions::default()).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Title));
        assert_eq!(err.to_string(), "title: not found: </h2>");
    }

    #[test]
    fn unclosed_last_heading_fails() {
        let input = r#"<h2 id="a">Orders</h2><h2 id="b">Payments"#;
        let err = parse_document(input, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Stage {
                stage: Stage::Title,
                ..
            }
        ));
    }
}
