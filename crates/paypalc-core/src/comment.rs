//! Normalisation of the free text found in catalog rows and paragraphs.
//!
//! Raw cell markup is rewritten in a fixed order: the deprecation notice is
//! replaced as soon as the text is wrapped, then linked code terms, then the
//! remaining code spans, then whitespace, and finally hyperlinks are pulled
//! out into a reference list.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::ident::derive_identifier;

/// Base every relative documentation link is resolved against.
pub const DEFAULT_DOC_BASE_URL: &str = "https://developer.paypal.com";

#[allow(clippy::unwrap_used)]
static RE_DEPRECATION_NOTICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<strong>\s*Deprecation\s+notice\s*</strong>").unwrap());

#[allow(clippy::unwrap_used)]
static RE_ANCHORED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<a\b[^>]*>\s*<code\b[^>]*>\s*([^<\s]+)\s*</code\s*>\s*</a\s*>").unwrap()
});

#[allow(clippy::unwrap_used)]
static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code\b[^>]*>(.+?)</code\s*>").unwrap());

#[allow(clippy::unwrap_used)]
static RE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\b[^>]*?\bhref="([^"]*)"[^>]*>\s*(.*?)\s*</a\s*>"#).unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// Normalised text plus the hyperlinks that were lifted out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub content: String,
    pub links: Vec<Link>,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Text moving through the rewrite chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    text: String,
}

impl RawText {
    pub fn new(raw: &str) -> Self {
        Self {
            text: RE_DEPRECATION_NOTICE
                .replace_all(raw, "Deprecated")
                .into_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Rewrites a link whose visible text is a code span into `[Identifier]`.
    ///
    /// Only applies when the text holds exactly one such link; with several
    /// candidates the text is left for the generic code and link rewrites.
    pub fn replace_anchored_code(mut self) -> Self {
        let Some((range, identifier)) = sole_anchored_code(&self.text) else {
            return self;
        };
        self.text.replace_range(range, &format!("[{identifier}]"));
        self
    }

    /// Turns every `<code>` span into a backtick-delimited span.
    pub fn replace_code(mut self) -> Self {
        self.text = RE_CODE.replace_all(&self.text, "`${1}`").into_owned();
        self
    }

    /// Collapses runs of spaces, tabs and newlines into one space and drops
    /// leading and trailing runs.
    pub fn collapse_whitespace(mut self) -> Self {
        self.text = collapse_whitespace(&self.text);
        self
    }

    /// Lifts every remaining anchor into the link list, leaving `[title]` in
    /// its place. Relative targets are resolved against `doc_base_url`.
    pub fn into_comment(self, doc_base_url: &str) -> Comment {
        if !RE_ANCHOR.is_match(&self.text) {
            return Comment {
                content: self.text,
                links: Vec::new(),
            };
        }

        let mut links = Vec::new();
        let content = RE_ANCHOR
            .replace_all(&self.text, |caps: &regex::Captures<'_>| {
                let title = caps[2].to_string();
                let reference = format!("[{title}]");
                links.push(Link {
                    url: resolve_url(doc_base_url, &caps[1]),
                    title,
                });
                reference
            })
            .into_owned();

        Comment { content, links }
    }
}

fn sole_anchored_code(text: &str) -> Option<(Range<usize>, String)> {
    let mut candidates = RE_ANCHORED_CODE.captures_iter(text);
    let (Some(only), None) = (candidates.next(), candidates.next()) else {
        return None;
    };
    let whole = only.get(0)?;
    // A term that is not an event-like name stays an ordinary link.
    let identifier = derive_identifier(&only[1]).ok()?;
    Some((whole.range(), identifier))
}

pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if is_whitespace(ch) {
            pending_space = !collapsed.is_empty();
            continue;
        }
        if pending_space {
            collapsed.push(' ');
            pending_space = false;
        }
        collapsed.push(ch);
    }

    collapsed
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t')
}

fn resolve_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{base}{href}")
    }
}
