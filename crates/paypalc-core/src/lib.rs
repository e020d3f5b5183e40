//! Parsing of the PayPal webhook event-names page.
//!
//! The page is scanned left to right for group headings, descriptions,
//! version headings and event tables; each row becomes a [`Webhook`] with
//! normalised comments ready for code generation.

pub mod comment;
pub mod document;
pub mod error;
pub mod fields;
pub mod ident;
pub mod model;
pub mod region;
pub mod tracker;

pub use comment::{Comment, Link, RawText, DEFAULT_DOC_BASE_URL};
pub use document::{parse_document, parse_group, ParseOptions};
pub use error::{ExitCode, ParseError, ParseResult, Stage};
pub use ident::derive_identifier;
pub use model::{Document, EventEntry, Webhook, WebhookGroup};
pub use region::{find_region, Markers, Region, Scanner, SECTION_BOUNDARY};
pub use tracker::DuplicateTracker;
