use std::collections::BTreeMap;

use serde::Serialize;

use crate::comment::Comment;

/// One row of an event table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Webhook {
    pub id: String,
    pub event: String,
    pub trigger: Comment,
    pub related_method: Comment,
    /// The same event was already declared by an earlier, non-reference row.
    pub repeated: bool,
}

impl Webhook {
    /// Rows whose trigger only points at another event's description.
    pub fn is_ref(&self) -> bool {
        self.trigger.content.starts_with("See")
    }
}

/// Top-level section of the catalog. Webhooks are keyed by version label;
/// the empty label holds the unversioned table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookGroup {
    pub title: String,
    pub description: Comment,
    pub webhooks: BTreeMap<String, Vec<Webhook>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub groups: Vec<WebhookGroup>,
}

/// Flat view of one parsed event, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry<'a> {
    pub group: &'a str,
    pub version: &'a str,
    pub id: &'a str,
    pub event: &'a str,
    pub repeated: bool,
    pub reference: bool,
}

impl Document {
    pub fn events(&self) -> Vec<EventEntry<'_>> {
        let mut entries = Vec::new();
        for group in &self.groups {
            for (version, webhooks) in &group.webhooks {
                for webhook in webhooks {
                    entries.push(EventEntry {
                        group: &group.title,
                        version,
                        id: &webhook.id,
                        event: &webhook.event,
                        repeated: webhook.repeated,
                        reference: webhook.is_ref(),
                    });
                }
            }
        }
        entries
    }

    pub fn webhook_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| group.webhooks.values())
            .map(Vec::len)
            .sum()
    }
}
