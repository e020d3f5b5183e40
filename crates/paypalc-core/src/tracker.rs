use std::collections::HashMap;

use crate::model::Webhook;

/// Document-wide count of declared events.
///
/// Reference rows read the count to decide whether they repeat an earlier
/// declaration but never add to it.
#[derive(Debug, Clone, Default)]
pub struct DuplicateTracker {
    counts: HashMap<String, usize>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `webhook.repeated` from the count seen so far, then records the
    /// webhook unless it is a reference row.
    pub fn observe(&mut self, webhook: &mut Webhook) {
        let seen = self.count(&webhook.event);
        if !webhook.is_ref() {
            *self.counts.entry(webhook.event.clone()).or_default() += 1;
        }
        webhook.repeated = seen != 0;
    }

    pub fn count(&self, event: &str) -> usize {
        self.counts.get(event).copied().unwrap_or(0)
    }
}
