//! Shared test harness utilities for paypalc crates.
//!
//! [`CatalogBuilder`] writes markup shaped like the event-names page:
//! permalink-decorated headings, description paragraphs and three-column
//! event tables.

/// One event table row: event code, trigger cell, related-method cell.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub event: &'a str,
    pub trigger: &'a str,
    pub related: &'a str,
}

pub fn row<'a>(event: &'a str, trigger: &'a str, related: &'a str) -> Row<'a> {
    Row {
        event,
        trigger,
        related,
    }
}

#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    html: String,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            html: String::from("<html>\n<body>\n<h1>Webhook event names</h1>\n"),
        }
    }

    pub fn group(mut self, title: &str) -> Self {
        let anchor = slug(title);
        self.html.push_str(&format!(
            "<h2 style=\"position: relative\">\n  <a href=\"#{anchor}\" aria-label=\"{anchor} permalink\" class=\"anchor before\">\n    <svg aria-hidden=\"true\" viewBox=\"0 0 16 16\" width=\"16\"></svg>\n  </a>\n  <div class=\"hidden-anchor\" id=\"{anchor}\"></div>\n  {title}\n</h2>\n"
        ));
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.html.push_str(&format!("<p>\n  {text}\n</p>\n"));
        self
    }

    pub fn version(mut self, label: &str) -> Self {
        let anchor = slug(label);
        self.html.push_str(&format!(
            "<h3 style=\"position: relative\">\n  <a href=\"#{anchor}\" class=\"anchor before\">\n    <svg aria-hidden=\"true\" width=\"16\"><path fill-rule=\"evenodd\"></path></svg>\n  </a>\n  <div class=\"hidden-anchor\" id=\"{anchor}\"></div>\n  {label}\n</h3>\n"
        ));
        self
    }

    pub fn table(mut self, rows: &[Row<'_>]) -> Self {
        self.html.push_str(
            "<table>\n<thead>\n<tr><th>Event</th><th>Trigger</th><th>Related method</th></tr>\n</thead>\n<tbody>\n",
        );
        for row in rows {
            self.html.push_str(&format!(
                "<tr>\n  <td>\n    <code class=\"language-text\">{}</code>\n  </td>\n  <td>\n    {}\n  </td>\n  <td>\n    {}\n  </td>\n</tr>\n",
                row.event, row.trigger, row.related
            ));
        }
        self.html.push_str("</tbody>\n</table>\n");
        self
    }

    /// Appends markup verbatim, for malformed-input cases.
    pub fn raw(mut self, markup: &str) -> Self {
        self.html.push_str(markup);
        self
    }

    pub fn build(mut self) -> String {
        self.html.push_str("</body>\n</html>\n");
        self.html
    }
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Two groups, two versions in the first, a repeated event across groups.
pub fn two_group_catalog() -> String {
    CatalogBuilder::new()
        .group("Checkout")
        .description("The webhooks for orders correspond to both supported versions of the Orders\n  API:")
        .version("V2")
        .table(&[
            row(
                "CHECKOUT.ORDER.APPROVED",
                "A buyer approved a checkout order.",
                "<a href=\"/docs/api/orders/v2/#orders_get\">Show order details</a>",
            ),
            row(
                "CHECKOUT.ORDER.COMPLETED",
                "A checkout order is processed.",
                "",
            ),
        ])
        .version("V1")
        .table(&[row(
            "CHECKOUT.ORDER.APPROVED",
            "See <a href=\"#v2\"><code class=\"language-text\">CHECKOUT.ORDER.APPROVED</code></a> in V2.",
            "",
        )])
        .group("Payments V2")
        .table(&[
            row(
                "PAYMENT.CAPTURE.COMPLETED",
                "A payment capture completes.",
                "<a href=\"/docs/api/payments/v2/#captures_get\">Show captured payment details</a>",
            ),
            row(
                "CHECKOUT.ORDER.APPROVED",
                "A buyer approved a checkout order.",
                "",
            ),
        ])
        .build()
}
