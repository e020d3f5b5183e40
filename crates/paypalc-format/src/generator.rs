//! Go source rendering of the parsed catalog.

use std::path::Path;

use paypalc_core::{Comment, Link, Webhook, WebhookGroup};
use tracing::debug;

use crate::output::{write_generated, WriteError};
use crate::wrap::wrap;

pub const DEFAULT_PACKAGE: &str = "paypal";
pub const DEFAULT_CATALOG_URL: &str = "https://developer.paypal.com/api/rest/webhooks/event-names/";
pub const MAX_COLUMN: usize = 100;
pub const TAB_WIDTH: usize = 4;
pub const TYPE_NAME: &str = "EventType";

/// Width taken by the `// ` comment marker.
const COMMENT_MARKER_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub package: String,
    pub catalog_url: String,
    pub max_column: usize,
    pub tab_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            max_column: MAX_COLUMN,
            tab_width: TAB_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
    out: String,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Renders the header followed by every group, in order.
    pub fn build(mut self, groups: &[WebhookGroup]) -> String {
        self.append_header();
        for group in groups {
            self.append_group(group);
        }
        self.out
    }

    /// Renders everything in memory first so a failure never leaves a
    /// half-written file behind.
    pub fn write_file(self, groups: &[WebhookGroup], path: &Path) -> Result<(), WriteError> {
        let rendered = self.build(groups);
        debug!(path = %path.display(), bytes = rendered.len(), "writing generated source");
        write_generated(path, &rendered)
    }

    fn append_header(&mut self) {
        self.line(0, "// Code generated by paypalc. DO NOT EDIT.");
        let package = format!("package {}", self.options.package);
        self.line(0, &package);
        self.blank();
        self.line(0, &format!("// {TYPE_NAME} is the type of webhook."));
        self.line(0, "//");
        let see = format!("// See {}", self.options.catalog_url);
        self.line(0, &see);
        self.line(0, &format!("type {TYPE_NAME} string"));
        self.blank();
    }

    fn append_group(&mut self, group: &WebhookGroup) {
        self.blank();
        self.line(0, &format!("// {}", group.title));
        if !group.description.is_empty() {
            self.line(0, "//");
            self.append_comment(&group.description.content, &group.description.links, 0);
        }
        self.blank();

        // BTreeMap order: the unversioned "" block comes first.
        for (version, webhooks) in &group.webhooks {
            if !version.is_empty() {
                self.line(0, &format!("// {version}"));
                self.blank();
            }
            self.out.push_str("const (");
            for webhook in webhooks {
                self.append_webhook(webhook);
            }
            self.line(0, ")");
            self.blank();
        }
    }

    fn append_webhook(&mut self, webhook: &Webhook) {
        self.blank();

        // Trigger links only ever appear ahead of the related method's.
        self.append_comment(&webhook.trigger.content, &[], 1);
        self.append_related_method(&webhook.trigger, &webhook.related_method);

        let declaration = format!("{} {TYPE_NAME} = \"{}\"", webhook.id, webhook.event);
        if webhook.repeated || webhook.is_ref() {
            self.line(1, &format!("// (redeclared) {declaration}"));
        } else {
            self.line(1, &declaration);
        }
    }

    fn append_related_method(&mut self, trigger: &Comment, related: &Comment) {
        if related.is_empty() {
            return;
        }
        let links: Vec<Link> = trigger
            .links
            .iter()
            .chain(&related.links)
            .cloned()
            .collect();
        self.line(1, "//");
        let content = format!("Related method: {}", related.content);
        self.append_comment(&content, &links, 1);
    }

    fn append_comment(&mut self, content: &str, links: &[Link], indent: usize) {
        for line in wrap(content, self.comment_width(indent)) {
            self.line(indent, &format!("// {line}"));
        }
        if !links.is_empty() {
            self.line(indent, "//");
            for link in links {
                self.line(indent, &format!("// [{}]: {}", link.title, link.url));
            }
        }
    }

    fn comment_width(&self, indent: usize) -> usize {
        self.options
            .max_column
            .saturating_sub(indent * self.options.tab_width + COMMENT_MARKER_WIDTH)
    }

    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn hook(id: &str, event: &str, trigger: &str) -> Webhook {
        Webhook {
            id: id.into(),
            event: event.into(),
            trigger: Comment {
                content: trigger.into(),
                links: Vec::new(),
            },
            ..Webhook::default()
        }
    }

    fn header() -> &'static str {
        "// Code generated by paypalc. DO NOT EDIT.\n\
         package paypal\n\
         \n\
         // EventType is the type of webhook.\n\
         //\n\
         // See https://developer.paypal.com/api/rest/webhooks/event-names/\n\
         type EventType string\n\
         \n"
    }

    #[test]
    fn renders_header_only_for_empty_input() {
        let out = Generator::new(GeneratorOptions::default()).build(&[]);
        assert_eq!(out, header());
    }

    #[test]
    fn package_label_is_stamped_verbatim() {
        let options = GeneratorOptions {
            package: "events".into(),
            ..GeneratorOptions::default()
        };
        let out = Generator::new(options).build(&[]);
        assert!(out.contains("\npackage events\n"));
    }

    #[test]
    fn renders_group_with_links_and_redeclaration() {
        let mut first = hook("PaymentSaleCompleted", "PAYMENT.SALE.COMPLETED", "A sale completes.");
        first.trigger.links.push(Link {
            title: "Sale".into(),
            url: "https://developer.paypal.com/docs/sale".into(),
        });
        first.related_method = Comment {
            content: "[Show sale details]".into(),
            links: vec![Link {
                title: "Show sale details".into(),
                url: "https://developer.paypal.com/docs/api/sale".into(),
            }],
        };
        let mut second = hook("PaymentSaleCompleted", "PAYMENT.SALE.COMPLETED", "Again.");
        second.repeated = true;

        let group = WebhookGroup {
            title: "Payments".into(),
            description: Comment {
                content: "The webhooks for payments".into(),
                links: Vec::new(),
            },
            webhooks: BTreeMap::from([(String::new(), vec![first, second])]),
        };

        let out = Generator::new(GeneratorOptions::default()).build(&[group]);
        let body = out.strip_prefix(header()).unwrap();
        assert_eq!(
            body,
            "\n\
             // Payments\n\
             //\n\
             // The webhooks for payments\n\
             \n\
             const (\n\
             \t// A sale completes.\n\
             \t//\n\
             \t// Related method: [Show sale details]\n\
             \t//\n\
             \t// [Sale]: https://developer.paypal.com/docs/sale\n\
             \t// [Show sale details]: https://developer.paypal.com/docs/api/sale\n\
             \tPaymentSaleCompleted EventType = \"PAYMENT.SALE.COMPLETED\"\n\
             \n\
             \t// Again.\n\
             \t// (redeclared) PaymentSaleCompleted EventType = \"PAYMENT.SALE.COMPLETED\"\n\
             )\n\
             \n"
        );
    }

    #[test]
    fn trigger_links_dropped_without_related_method() {
        let mut only = hook("AB", "A.B", "See [elsewhere].");
        only.trigger.links.push(Link {
            title: "elsewhere".into(),
            url: "https://x.test/e".into(),
        });
        let group = WebhookGroup {
            title: "G".into(),
            webhooks: BTreeMap::from([(String::new(), vec![only])]),
            ..WebhookGroup::default()
        };

        let out = Generator::new(GeneratorOptions::default()).build(&[group]);
        assert!(out.contains("\t// See [elsewhere].\n\t// (redeclared) AB EventType = \"A.B\"\n"));
        assert!(!out.contains("https://x.test/e"));
    }

    #[test]
    fn versions_render_sorted_with_unversioned_first() {
        let group = WebhookGroup {
            title: "Orders".into(),
            webhooks: BTreeMap::from([
                ("V2".to_string(), vec![hook("B", "B", "two")]),
                (String::new(), vec![hook("A", "A", "none")]),
                ("V1".to_string(), vec![hook("C", "C", "one")]),
            ]),
            ..WebhookGroup::default()
        };

        let out = Generator::new(GeneratorOptions::default()).build(&[group]);
        let none = out.find("// none").unwrap();
        let v1 = out.find("// V1\n\nconst (").unwrap();
        let v2 = out.find("// V2\n\nconst (").unwrap();
        assert!(none < v1 && v1 < v2);
    }

    #[test]
    fn long_comments_wrap_within_column_budget() {
        let words = "word ".repeat(60);
        let group = WebhookGroup {
            title: "Wrapped".into(),
            description: Comment {
                content: words.trim_end().to_string(),
                links: Vec::new(),
            },
            webhooks: BTreeMap::from([(
                String::new(),
                vec![hook("W", "W", words.trim_end())],
            )]),
        };

        let out = Generator::new(GeneratorOptions::default()).build(&[group]);
        for line in out.lines() {
            let width = line.len() + line.matches('\t').count() * (TAB_WIDTH - 1);
            assert!(width <= MAX_COLUMN, "line too wide: {line:?}");
        }
    }
}
