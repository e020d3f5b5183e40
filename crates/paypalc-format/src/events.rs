use std::fmt;
use std::str::FromStr;

use paypalc_core::Document;

/// Output format for the parsed event inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFormat {
    #[default]
    Plain,
    Json,
}

impl fmt::Display for EventFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventFormat::Plain => "plain",
            EventFormat::Json => "json",
        })
    }
}

impl FromStr for EventFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "plain" => Ok(EventFormat::Plain),
            "json" => Ok(EventFormat::Json),
            other => Err(format!("unknown event format '{other}'")),
        }
    }
}

/// Lists every parsed event, one per line (plain) or as a JSON array.
pub fn render_events(document: &Document, format: EventFormat) -> serde_json::Result<String> {
    let events = document.events();
    match format {
        EventFormat::Json => {
            let mut out = serde_json::to_string_pretty(&events)?;
            out.push('\n');
            Ok(out)
        }
        EventFormat::Plain => {
            let mut out = String::new();
            for entry in events {
                let version = if entry.version.is_empty() {
                    "-"
                } else {
                    entry.version
                };
                let mut flags = Vec::new();
                if entry.repeated {
                    flags.push("repeated");
                }
                if entry.reference {
                    flags.push("reference");
                }
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}",
                    entry.event, entry.id, entry.group, version
                ));
                if !flags.is_empty() {
                    out.push('\t');
                    out.push_str(&flags.join(","));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}
