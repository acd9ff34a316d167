//! Entry rendering into a presentation-independent display list.
//!
//! Presentation layers bind a [`DisplayList`] to whatever they draw with: the
//! CLI prints it, [`DisplayList::to_html`] produces markup for a web view.
//! All user text is HTML-escaped before it becomes markup.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::model::{Entry, EntryKind};

pub const EMPTY_PLACEHOLDER: &str = "No entries yet.";
const FALLBACK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// chrono format string, applied in local time
    pub time_format: String,
    pub order: EntryOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            time_format: FALLBACK_TIME_FORMAT.to_string(),
            order: EntryOrder::OldestFirst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryView {
    Text {
        /// Escaped markup with `<br>` line breaks
        html: String,
        /// Raw lines for non-markup clients
        lines: Vec<String>,
    },
    Image {
        src: String,
        alt: String,
    },
    Audio {
        src: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub id: String,
    pub kind: EntryKind,
    pub label: &'static str,
    pub timestamp: String,
    pub view: EntryView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    Entry(EntryItem),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

pub fn render(entries: &[Entry], options: &RenderOptions) -> DisplayList {
    if entries.is_empty() {
        return DisplayList {
            items: vec![DisplayItem::Placeholder(EMPTY_PLACEHOLDER.to_string())],
        };
    }

    let ordered: Box<dyn Iterator<Item = &Entry>> = match options.order {
        EntryOrder::OldestFirst => Box::new(entries.iter()),
        EntryOrder::NewestFirst => Box::new(entries.iter().rev()),
    };

    DisplayList {
        items: ordered
            .map(|entry| DisplayItem::Entry(render_entry(entry, &options.time_format)))
            .collect(),
    }
}

fn render_entry(entry: &Entry, time_format: &str) -> EntryItem {
    let view = match entry.kind {
        EntryKind::Text => EntryView::Text {
            html: escape_html(&entry.content).replace('\n', "<br>"),
            lines: entry.content.lines().map(str::to_string).collect(),
        },
        EntryKind::Drawing | EntryKind::Image => EntryView::Image {
            src: entry.content.clone(),
            alt: entry.kind.label().to_string(),
        },
        EntryKind::Audio => EntryView::Audio {
            src: entry.content.clone(),
        },
    };

    EntryItem {
        id: entry.id.clone(),
        kind: entry.kind,
        label: entry.kind.label(),
        timestamp: format_timestamp(entry.created_at, time_format),
        view,
    }
}

/// Formats in local time. An unusable format string falls back to ISO-like
/// output rather than failing the whole render.
pub fn format_timestamp(timestamp: DateTime<Utc>, time_format: &str) -> String {
    let format = if is_valid_time_format(time_format) {
        time_format
    } else {
        FALLBACK_TIME_FORMAT
    };
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    timestamp
        .with_timezone(&Local)
        .format_with_items(items.into_iter())
        .to_string()
}

pub fn is_valid_time_format(time_format: &str) -> bool {
    !StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl DisplayList {
    pub fn entry_items(&self) -> impl Iterator<Item = &EntryItem> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Entry(e) => Some(e),
            DisplayItem::Placeholder(_) => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<ul class=\"entries\">\n");
        for item in &self.items {
            match item {
                DisplayItem::Placeholder(text) => {
                    html.push_str(&format!("  <li>{}</li>\n", escape_html(text)));
                }
                DisplayItem::Entry(entry) => {
                    html.push_str(&format!(
                        "  <li><strong>{}</strong> <em>({})</em><br>",
                        entry.label,
                        escape_html(&entry.timestamp)
                    ));
                    match &entry.view {
                        EntryView::Text { html: body, .. } => html.push_str(body),
                        EntryView::Image { src, alt } => html.push_str(&format!(
                            "<img src=\"{}\" alt=\"{}\" style=\"max-width:100%\">",
                            escape_html(src),
                            escape_html(alt)
                        )),
                        EntryView::Audio { src } => html.push_str(&format!(
                            "<audio controls src=\"{}\"></audio>",
                            escape_html(src)
                        )),
                    }
                    html.push_str("</li>\n");
                }
            }
        }
        html.push_str("</ul>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Entry {
        Entry::new(EntryKind::Text, content.to_string())
    }

    #[test]
    fn empty_log_renders_placeholder() {
        let list = render(&[], &RenderOptions::default());
        assert_eq!(
            list.items,
            vec![DisplayItem::Placeholder(EMPTY_PLACEHOLDER.to_string())]
        );
        assert!(list.to_html().contains("<li>No entries yet.</li>"));
    }

    #[test]
    fn script_tags_are_escaped() {
        let list = render(&[text("<script>")], &RenderOptions::default());
        let item = list.entry_items().next().unwrap();
        match &item.view {
            EntryView::Text { html, .. } => assert_eq!(html, "&lt;script&gt;"),
            other => panic!("unexpected view {:?}", other),
        }

        let html = list.to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn line_breaks_are_preserved() {
        let list = render(&[text("one\ntwo & three")], &RenderOptions::default());
        let item = list.entry_items().next().unwrap();
        assert_eq!(
            item.view,
            EntryView::Text {
                html: "one<br>two &amp; three".into(),
                lines: vec!["one".into(), "two & three".into()],
            }
        );
    }

    #[test]
    fn media_kinds_get_media_views() {
        let entries = vec![
            Entry::new(EntryKind::Drawing, "data:image/png;base64,AAAA".into()),
            Entry::new(EntryKind::Image, "data:image/jpeg;base64,BBBB".into()),
            Entry::new(EntryKind::Audio, "data:audio/mpeg;base64,CCCC".into()),
        ];
        let list = render(&entries, &RenderOptions::default());
        let labels: Vec<_> = list.entry_items().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Drawing", "Image", "Audio"]);

        let views: Vec<_> = list.entry_items().map(|e| e.view.clone()).collect();
        assert!(matches!(views[0], EntryView::Image { .. }));
        assert!(matches!(views[1], EntryView::Image { .. }));
        assert_eq!(
            views[2],
            EntryView::Audio {
                src: "data:audio/mpeg;base64,CCCC".into()
            }
        );
        assert!(list.to_html().contains("<audio controls"));
    }

    #[test]
    fn newest_first_reverses_order() {
        let entries = vec![text("first"), text("second")];
        let options = RenderOptions {
            order: EntryOrder::NewestFirst,
            ..RenderOptions::default()
        };
        let list = render(&entries, &options);
        let ids: Vec<_> = list.entry_items().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![entries[1].id.clone(), entries[0].id.clone()]);
    }

    #[test]
    fn invalid_time_format_falls_back() {
        assert!(!is_valid_time_format("%Q"));
        let entry = text("x");
        let stamp = format_timestamp(entry.created_at, "%Q");
        assert_eq!(stamp, format_timestamp(entry.created_at, FALLBACK_TIME_FORMAT));
    }

    #[test]
    fn timestamps_follow_format() {
        let entry = text("x");
        let options = RenderOptions {
            time_format: "%Y".into(),
            ..RenderOptions::default()
        };
        let list = render(&[entry.clone()], &options);
        let item = list.entry_items().next().unwrap();
        assert_eq!(
            item.timestamp,
            entry.created_at.with_timezone(&Local).format("%Y").to_string()
        );
    }
}
