use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::generate_id;

/// A named, PIN-gated container for entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRecord {
    pub id: String,
    pub title: String,
    /// Display color token, usually `#rrggbb`.
    pub color: String,
    /// Stored in cleartext. The PIN gates navigation only.
    pub pin: String,
    pub created_at: DateTime<Utc>,
}

impl DiaryRecord {
    pub fn new(title: String, color: String, pin: String) -> Self {
        Self {
            id: generate_id(),
            title,
            color,
            pin,
            created_at: Utc::now(),
        }
    }

    pub fn entries_key(&self) -> String {
        entries_key(&self.id)
    }
}

/// Storage key of the entry log belonging to `diary_id`.
pub fn entries_key(diary_id: &str) -> String {
    format!("entries_{}", diary_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    Drawing,
    Image,
    Audio,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Text => "Text",
            EntryKind::Drawing => "Drawing",
            EntryKind::Image => "Image",
            EntryKind::Audio => "Audio",
        }
    }

    /// The top-level media type a data URL must carry for this kind.
    pub fn media_kind(&self) -> Option<&'static str> {
        match self {
            EntryKind::Text => None,
            EntryKind::Drawing | EntryKind::Image => Some("image"),
            EntryKind::Audio => Some("audio"),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryKind::Text => "text",
            EntryKind::Drawing => "drawing",
            EntryKind::Image => "image",
            EntryKind::Audio => "audio",
        };
        f.write_str(s)
    }
}

/// One immutable contribution to a diary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(kind: EntryKind, content: String) -> Self {
        Self {
            id: generate_id(),
            kind,
            content,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything other than `dark` reads as light, matching how the value was
    /// always interpreted at startup.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_type_and_camel_case() {
        let entry = Entry::new(EntryKind::Text, "Hello".into());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "Hello");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn reads_records_written_with_js_timestamps() {
        let raw = r##"[{"id":"_abc123xyz","title":"Trip","color":"#ff0000","pin":"1234","createdAt":"2024-05-01T10:20:30.123Z"}]"##;
        let diaries: Vec<DiaryRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(diaries[0].title, "Trip");
        assert_eq!(diaries[0].entries_key(), "entries__abc123xyz");
    }

    #[test]
    fn theme_defaults_to_light() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("purple")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
