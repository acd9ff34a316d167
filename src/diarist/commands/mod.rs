use crate::config::DiaristConfig;
use crate::model::{DiaryRecord, Entry, Theme};
use crate::render::DisplayList;
use std::path::PathBuf;

pub mod append;
pub mod config;
pub mod create;
pub mod draw;
pub mod entries;
pub mod helpers;
pub mod list;
pub mod theme;
pub mod unlock;
pub mod upload;
pub mod view;

/// Where a profile keeps its data.
#[derive(Debug, Clone)]
pub struct DiaristPaths {
    pub data_dir: PathBuf,
}

impl DiaristPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory backing the key-value storage.
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_diaries: Vec<DiaryRecord>,
    pub listed_diaries: Vec<DiaryRecord>,
    pub affected_entries: Vec<Entry>,
    pub listed_entries: Vec<Entry>,
    pub display: Option<DisplayList>,
    pub theme: Option<Theme>,
    pub config: Option<DiaristConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_diaries(mut self, diaries: Vec<DiaryRecord>) -> Self {
        self.affected_diaries = diaries;
        self
    }

    pub fn with_listed_diaries(mut self, diaries: Vec<DiaryRecord>) -> Self {
        self.listed_diaries = diaries;
        self
    }

    pub fn with_affected_entries(mut self, entries: Vec<Entry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_display(mut self, display: DisplayList) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_config(mut self, config: DiaristConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
