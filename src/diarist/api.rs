//! # API Facade
//!
//! The single entry point for every diarist client. It dispatches to the
//! command layer, fills in configured defaults and returns structured
//! `Result<CmdResult>` values. No business logic, no I/O, no presentation.
//!
//! `DiaryApi<S: KeyValueStore>` is generic over storage:
//! - Production: `DiaryApi<FileStore>`
//! - Testing: `DiaryApi<InMemoryStore>`
//!
//! Operations on a diary's contents take its id and check that the diary
//! exists. Gating those operations behind [`DiaryApi::unlock`] is the
//! client's job, the same way a UI shows the detail view only after the PIN
//! prompt.

use std::path::PathBuf;

use crate::canvas::{Canvas, StrokeStyle};
use crate::capture::DrawingCapture;
use crate::commands::{self, helpers};
use crate::config::DiaristConfig;
use crate::error::Result;
use crate::model::{DiaryRecord, EntryKind, Theme};
use crate::render::{EntryOrder, RenderOptions};
use crate::store::KeyValueStore;

pub struct DiaryApi<S: KeyValueStore> {
    store: S,
    paths: commands::DiaristPaths,
    config: DiaristConfig,
}

impl<S: KeyValueStore> DiaryApi<S> {
    pub fn new(store: S, paths: commands::DiaristPaths, config: DiaristConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    /// Creates a diary; an empty color falls back to the configured default.
    pub fn create_diary(&mut self, title: &str, color: Option<&str>, pin: &str) -> Result<CmdResult> {
        let color = match color.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => self.config.default_color.clone(),
        };
        commands::create::run(&mut self.store, title, &color, pin)
    }

    pub fn list_diaries(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    /// Resolves a selector (id, list position or title) without unlocking.
    pub fn find_diary(&self, selector: &str) -> Result<DiaryRecord> {
        helpers::resolve_diary(&self.store, selector)
    }

    pub fn unlock(&self, diary_id: &str, pin: &str) -> Result<CmdResult> {
        commands::unlock::run(&self.store, diary_id, pin)
    }

    /// The detail view of a diary, unlocked with `pin`.
    pub fn open_diary(&self, diary_id: &str, pin: &str, order: Option<EntryOrder>) -> Result<CmdResult> {
        commands::view::run(&self.store, diary_id, pin, &self.render_options(order))
    }

    pub fn entries(&self, diary_id: &str, order: Option<EntryOrder>) -> Result<CmdResult> {
        helpers::find_diary(&self.store, diary_id)?;
        commands::entries::run(&self.store, diary_id, &self.render_options(order))
    }

    /// Appends `text` trimmed, the way a text box submits it.
    pub fn add_text(&mut self, diary_id: &str, text: &str) -> Result<CmdResult> {
        helpers::find_diary(&self.store, diary_id)?;
        commands::append::run(&mut self.store, diary_id, EntryKind::Text, text.trim())
    }

    pub fn add_drawing(
        &mut self,
        diary_id: &str,
        script: &str,
        display_size: Option<(f32, f32)>,
    ) -> Result<CmdResult> {
        helpers::find_diary(&self.store, diary_id)?;
        let steps = commands::draw::parse_script(script)?;
        commands::draw::run(
            &mut self.store,
            diary_id,
            &steps,
            Canvas::from_config(&self.config),
            StrokeStyle::from_config(&self.config),
            display_size,
        )
    }

    /// Commits an interactive surface obtained from [`DiaryApi::new_capture`].
    pub fn commit_drawing(&mut self, diary_id: &str, capture: &mut DrawingCapture) -> Result<CmdResult> {
        helpers::find_diary(&self.store, diary_id)?;
        let entry = capture.commit(&mut self.store, diary_id)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Drawing saved."));
        Ok(result.with_affected_entries(vec![entry]))
    }

    /// One entry per file, for `image` or `audio`.
    pub fn add_media(&mut self, diary_id: &str, kind: EntryKind, files: &[PathBuf]) -> Result<CmdResult> {
        helpers::find_diary(&self.store, diary_id)?;
        commands::upload::run(&mut self.store, diary_id, kind, files)
    }

    /// A blank drawing surface sized and styled from the configuration.
    pub fn new_capture(&self) -> DrawingCapture {
        DrawingCapture::new(
            Canvas::from_config(&self.config),
            StrokeStyle::from_config(&self.config),
        )
    }

    pub fn theme(&mut self, action: ThemeAction) -> Result<CmdResult> {
        commands::theme::run(&mut self.store, action)
    }

    pub fn current_theme(&self) -> Result<Theme> {
        commands::theme::current(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn settings(&self) -> &DiaristConfig {
        &self.config
    }

    fn render_options(&self, order: Option<EntryOrder>) -> RenderOptions {
        let configured = if self.config.newest_first {
            EntryOrder::NewestFirst
        } else {
            EntryOrder::OldestFirst
        };
        RenderOptions {
            time_format: self.config.time_format.clone(),
            order: order.unwrap_or(configured),
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::theme::ThemeAction;
pub use commands::{CmdMessage, CmdResult, DiaristPaths, MessageLevel};
