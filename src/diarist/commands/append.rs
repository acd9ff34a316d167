//! Appending to a diary's entry log.
//!
//! Every append reads the whole log, pushes one entry and writes the whole
//! log back. Callers with several appends in flight must funnel them through
//! one writer (see `upload`), otherwise a later write can drop an earlier one.

use crate::canvas::Canvas;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::MAX_CANVAS_SIDE;
use crate::data_url::DataUrl;
use crate::error::{Result, ValidationError};
use crate::model::{entries_key, Entry, EntryKind};
use crate::store::{save_collection, KeyValueStore};

use image::ImageReader;
use std::io::Cursor;

use super::entries::list_entries;

pub fn run<S: KeyValueStore>(
    store: &mut S,
    diary_id: &str,
    kind: EntryKind,
    content: &str,
) -> Result<CmdResult> {
    let entry = append_entry(store, diary_id, kind, content)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} entry saved.",
        kind.label()
    )));
    Ok(result.with_affected_entries(vec![entry]))
}

pub fn append_entry<S: KeyValueStore + ?Sized>(
    store: &mut S,
    diary_id: &str,
    kind: EntryKind,
    content: &str,
) -> Result<Entry> {
    let content = validate(kind, content)?;
    let entry = Entry::new(kind, content);

    let key = entries_key(diary_id);
    let mut entries = list_entries(store, diary_id)?;
    entries.push(entry.clone());
    save_collection(store, &key, &entries)?;

    tracing::info!(
        diary = %diary_id,
        id = %entry.id,
        kind = %kind,
        total = entries.len(),
        "entry appended"
    );
    Ok(entry)
}

/// Checks content against its kind and returns what will be stored.
///
/// Content is stored exactly as given; text only has to be non-blank.
pub fn validate(kind: EntryKind, content: &str) -> Result<String> {
    let Some(expected) = kind.media_kind() else {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        return Ok(content.to_string());
    };

    if content.trim().is_empty() {
        return Err(ValidationError::EmptyPayload.into());
    }
    let url: DataUrl = content.parse()?;
    if url.top_level_type() != expected {
        return Err(ValidationError::MediaMismatch {
            kind,
            media_type: url.media_type().to_string(),
        }
        .into());
    }
    if kind == EntryKind::Drawing {
        ensure_not_blank(content, &url)?;
    }
    Ok(content.to_string())
}

/// A drawing is blank when it serializes exactly like a freshly cleared
/// canvas of the same size. Only the image header is read to learn that size.
fn ensure_not_blank(content: &str, url: &DataUrl) -> Result<()> {
    let bytes = url.decode()?;
    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .ok_or_else(|| {
            ValidationError::UnsupportedMedia("drawing is not a decodable image".to_string())
        })?;
    if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
        return Err(ValidationError::UnsupportedMedia(format!(
            "drawing is larger than {0}x{0}",
            MAX_CANVAS_SIDE
        ))
        .into());
    }

    let blank = Canvas::blank_data_url(width, height)?;
    if content == blank {
        return Err(ValidationError::BlankDrawing.into());
    }
    Ok(())
}
