//! Multi-file media upload.
//!
//! Each selected file is read and encoded on its own scoped thread. Finished
//! reads arrive over a channel in completion order and a single consumer
//! appends them one at a time, so every append's read-modify-write sees the
//! previous one. No read can overwrite another's entry.

use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use crate::commands::{CmdMessage, CmdResult};
use crate::data_url::{audio_media_type, DataUrl};
use crate::error::{DiaryError, Result, ValidationError};
use crate::model::EntryKind;
use crate::store::KeyValueStore;

use super::append::append_entry;

pub fn run<S: KeyValueStore>(
    store: &mut S,
    diary_id: &str,
    kind: EntryKind,
    files: &[PathBuf],
) -> Result<CmdResult> {
    if !matches!(kind, EntryKind::Image | EntryKind::Audio) {
        return Err(DiaryError::Api(format!(
            "{} entries cannot be uploaded",
            kind
        )));
    }

    let mut result = CmdResult::default();
    let (tx, rx) = mpsc::channel::<(&Path, Result<String>)>();

    thread::scope(|scope| {
        for path in files {
            let tx = tx.clone();
            let path = path.as_path();
            scope.spawn(move || {
                let encoded = read_as_data_url(path, kind);
                // The receiver lives until every sender is gone.
                let _ = tx.send((path, encoded));
            });
        }
        drop(tx);

        for (path, encoded) in rx {
            let appended =
                encoded.and_then(|content| append_entry(store, diary_id, kind, &content));
            match appended {
                Ok(entry) => {
                    result.add_message(CmdMessage::success(format!(
                        "{} added: {}",
                        kind.label(),
                        display_name(path)
                    )));
                    result.affected_entries.push(entry);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "upload failed");
                    result.add_message(CmdMessage::error(format!(
                        "{}: {}",
                        display_name(path),
                        e
                    )));
                }
            }
        }
    });

    Ok(result)
}

/// Reads a file into a base64 data URL carrying its media type.
pub fn read_as_data_url(path: &Path, kind: EntryKind) -> Result<String> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(ValidationError::EmptyPayload.into());
    }

    let media_type = match kind {
        EntryKind::Image => image_media_type(path, &bytes),
        EntryKind::Audio => path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(audio_media_type),
        EntryKind::Text | EntryKind::Drawing => None,
    }
    .ok_or_else(|| ValidationError::UnsupportedMedia(display_name(path)))?;

    tracing::debug!(file = %path.display(), %media_type, bytes = bytes.len(), "file encoded");
    Ok(DataUrl::from_bytes(media_type, &bytes).to_string())
}

fn image_media_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()
        .map(|format| format.to_mime_type())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
