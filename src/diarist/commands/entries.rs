use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DiaryError, Result};
use crate::model::{entries_key, Entry};
use crate::render::{render, RenderOptions};
use crate::store::{load_collection, load_or_recover, KeyValueStore};

/// A diary's entries in append order; empty when nothing was written yet.
pub fn list_entries<S: KeyValueStore + ?Sized>(store: &S, diary_id: &str) -> Result<Vec<Entry>> {
    load_or_recover(store, &entries_key(diary_id))
}

/// Like [`list_entries`], but an unreadable log also yields a warning for the
/// reader. The next append replaces the unreadable value.
pub fn entries_for_display<S: KeyValueStore + ?Sized>(
    store: &S,
    diary_id: &str,
) -> Result<(Vec<Entry>, Option<CmdMessage>)> {
    match load_collection(store, &entries_key(diary_id)) {
        Ok(entries) => Ok((entries, None)),
        Err(DiaryError::StorageCorruption { key, source }) => {
            tracing::warn!(%key, error = %source, "discarding unreadable entry log");
            let notice = CmdMessage::warning(
                "Stored entries could not be read; the next entry starts a new log.",
            );
            Ok((Vec::new(), Some(notice)))
        }
        Err(e) => Err(e),
    }
}

pub fn run<S: KeyValueStore>(
    store: &S,
    diary_id: &str,
    options: &RenderOptions,
) -> Result<CmdResult> {
    let (entries, notice) = entries_for_display(store, diary_id)?;
    let display = render(&entries, options);
    let mut result = CmdResult::default()
        .with_listed_entries(entries)
        .with_display(display);
    if let Some(notice) = notice {
        result.add_message(notice);
    }
    Ok(result)
}
