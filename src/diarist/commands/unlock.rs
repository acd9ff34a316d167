//! PIN gate in front of a diary's detail view.
//!
//! The PIN is stored and compared in cleartext. It keeps a casual reader out
//! of the UI; anyone with access to the storage can read every diary.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DiaryError, Result};
use crate::model::DiaryRecord;
use crate::store::KeyValueStore;

use super::helpers::find_diary;

pub fn run<S: KeyValueStore>(store: &S, diary_id: &str, pin: &str) -> Result<CmdResult> {
    let diary = unlock(store, diary_id, pin)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Unlocked: {}", diary.title)));
    Ok(result.with_affected_diaries(vec![diary]))
}

/// Succeeds only for an existing diary whose PIN matches.
pub fn unlock<S: KeyValueStore>(store: &S, diary_id: &str, pin: &str) -> Result<DiaryRecord> {
    let diary = find_diary(store, diary_id)?;
    if diary.pin != pin {
        tracing::debug!(id = %diary.id, "pin mismatch");
        return Err(DiaryError::Auth);
    }
    Ok(diary)
}
