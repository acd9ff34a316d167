use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ValidationError};
use crate::model::DiaryRecord;
use crate::store::{save_collection, KeyValueStore, DIARIES_KEY};

use super::helpers::load_diaries;

pub fn run<S: KeyValueStore>(
    store: &mut S,
    title: &str,
    color: &str,
    pin: &str,
) -> Result<CmdResult> {
    let diary = create_diary(store, title, color, pin)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Diary created: {}",
        diary.title
    )));
    Ok(result.with_affected_diaries(vec![diary]))
}

/// Validates and appends a new diary to the registry.
pub fn create_diary<S: KeyValueStore>(
    store: &mut S,
    title: &str,
    color: &str,
    pin: &str,
) -> Result<DiaryRecord> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }
    if !is_valid_pin(pin) {
        return Err(ValidationError::InvalidPin.into());
    }

    let mut diaries = load_diaries(store)?;
    let wanted = title.to_lowercase();
    if diaries.iter().any(|d| d.title.to_lowercase() == wanted) {
        return Err(ValidationError::DuplicateTitle(title.to_string()).into());
    }

    let diary = DiaryRecord::new(title.to_string(), color.to_string(), pin.to_string());
    diaries.push(diary.clone());
    save_collection(store, DIARIES_KEY, &diaries)?;

    tracing::info!(id = %diary.id, title = %diary.title, "diary created");
    Ok(diary)
}

/// Exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}
