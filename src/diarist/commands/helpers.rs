use crate::error::{DiaryError, Result};
use crate::model::DiaryRecord;
use crate::store::{load_or_recover, KeyValueStore, DIARIES_KEY};

pub fn load_diaries<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<DiaryRecord>> {
    load_or_recover(store, DIARIES_KEY)
}

/// Looks a diary up by its exact id.
pub fn find_diary<S: KeyValueStore + ?Sized>(store: &S, diary_id: &str) -> Result<DiaryRecord> {
    if diary_id.is_empty() {
        return Err(DiaryError::NotFound("no diary selected".to_string()));
    }
    load_diaries(store)?
        .into_iter()
        .find(|d| d.id == diary_id)
        .ok_or_else(|| DiaryError::NotFound(diary_id.to_string()))
}

/// Resolves user input to a diary: an exact id, a title compared
/// case-insensitively, or a 1-based position in the listing, tried in that
/// order. A diary titled "2" wins over the second diary.
pub fn resolve_diary<S: KeyValueStore + ?Sized>(store: &S, selector: &str) -> Result<DiaryRecord> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(DiaryError::NotFound("no diary selected".to_string()));
    }
    let diaries = load_diaries(store)?;

    if let Some(diary) = diaries.iter().find(|d| d.id == selector) {
        return Ok(diary.clone());
    }

    let wanted = selector.to_lowercase();
    if let Some(diary) = diaries.iter().find(|d| d.title.to_lowercase() == wanted) {
        return Ok(diary.clone());
    }

    selector
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|i| diaries.get(i).cloned())
        .ok_or_else(|| DiaryError::NotFound(selector.to_string()))
}
