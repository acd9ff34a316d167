use crate::commands::CmdResult;
use crate::error::Result;
use crate::render::RenderOptions;
use crate::store::KeyValueStore;

use super::entries::entries_for_display;
use super::unlock::unlock;

/// The detail view: unlocks the diary and renders its entry log.
///
/// A missing or unknown diary id is `NotFound`, which clients treat as a
/// navigation failure and send the user back to the listing.
pub fn run<S: KeyValueStore>(
    store: &S,
    diary_id: &str,
    pin: &str,
    options: &RenderOptions,
) -> Result<CmdResult> {
    let diary = unlock(store, diary_id, pin)?;
    let (entries, notice) = entries_for_display(store, &diary.id)?;
    let display = crate::render::render(&entries, options);

    let mut result = CmdResult::default()
        .with_affected_diaries(vec![diary])
        .with_listed_entries(entries)
        .with_display(display);
    if let Some(notice) = notice {
        result.add_message(notice);
    }
    Ok(result)
}
