use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

use super::helpers::load_diaries;

/// All diaries in creation order.
pub fn run<S: KeyValueStore>(store: &S) -> Result<CmdResult> {
    let diaries = load_diaries(store)?;
    Ok(CmdResult::default().with_listed_diaries(diaries))
}
