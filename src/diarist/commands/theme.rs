use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Theme;
use crate::store::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
}

pub fn current<S: KeyValueStore + ?Sized>(store: &S) -> Result<Theme> {
    let stored = store.get(THEME_KEY)?;
    Ok(Theme::from_stored(stored.as_deref()))
}

pub fn run<S: KeyValueStore>(store: &mut S, action: ThemeAction) -> Result<CmdResult> {
    let theme = current(store)?;
    let next = match action {
        ThemeAction::Show => return Ok(CmdResult::default().with_theme(theme)),
        ThemeAction::Toggle => theme.toggled(),
        ThemeAction::Set(t) => t,
    };

    store.set(THEME_KEY, next.as_str())?;
    tracing::debug!(theme = %next, "theme changed");

    let mut result = CmdResult::default().with_theme(next);
    result.add_message(CmdMessage::success(format!("Theme set to {}", next)));
    Ok(result)
}
