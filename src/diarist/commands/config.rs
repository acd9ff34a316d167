use crate::commands::{CmdMessage, CmdResult, DiaristPaths};
use crate::config::DiaristConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &DiaristPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.config_dir();
    match action {
        ConfigAction::ShowAll => {
            let config = DiaristConfig::load(&dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = DiaristConfig::load(&dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = DiaristConfig::load(&dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(&dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> (tempfile::TempDir, DiaristPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = DiaristPaths::new(dir.path().to_path_buf());
        (dir, paths)
    }

    #[test]
    fn set_persists_and_shows() {
        let (_dir, paths) = paths();
        let result = run(
            &paths,
            ConfigAction::Set("canvas-width".into(), "320".into()),
        )
        .unwrap();
        assert!(!result.has_errors());

        let shown = run(&paths, ConfigAction::ShowKey("canvas-width".into())).unwrap();
        assert_eq!(shown.messages[0].content, "320");
    }

    #[test]
    fn unknown_key_is_reported() {
        let (_dir, paths) = paths();
        let result = run(&paths, ConfigAction::ShowKey("bogus".into())).unwrap();
        assert!(result.has_errors());

        let result = run(&paths, ConfigAction::Set("bogus".into(), "1".into())).unwrap();
        assert!(result.has_errors());
    }

    #[test]
    fn show_all_returns_defaults() {
        let (_dir, paths) = paths();
        let result = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(DiaristConfig::default()));
    }
}
