use super::{validate_key, KeyValueStore};
use crate::error::{DiaryError, Result};
use std::fs;
use std::path::PathBuf;

/// File-backed key-value storage: each key is a file under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DiaryError::Io)?;
        }
        Ok(())
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(DiaryError::Io)?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;

        // Write beside the target and rename so a crash never leaves half a
        // collection behind.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(DiaryError::Io)?;
        fs::rename(&tmp, &path).map_err(DiaryError::Io)?;
        Ok(())
    }
}
