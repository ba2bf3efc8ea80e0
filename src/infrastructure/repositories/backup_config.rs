//! JSON store for scheduled backup configs

use std::fs;
use std::path::Path;

use crate::domain::entities::BackupCronConfig;
use crate::error::{MastermindError, MastermindResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBackupConfigStore;

impl JsonBackupConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// `None` when the file does not exist
    pub fn load(&self, path: &Path) -> MastermindResult<Option<BackupCronConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| MastermindError::BackupConfigCorrupted {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    pub fn save(&self, path: &Path, config: &BackupCronConfig) -> MastermindResult<()> {
        let content = serde_json::to_string_pretty(config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{}\n", content))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scheduled/cron-config.json");
        let store = JsonBackupConfigStore::new();

        let config = BackupCronConfig::new("auth", "0 0 * * *", "/b");
        store.save(&path, &config).unwrap();

        assert_eq!(store.load(&path).unwrap(), Some(config));
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cron-config.json");
        fs::write(&path, "[]").unwrap();

        let err = JsonBackupConfigStore::new().load(&path).unwrap_err();
        assert!(matches!(err, MastermindError::BackupConfigCorrupted { .. }));
    }
}
