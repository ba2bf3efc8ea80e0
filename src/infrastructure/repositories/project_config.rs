//! JSON Project Config Repository
//!
//! Persists the project registry at `<project>/.mastermindrc`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::ProjectConfig;
use crate::domain::ports::ProjectConfigRepository;
use crate::error::{MastermindError, MastermindResult};

pub struct JsonProjectConfigRepository {
    path: PathBuf,
}

impl JsonProjectConfigRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProjectConfigRepository for JsonProjectConfigRepository {
    fn load(&self) -> MastermindResult<ProjectConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "project config not found, using defaults");
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ProjectConfig::default());
        }

        serde_json::from_str(&content).map_err(|e| MastermindError::ConfigCorrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, config: &ProjectConfig) -> MastermindResult<()> {
        let content = serde_json::to_string_pretty(config)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format!("{}\n", content))?;
        tracing::debug!(path = %self.path.display(), services = config.services.len(), "saved project config");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ServiceEntry;
    use crate::domain::value_objects::DatabaseKind;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let repo = JsonProjectConfigRepository::with_path(dir.path().join(".mastermindrc"));

        let config = repo.load().unwrap();
        assert!(!config.is_initialized());
        assert!(!repo.exists());
    }

    #[test]
    fn load_corrupted_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mastermindrc");
        fs::write(&path, "{ rootDir: ").unwrap();

        let repo = JsonProjectConfigRepository::with_path(path.clone());
        let err = repo.load().unwrap_err();
        assert!(matches!(err, MastermindError::ConfigCorrupted { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn save_writes_pretty_json() {
        let dir = tempdir().unwrap();
        let repo = JsonProjectConfigRepository::with_path(dir.path().join(".mastermindrc"));

        let mut config = ProjectConfig::with_root_dir("./src");
        config.upsert(
            "billing",
            ServiceEntry::derive("billing", "Sequelize", DatabaseKind::Postgres, "./src"),
        );
        repo.save(&config).unwrap();

        let written = fs::read_to_string(repo.path()).unwrap();
        assert!(written.contains("\n  \"rootDir\": \"./src\""));
        assert_eq!(repo.load().unwrap(), config);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let repo = JsonProjectConfigRepository::with_path(dir.path().join("nested/conf.json"));

        repo.save(&ProjectConfig::with_root_dir("./src")).unwrap();
        assert!(repo.exists());
    }
}
