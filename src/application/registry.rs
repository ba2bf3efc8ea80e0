//! Registry Use Case
//!
//! Load/merge/save operations on the project config. Every call re-reads the
//! file and writes the whole document back; nothing is cached.

use std::sync::Arc;

use crate::domain::entities::{ProjectConfig, ServiceEntry};
use crate::domain::ports::ProjectConfigRepository;
use crate::domain::value_objects::DatabaseKind;
use crate::error::{MastermindError, MastermindResult};

/// Result of `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    AlreadyExists,
}

/// Lookup result for one service; a missing entry is not an error here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePaths {
    pub root_dir: Option<String>,
    pub entry: Option<ServiceEntry>,
}

#[derive(Clone)]
pub struct RegistryStore {
    repository: Arc<dyn ProjectConfigRepository>,
}

impl RegistryStore {
    pub fn new(repository: Arc<dyn ProjectConfigRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn ProjectConfigRepository> {
        &self.repository
    }

    pub fn load(&self) -> MastermindResult<ProjectConfig> {
        self.repository.load()
    }

    /// Seed `{rootDir, services: {}}` unless a config already exists.
    pub fn init(&self, root_dir: &str, force: bool) -> MastermindResult<InitOutcome> {
        let existed = self.repository.exists();
        if existed && !force {
            return Ok(InitOutcome::AlreadyExists);
        }

        self.repository
            .save(&ProjectConfig::with_root_dir(root_dir))?;
        tracing::info!(root_dir, path = %self.repository.path().display(), "initialized project config");

        Ok(if existed {
            InitOutcome::Overwritten
        } else {
            InitOutcome::Created
        })
    }

    pub fn require_root_dir(&self) -> MastermindResult<String> {
        self.load()?
            .root_dir
            .ok_or_else(|| MastermindError::ConfigMissing {
                path: self.repository.path().to_path_buf(),
            })
    }

    /// Register or replace a service with freshly derived paths.
    ///
    /// `root_dir` becomes the project's `rootDir` (last writer wins).
    pub fn add_or_update(
        &self,
        service: &str,
        orm: &str,
        database: DatabaseKind,
        root_dir: &str,
    ) -> MastermindResult<ServiceEntry> {
        let mut config = self.load()?;
        let entry = ServiceEntry::derive(service, orm, database, root_dir);

        config.root_dir = Some(root_dir.to_string());
        if config.upsert(service, entry.clone()).is_some() {
            tracing::debug!(service, "replaced existing registry entry");
        }
        self.repository.save(&config)?;

        Ok(entry)
    }

    pub fn get_paths(&self, service: &str) -> MastermindResult<ServicePaths> {
        let config = self.load()?;
        let entry = config.service(service).cloned();
        if entry.is_none() {
            tracing::error!(service, "configuration for service not found");
        }

        Ok(ServicePaths {
            root_dir: config.root_dir,
            entry,
        })
    }

    /// `rootDir` and the entry for `service`, or the matching config error
    pub fn require_service(&self, service: &str) -> MastermindResult<(String, ServiceEntry)> {
        let paths = self.get_paths(service)?;
        let root_dir = paths.root_dir.ok_or_else(|| MastermindError::ConfigMissing {
            path: self.repository.path().to_path_buf(),
        })?;
        let entry = paths.entry.ok_or_else(|| MastermindError::ServiceNotFound {
            name: service.to_string(),
        })?;
        Ok((root_dir, entry))
    }

    /// Drop `service` from the registry. `rootDir` is left alone.
    pub fn remove(&self, service: &str) -> MastermindResult<bool> {
        let mut config = self.load()?;
        let removed = config.remove(service).is_some();
        self.repository.save(&config)?;
        Ok(removed)
    }

    /// Change `rootDir`. Existing entries keep their stored paths.
    pub fn set_root_dir(&self, root_dir: &str) -> MastermindResult<()> {
        let mut config = self.load()?;
        config.root_dir = Some(root_dir.to_string());
        self.repository.save(&config)
    }

    /// Replace the config with `{rootDir: default_root, services: {}}`
    pub fn reset(&self, default_root: &str) -> MastermindResult<ProjectConfig> {
        let config = ProjectConfig::with_root_dir(default_root);
        self.repository.save(&config)?;
        Ok(config)
    }

    /// Current config as pretty JSON
    pub fn render(&self) -> MastermindResult<String> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct InMemoryConfigRepo {
        config: Mutex<Option<ProjectConfig>>,
        path: PathBuf,
    }

    impl InMemoryConfigRepo {
        fn new(config: Option<ProjectConfig>) -> Arc<Self> {
            Arc::new(Self {
                config: Mutex::new(config),
                path: PathBuf::from("/project/.mastermindrc"),
            })
        }
    }

    impl ProjectConfigRepository for InMemoryConfigRepo {
        fn load(&self) -> MastermindResult<ProjectConfig> {
            Ok(self.config.lock().unwrap().clone().unwrap_or_default())
        }

        fn save(&self, config: &ProjectConfig) -> MastermindResult<()> {
            *self.config.lock().unwrap() = Some(config.clone());
            Ok(())
        }

        fn exists(&self) -> bool {
            self.config.lock().unwrap().is_some()
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(None));

        assert_eq!(store.init("./src", false).unwrap(), InitOutcome::Created);
        store
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();
        assert_eq!(store.init("./app", false).unwrap(), InitOutcome::AlreadyExists);
        assert_eq!(store.load().unwrap().services.len(), 1);

        assert_eq!(store.init("./app", true).unwrap(), InitOutcome::Overwritten);
        assert!(store.load().unwrap().services.is_empty());
    }

    #[test]
    fn add_or_update_sets_root_dir_last_writer_wins() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(Some(
            ProjectConfig::with_root_dir("./src"),
        )));

        store
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./services")
            .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.root_dir(), Some("./services"));
        assert_eq!(
            config.service("auth").unwrap().migrations_dir,
            "./services/auth/sequelize/migrations"
        );
    }

    #[test]
    fn get_paths_for_unknown_service_is_not_an_error() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(Some(
            ProjectConfig::with_root_dir("./src"),
        )));

        let paths = store.get_paths("ghost").unwrap();
        assert_eq!(paths.root_dir.as_deref(), Some("./src"));
        assert!(paths.entry.is_none());

        let err = store.require_service("ghost").unwrap_err();
        assert!(matches!(err, MastermindError::ServiceNotFound { .. }));
    }

    #[test]
    fn require_root_dir_when_uninitialized() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(None));
        let err = store.require_root_dir().unwrap_err();
        assert!(matches!(err, MastermindError::ConfigMissing { .. }));
    }

    #[test]
    fn remove_keeps_root_dir() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(None));
        store
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();

        assert!(store.remove("auth").unwrap());
        assert!(!store.remove("auth").unwrap());
        assert_eq!(store.load().unwrap().root_dir(), Some("./src"));
    }

    #[test]
    fn set_root_dir_does_not_rederive_entries() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(None));
        store
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();
        store.set_root_dir("./apps").unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.root_dir(), Some("./apps"));
        assert_eq!(
            config.service("auth").unwrap().models_dir,
            "./src/auth/sequelize/models"
        );
    }

    #[test]
    fn reset_clears_services() {
        let store = RegistryStore::new(InMemoryConfigRepo::new(None));
        store
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./x")
            .unwrap();

        let config = store.reset("./src").unwrap();
        assert_eq!(config, ProjectConfig::with_root_dir("./src"));
        assert!(store.render().unwrap().contains("\"rootDir\": \"./src\""));
    }
}
