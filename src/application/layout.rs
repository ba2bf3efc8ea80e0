//! On-disk layout of one service
//!
//! Everything a service owns lives under `<project>/<rootDir>/<service>/`:
//!
//! ```text
//! docker/            Dockerfile, .env, init.sql
//! sequelize/         config.js, .sequelizerc, migrations/, models/, seeders/
//! database/scripts/  backup.sh
//! database/backups/  manual/ and scheduled/ (cron-config.json)
//! ```

use std::path::{Path, PathBuf};

use crate::domain::entities::BACKUP_CONFIG_FILE;
use crate::domain::value_objects::Orm;
use crate::infrastructure::templates::SEQUELIZERC_FILE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLayout {
    project_root: PathBuf,
    service_dir: PathBuf,
}

impl ServiceLayout {
    pub fn new(project_root: &Path, root_dir: &str, service: &str) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            service_dir: project_root
                .join(root_dir)
                .join(service)
                .components()
                .collect(),
        }
    }

    /// Resolve a registry path (relative to the project) to a usable path
    pub fn resolve(&self, registry_path: &str) -> PathBuf {
        self.project_root.join(registry_path).components().collect()
    }

    pub fn service_dir(&self) -> &Path {
        &self.service_dir
    }

    pub fn docker_dir(&self) -> PathBuf {
        self.service_dir.join("docker")
    }

    pub fn orm_dir(&self, orm: Orm) -> PathBuf {
        self.service_dir.join(orm.directory_name())
    }

    pub fn sequelize_config(&self) -> PathBuf {
        self.orm_dir(Orm::Sequelize).join("config.js")
    }

    pub fn sequelizerc(&self) -> PathBuf {
        self.orm_dir(Orm::Sequelize).join(SEQUELIZERC_FILE)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.service_dir.join("database").join("scripts")
    }

    pub fn backup_script(&self) -> PathBuf {
        self.scripts_dir().join("backup.sh")
    }

    pub fn manual_backups_dir(&self) -> PathBuf {
        self.service_dir.join("database").join("backups").join("manual")
    }

    pub fn scheduled_backups_dir(&self) -> PathBuf {
        self.service_dir
            .join("database")
            .join("backups")
            .join("scheduled")
    }

    pub fn backup_config(&self) -> PathBuf {
        self.scheduled_backups_dir().join(BACKUP_CONFIG_FILE)
    }
}
