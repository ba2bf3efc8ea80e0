//! Project config entity
//!
//! The `.mastermindrc` document: the project's `rootDir` and one entry per
//! registered service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::services::{derive_paths, DerivedPaths};
use crate::domain::value_objects::DatabaseKind;

/// One registered service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    pub database: DatabaseKind,
    /// Open string; only "Sequelize" has tooling behind it
    pub orm: String,
    pub migrations_dir: String,
    pub models_dir: String,
    pub seeders_dir: String,
}

impl ServiceEntry {
    /// Entry with all three paths freshly derived from `root_dir`
    pub fn derive(service: &str, orm: &str, database: DatabaseKind, root_dir: &str) -> Self {
        let DerivedPaths {
            migrations_dir,
            models_dir,
            seeders_dir,
        } = derive_paths(service, orm, root_dir);

        Self {
            database,
            orm: orm.to_string(),
            migrations_dir,
            models_dir,
            seeders_dir,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Missing means the project was never initialized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEntry>,
}

impl ProjectConfig {
    pub fn with_root_dir(root_dir: impl Into<String>) -> Self {
        Self {
            root_dir: Some(root_dir.into()),
            services: BTreeMap::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.root_dir.is_some()
    }

    pub fn root_dir(&self) -> Option<&str> {
        self.root_dir.as_deref()
    }

    pub fn service(&self, name: &str) -> Option<&ServiceEntry> {
        self.services.get(name)
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Replace (or insert) `name` and return the previous entry
    pub fn upsert(&mut self, name: &str, entry: ServiceEntry) -> Option<ServiceEntry> {
        self.services.insert(name.to_string(), entry)
    }

    pub fn remove(&mut self, name: &str) -> Option<ServiceEntry> {
        self.services.remove(name)
    }
}
