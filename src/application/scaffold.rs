//! Service Scaffolding Use Case
//!
//! Registers a new service and writes its container and ORM files:
//!
//! 1. Require an initialized registry
//! 2. Allocate a host port
//! 3. Register the service
//! 4. Render `docker/` files and the Sequelize setup
//!
//! Files that already exist are left untouched and reported as skipped.

use std::fs;
use std::path::{Path, PathBuf};

use super::layout::ServiceLayout;
use super::port_allocation::PortAllocator;
use super::registry::RegistryStore;
use crate::domain::entities::ServiceEntry;
use crate::domain::value_objects::{DatabaseKind, Orm, ServiceName};
use crate::error::MastermindResult;
use crate::infrastructure::templates::{
    database_files, sequelize_config, sequelizerc, DatabaseTemplateVars,
};

/// Root password baked into generated container files
pub const ROOT_PASSWORD: &str = "root_password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub port: u16,
    pub entry: ServiceEntry,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct ServiceScaffolder {
    registry: RegistryStore,
    allocator: PortAllocator,
    project_root: PathBuf,
}

impl ServiceScaffolder {
    pub fn new(registry: RegistryStore, allocator: PortAllocator, project_root: PathBuf) -> Self {
        Self {
            registry,
            allocator,
            project_root,
        }
    }

    pub fn create_service(
        &self,
        service: &ServiceName,
        database: DatabaseKind,
    ) -> MastermindResult<ScaffoldReport> {
        let root_dir = self.registry.require_root_dir()?;
        let port = self.allocator.allocate(database.as_str())?;
        let entry = self.registry.add_or_update(
            service.as_str(),
            Orm::Sequelize.as_str(),
            database,
            &root_dir,
        )?;
        tracing::info!(service = %service, %database, port, "registered service");

        let layout = ServiceLayout::new(&self.project_root, &root_dir, service.as_str());
        let mut report = ScaffoldReport {
            port,
            entry,
            written: Vec::new(),
            skipped: Vec::new(),
        };

        let db_name = service.database_name();
        let db_user = service.database_user();
        let db_password = service.database_password();
        let vars = DatabaseTemplateVars {
            db_name: &db_name,
            db_user: &db_user,
            db_password: &db_password,
            root_password: ROOT_PASSWORD,
            port,
        };

        let docker_dir = layout.docker_dir();
        for (name, contents) in database_files(database, &vars) {
            write_new(&docker_dir.join(name), &contents, &mut report)?;
        }

        for dir in [
            &report.entry.migrations_dir,
            &report.entry.models_dir,
            &report.entry.seeders_dir,
        ] {
            fs::create_dir_all(layout.resolve(dir))?;
        }

        let config_js = sequelize_config(database.dialect(), &db_name, &db_user, &db_password, port);
        write_new(&layout.sequelize_config(), &config_js, &mut report)?;
        write_new(&layout.sequelizerc(), &sequelizerc(), &mut report)?;

        Ok(report)
    }
}

fn write_new(path: &Path, contents: &str, report: &mut ScaffoldReport) -> MastermindResult<()> {
    if path.exists() {
        tracing::warn!(path = %path.display(), "file exists, not overwriting");
        report.skipped.push(path.to_path_buf());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    report.written.push(path.to_path_buf());
    Ok(())
}
