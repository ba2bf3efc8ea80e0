//! Delete Service Use Case

use std::fs;
use std::path::PathBuf;

use super::containers::{ContainerManager, StopOutcome};
use super::layout::ServiceLayout;
use super::registry::RegistryStore;
use super::topology::{RemoveReport, TopologyBuilder};
use crate::domain::value_objects::ServiceName;
use crate::error::MastermindResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOptions {
    /// Also drop `<name>-db` and `<name>-data` from the compose file
    pub remove_compose: bool,
    /// Stop and remove the container if it is running
    pub remove_container: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub service_dir: PathBuf,
    pub dir_removed: bool,
    pub registry_removed: bool,
    pub compose: Option<RemoveReport>,
    pub container: Option<StopOutcome>,
}

pub struct ServiceRemover {
    registry: RegistryStore,
    topology: TopologyBuilder,
    containers: ContainerManager,
    project_root: PathBuf,
}

impl ServiceRemover {
    pub fn new(
        registry: RegistryStore,
        topology: TopologyBuilder,
        containers: ContainerManager,
        project_root: PathBuf,
    ) -> Self {
        Self {
            registry,
            topology,
            containers,
            project_root,
        }
    }

    pub fn delete(
        &self,
        service: &ServiceName,
        options: DeleteOptions,
    ) -> MastermindResult<DeleteReport> {
        let root_dir = self.registry.require_root_dir()?;
        let layout = ServiceLayout::new(&self.project_root, &root_dir, service.as_str());
        let service_dir = layout.service_dir().to_path_buf();

        let dir_removed = if service_dir.exists() {
            fs::remove_dir_all(&service_dir)?;
            true
        } else {
            tracing::warn!(path = %service_dir.display(), "service directory not found");
            false
        };
        let registry_removed = self.registry.remove(service.as_str())?;

        let compose = if options.remove_compose {
            Some(self.topology.remove_service(service)?)
        } else {
            None
        };

        let container = if options.remove_container {
            Some(self.containers.stop_and_remove(service)?)
        } else {
            None
        };

        tracing::info!(service = %service, "service deleted");
        Ok(DeleteReport {
            service_dir,
            dir_removed,
            registry_removed,
            compose,
            container,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use crate::domain::value_objects::DatabaseKind;
    use crate::infrastructure::{JsonProjectConfigRepository, RecordingRunner, YamlComposeRepository};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn remover(root: &Path, runner: Arc<RecordingRunner>) -> (ServiceRemover, RegistryStore) {
        let config = Arc::new(JsonProjectConfigRepository::with_path(root.join(".mastermindrc")));
        let compose = Arc::new(YamlComposeRepository::with_path(root.join("docker-compose.yml")));
        let registry = RegistryStore::new(config.clone());
        registry
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();

        let topology = TopologyBuilder::new(compose.clone(), config, root.to_path_buf());
        topology
            .upsert_service(&ServiceName::parse("auth").unwrap(), "mysql", 3306)
            .unwrap();

        let remover = ServiceRemover::new(
            registry.clone(),
            topology,
            ContainerManager::new(runner, compose),
            root.to_path_buf(),
        );
        (remover, registry)
    }

    #[test]
    fn deletes_directory_and_registry_entry() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/auth/docker")).unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let (remover, registry) = remover(dir.path(), runner.clone());

        let report = remover
            .delete(&ServiceName::parse("auth").unwrap(), DeleteOptions::default())
            .unwrap();

        assert!(report.dir_removed);
        assert!(report.registry_removed);
        assert!(report.compose.is_none());
        assert!(!dir.path().join("src/auth").exists());
        assert!(registry.load().unwrap().services.is_empty());
        assert!(runner.calls().is_empty());
        let yaml = fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap();
        assert!(yaml.contains("auth-db"));
    }

    #[test]
    fn optional_compose_and_container_cleanup() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(
            RecordingRunner::new()
                .respond("docker ps", CommandOutput::success().with_stdout("auth-db\n")),
        );
        let (remover, _) = remover(dir.path(), runner.clone());

        let report = remover
            .delete(
                &ServiceName::parse("auth").unwrap(),
                DeleteOptions {
                    remove_compose: true,
                    remove_container: true,
                },
            )
            .unwrap();

        assert!(!report.dir_removed);
        assert_eq!(
            report.compose,
            Some(RemoveReport {
                service_removed: true,
                volume_removed: true
            })
        );
        assert_eq!(report.container, Some(StopOutcome::Removed));
        assert_eq!(&runner.commands()[1..], ["docker stop auth-db", "docker rm auth-db"]);
    }
}
