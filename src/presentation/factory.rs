//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::{
    BackupManager, ContainerManager, DatabaseOps, OrmFileGenerator, OrmRunner, PortAllocator,
    RegistryStore, ServiceRemover, ServiceScaffolder, TopologyBuilder,
};
use crate::config::Settings;
use crate::domain::ports::{
    CommandRunner, ComposeRepository, PortProbe, ProjectConfigRepository,
};
use crate::infrastructure::{
    JsonProjectConfigRepository, StaticPortProbe, SystemCommandRunner, TcpPortProbe,
    YamlComposeRepository,
};

/// Repositories and process plumbing for one project directory
///
/// Use cases are created on demand; each one re-reads its documents from disk.
#[derive(Clone)]
pub struct Workspace {
    settings: Settings,
    config: Arc<dyn ProjectConfigRepository>,
    compose: Arc<dyn ComposeRepository>,
    runner: Arc<dyn CommandRunner>,
    probe: Arc<dyn PortProbe>,
}

impl Workspace {
    pub fn new(settings: Settings) -> Self {
        let probe: Arc<dyn PortProbe> = if settings.probe_ports {
            Arc::new(TcpPortProbe)
        } else {
            Arc::new(StaticPortProbe::all_free())
        };

        Self {
            config: Arc::new(JsonProjectConfigRepository::with_path(settings.config_path())),
            compose: Arc::new(YamlComposeRepository::with_path(settings.compose_path())),
            runner: Arc::new(SystemCommandRunner::new()),
            probe,
            settings,
        }
    }

    /// Replace the process runner (tests use a recording runner)
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn PortProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn project_root(&self) -> &Path {
        &self.settings.project_root
    }

    pub fn compose_repository(&self) -> Arc<dyn ComposeRepository> {
        self.compose.clone()
    }

    pub fn registry(&self) -> RegistryStore {
        RegistryStore::new(self.config.clone())
    }

    pub fn port_allocator(&self) -> PortAllocator {
        PortAllocator::new(self.compose.clone(), self.probe.clone())
    }

    pub fn topology(&self) -> TopologyBuilder {
        TopologyBuilder::new(
            self.compose.clone(),
            self.config.clone(),
            self.settings.project_root.clone(),
        )
    }

    pub fn scaffolder(&self) -> ServiceScaffolder {
        ServiceScaffolder::new(
            self.registry(),
            self.port_allocator(),
            self.settings.project_root.clone(),
        )
    }

    pub fn generator(&self) -> OrmFileGenerator {
        OrmFileGenerator::new(self.registry(), self.settings.project_root.clone())
    }

    pub fn orm(&self) -> OrmRunner {
        OrmRunner::new(
            self.registry(),
            self.runner.clone(),
            self.settings.project_root.clone(),
        )
    }

    pub fn containers(&self) -> ContainerManager {
        ContainerManager::new(self.runner.clone(), self.compose.clone())
    }

    pub fn database(&self) -> DatabaseOps {
        DatabaseOps::new(
            self.registry(),
            self.runner.clone(),
            self.settings.project_root.clone(),
        )
    }

    pub fn backups(&self) -> BackupManager {
        BackupManager::new(
            self.registry(),
            self.runner.clone(),
            self.settings.project_root.clone(),
        )
    }

    pub fn remover(&self) -> ServiceRemover {
        ServiceRemover::new(
            self.registry(),
            self.topology(),
            self.containers(),
            self.settings.project_root.clone(),
        )
    }
}
