//! Container lifecycle through the docker CLI

use std::sync::Arc;

use crate::domain::ports::{CommandRunner, CommandSpec, ComposeRepository};
use crate::domain::value_objects::ServiceName;
use crate::error::{MastermindError, MastermindResult};

/// Result of `stop_and_remove`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Removed,
    NotRunning,
}

pub struct ContainerManager {
    runner: Arc<dyn CommandRunner>,
    compose: Arc<dyn ComposeRepository>,
}

impl ContainerManager {
    pub fn new(runner: Arc<dyn CommandRunner>, compose: Arc<dyn ComposeRepository>) -> Self {
        Self { runner, compose }
    }

    /// Whether the docker daemon answers `docker info`
    pub fn is_runtime_up(&self) -> bool {
        match self.runner.run(&CommandSpec::new("docker").arg("info")) {
            Ok(output) => output.is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "docker info failed");
                false
            }
        }
    }

    pub fn is_running(&self, service: &ServiceName) -> MastermindResult<bool> {
        let container = service.container_key();
        let output = self.runner.run_checked(&CommandSpec::new("docker").args([
            "ps".to_string(),
            "--filter".to_string(),
            format!("name={}", container),
            "--filter".to_string(),
            "status=running".to_string(),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ]))?;

        Ok(output.stdout.lines().any(|line| line.trim() == container))
    }

    /// `docker compose up -d <container>`; needs the compose file.
    pub fn start(&self, service: &ServiceName) -> MastermindResult<()> {
        let compose_path = self.compose.path();
        if !compose_path.exists() {
            return Err(MastermindError::FileNotFound {
                path: compose_path.to_path_buf(),
            });
        }

        let container = service.container_key();
        self.runner.run_checked(
            &CommandSpec::new("docker")
                .args(["compose", "-f"])
                .arg(compose_path.display().to_string())
                .args(["up", "-d"])
                .arg(&container),
        )?;
        tracing::info!(container = %container, "container started");
        Ok(())
    }

    pub fn stop(&self, service: &ServiceName) -> MastermindResult<()> {
        self.runner.run_checked(
            &CommandSpec::new("docker")
                .arg("stop")
                .arg(service.container_key()),
        )?;
        Ok(())
    }

    /// Stop, remove and start the container again. A failed stop is ignored
    /// so that a stopped container can still be refreshed.
    pub fn refresh(&self, service: &ServiceName) -> MastermindResult<()> {
        self.stop_quietly(service);
        self.remove(service, false)?;
        self.start(service)
    }

    /// Stop the container and remove it together with its anonymous volumes
    pub fn purge(&self, service: &ServiceName) -> MastermindResult<()> {
        self.stop_quietly(service);
        self.remove(service, true)
    }

    pub fn stop_and_remove(&self, service: &ServiceName) -> MastermindResult<StopOutcome> {
        if !self.is_running(service)? {
            return Ok(StopOutcome::NotRunning);
        }
        self.stop(service)?;
        self.remove(service, false)?;
        Ok(StopOutcome::Removed)
    }

    fn remove(&self, service: &ServiceName, volumes: bool) -> MastermindResult<()> {
        let mut spec = CommandSpec::new("docker").arg("rm");
        if volumes {
            spec = spec.arg("-v");
        }
        self.runner.run_checked(&spec.arg(service.container_key()))?;
        Ok(())
    }

    fn stop_quietly(&self, service: &ServiceName) {
        if let Err(e) = self.stop(service) {
            tracing::warn!(container = %service.container_key(), error = %e, "stop failed, continuing");
        }
    }
}
