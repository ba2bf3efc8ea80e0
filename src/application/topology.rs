//! Compose Topology Builder
//!
//! Adds a database container (and its named volume) to the compose file, or
//! removes them. Existing declarations are never overwritten.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{ComposeTopology, DatabaseContainer};
use crate::domain::ports::{ComposeRepository, ProjectConfigRepository};
use crate::domain::value_objects::{EngineProfile, ServiceName};
use crate::error::{MastermindError, MastermindResult};

/// What `upsert_service` changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertReport {
    pub container_key: String,
    pub volume_key: String,
    pub service_added: bool,
    pub volume_added: bool,
    pub compose_path: PathBuf,
}

/// What `remove_service` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveReport {
    pub service_removed: bool,
    pub volume_removed: bool,
}

pub struct TopologyBuilder {
    compose: Arc<dyn ComposeRepository>,
    config: Arc<dyn ProjectConfigRepository>,
    project_root: PathBuf,
}

impl TopologyBuilder {
    pub fn new(
        compose: Arc<dyn ComposeRepository>,
        config: Arc<dyn ProjectConfigRepository>,
        project_root: PathBuf,
    ) -> Self {
        Self {
            compose,
            config,
            project_root,
        }
    }

    /// Insert `<name>-db` and `<name>-data` when absent, then write the file.
    ///
    /// Unknown engines get the fallback profile. Any load error aborts before
    /// anything is written.
    pub fn upsert_service(
        &self,
        service: &ServiceName,
        db_type: &str,
        port: u16,
    ) -> MastermindResult<UpsertReport> {
        let root_dir = self
            .config
            .load()?
            .root_dir
            .ok_or_else(|| MastermindError::ConfigMissing {
                path: self.config.path().to_path_buf(),
            })?;

        let mut topology = self
            .compose
            .load()?
            .unwrap_or_else(ComposeTopology::skeleton);
        topology.ensure_network();

        let container_key = service.container_key();
        let volume_key = service.volume_key();
        let profile = EngineProfile::for_name(db_type);
        let context = self.build_context(&root_dir, service.as_str());

        let declaration = serde_yaml_ng::to_value(DatabaseContainer::new(
            &container_key,
            &volume_key,
            &context,
            port,
            profile.default_port,
            profile.mount_path,
        ))?;

        let service_added = topology.insert_service_if_absent(&container_key, declaration);
        if !service_added {
            tracing::warn!(service = %container_key, "service already exists in compose file");
        }
        let volume_added = topology.insert_volume_if_absent(&volume_key);
        if !volume_added {
            tracing::warn!(volume = %volume_key, "volume already exists in compose file");
        }

        self.compose.save(&topology)?;

        Ok(UpsertReport {
            container_key,
            volume_key,
            service_added,
            volume_added,
            compose_path: self.compose.path().to_path_buf(),
        })
    }

    /// Remove `<name>-db` and `<name>-data`. A missing compose file is a no-op.
    pub fn remove_service(&self, service: &ServiceName) -> MastermindResult<RemoveReport> {
        let Some(mut topology) = self.compose.load()? else {
            return Ok(RemoveReport::default());
        };

        let report = RemoveReport {
            service_removed: topology.remove_service(&service.container_key()),
            volume_removed: topology.remove_volume(&service.volume_key()),
        };
        if report.service_removed || report.volume_removed {
            self.compose.save(&topology)?;
        }
        Ok(report)
    }

    /// `rootDir/<service>/docker` relative to the compose file's directory
    pub fn build_context(&self, root_dir: &str, service: &str) -> String {
        let docker_dir = self.project_root.join(root_dir).join(service).join("docker");
        let compose_dir = self
            .compose
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.project_root.clone());

        let relative = pathdiff::diff_paths(&docker_dir, &compose_dir).unwrap_or(docker_dir);
        let rendered = relative.display().to_string().replace('\\', "/");
        if rendered.starts_with("..") || Path::new(&rendered).is_absolute() {
            rendered
        } else {
            format!("./{}", rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProjectConfig;
    use crate::infrastructure::{JsonProjectConfigRepository, YamlComposeRepository};
    use std::fs;
    use tempfile::tempdir;

    fn builder(root: &Path) -> TopologyBuilder {
        let config = JsonProjectConfigRepository::with_path(root.join(".mastermindrc"));
        config.save(&ProjectConfig::with_root_dir("./src")).unwrap();
        TopologyBuilder::new(
            Arc::new(YamlComposeRepository::with_path(root.join("docker-compose.yml"))),
            Arc::new(config),
            root.to_path_buf(),
        )
    }

    #[test]
    fn creates_skeleton_and_inserts_service() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let name = ServiceName::parse("auth").unwrap();

        let report = builder.upsert_service(&name, "mysql", 3306).unwrap();
        assert!(report.service_added && report.volume_added);

        let yaml = fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap();
        let topology: ComposeTopology = serde_yaml_ng::from_str(&yaml).unwrap();
        let svc = &topology.services["auth-db"];
        assert_eq!(svc["build"]["context"].as_str(), Some("./src/auth/docker"));
        assert_eq!(svc["env_file"].as_str(), Some("./src/auth/docker/.env"));
        assert_eq!(svc["ports"][0].as_str(), Some("3306:3306"));
        assert!(topology.has_volume("auth-data"));
    }

    #[test]
    fn existing_service_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let name = ServiceName::parse("auth").unwrap();

        builder.upsert_service(&name, "mysql", 3306).unwrap();
        let report = builder.upsert_service(&name, "mysql", 3399).unwrap();

        assert!(!report.service_added);
        assert!(!report.volume_added);
        let topology: ComposeTopology = serde_yaml_ng::from_str(
            &fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap(),
        )
        .unwrap();
        assert_eq!(topology.host_ports(), vec![3306]);
    }

    #[test]
    fn unknown_engine_uses_fallback_mount() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let name = ServiceName::parse("legacy").unwrap();

        builder.upsert_service(&name, "oracle", 3310).unwrap();

        let yaml = fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap();
        assert!(yaml.contains("legacy-data:/data/unknown"));
        assert!(yaml.contains("3310:3306"));
    }

    #[test]
    fn corrupted_compose_aborts_without_writing() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let path = dir.path().join("docker-compose.yml");
        fs::write(&path, "services: [broken").unwrap();

        let name = ServiceName::parse("auth").unwrap();
        assert!(builder.upsert_service(&name, "mysql", 3306).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "services: [broken");
    }

    #[test]
    fn remove_service_drops_both_keys() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let name = ServiceName::parse("auth").unwrap();
        builder.upsert_service(&name, "mysql", 3306).unwrap();

        let report = builder.remove_service(&name).unwrap();
        assert!(report.service_removed && report.volume_removed);
        assert_eq!(builder.remove_service(&name).unwrap(), RemoveReport::default());
    }

    #[test]
    fn sanitized_keys_for_names_with_spaces() {
        let dir = tempdir().unwrap();
        let builder = builder(dir.path());
        let name = ServiceName::parse("user profile").unwrap();

        let report = builder.upsert_service(&name, "postgres", 5432).unwrap();
        assert_eq!(report.container_key, "user-profile-db");
        assert_eq!(report.volume_key, "user-profile-data");
    }
}
