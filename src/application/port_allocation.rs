//! Port Allocator

use std::sync::Arc;

use crate::domain::ports::{ComposeRepository, PortProbe};
use crate::domain::value_objects::EngineProfile;
use crate::error::{MastermindError, MastermindResult};

pub struct PortAllocator {
    compose: Arc<dyn ComposeRepository>,
    probe: Arc<dyn PortProbe>,
}

impl PortAllocator {
    pub fn new(compose: Arc<dyn ComposeRepository>, probe: Arc<dyn PortProbe>) -> Self {
        Self { compose, probe }
    }

    /// First host port at or above the engine default that no compose service
    /// maps and the probe reports free.
    pub fn allocate(&self, db_type: &str) -> MastermindResult<u16> {
        let start = EngineProfile::for_name(db_type).default_port;
        let mapped = self
            .compose
            .load()?
            .map(|topology| topology.host_ports())
            .unwrap_or_default();

        for port in start..=u16::MAX {
            if mapped.contains(&port) {
                tracing::debug!(port, "port already mapped in compose file");
                continue;
            }
            if !self.probe.is_free(port) {
                continue;
            }
            if port != start {
                tracing::info!(port, start, "default port taken, using next free port");
            }
            return Ok(port);
        }

        Err(MastermindError::PortExhausted { start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ComposeTopology;
    use crate::infrastructure::{StaticPortProbe, YamlComposeRepository};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn allocator(dir: &Path, busy: &[u16]) -> PortAllocator {
        PortAllocator::new(
            Arc::new(YamlComposeRepository::with_path(dir.join("docker-compose.yml"))),
            Arc::new(StaticPortProbe::with_busy(busy.iter().copied())),
        )
    }

    #[test]
    fn engine_defaults_without_compose_file() {
        let dir = tempdir().unwrap();
        let allocator = allocator(dir.path(), &[]);

        assert_eq!(allocator.allocate("mysql").unwrap(), 3306);
        assert_eq!(allocator.allocate("postgres").unwrap(), 5432);
        assert_eq!(allocator.allocate("cassandra").unwrap(), 3306);
    }

    #[test]
    fn skips_ports_mapped_in_compose() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("docker-compose.yml"),
            "services:\n  a-db:\n    ports:\n      - \"3306:3306\"\n  b-db:\n    ports:\n      - \"127.0.0.1:3307:3306\"\n",
        )
        .unwrap();

        assert_eq!(allocator(dir.path(), &[]).allocate("mysql").unwrap(), 3308);
    }

    #[test]
    fn skips_ports_busy_on_host() {
        let dir = tempdir().unwrap();
        let allocator = allocator(dir.path(), &[5432, 5433]);
        assert_eq!(allocator.allocate("postgres").unwrap(), 5434);
    }

    #[test]
    fn exhausted_range_is_an_error() {
        let dir = tempdir().unwrap();
        let allocator = allocator(dir.path(), &(3306..=u16::MAX).collect::<Vec<_>>());

        let err = allocator.allocate("mysql").unwrap_err();
        assert!(matches!(err, MastermindError::PortExhausted { start: 3306 }));
    }

    #[test]
    fn allocated_port_is_not_already_mapped() {
        let dir = tempdir().unwrap();
        let repo = YamlComposeRepository::with_path(dir.path().join("docker-compose.yml"));
        let mut topology = ComposeTopology::skeleton();
        topology.insert_service_if_absent(
            "x-db",
            serde_yaml_ng::from_str("ports: [\"5432:5432\"]").unwrap(),
        );
        repo.save(&topology).unwrap();

        let port = allocator(dir.path(), &[]).allocate("postgres").unwrap();
        assert_eq!(port, 5433);
        assert!(!topology.is_port_mapped(port));
    }
}
