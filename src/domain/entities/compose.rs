//! Compose topology entity
//!
//! Typed view of `docker-compose.yml`. Service declarations written by other
//! tools or by hand are kept as raw YAML values; unknown top-level keys are
//! carried through `extra`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml_ng::{Mapping, Value};

use crate::domain::services::host_port;

pub const COMPOSE_VERSION: &str = "3.8";
pub const NETWORK_NAME: &str = "db-network";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeTopology {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub services: Mapping,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub networks: Mapping,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub volumes: Mapping,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// `services:` with no value parses as null; treat it as an empty mapping.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Mapping, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default())
}

/// Container declaration inserted for a database service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseContainer {
    pub container_name: String,
    pub build: BuildSpec,
    pub restart: String,
    pub env_file: String,
    pub networks: Vec<String>,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    pub context: String,
    pub dockerfile: String,
}

impl DatabaseContainer {
    pub fn new(
        container_key: &str,
        volume_key: &str,
        context: &str,
        host_port: u16,
        container_port: u16,
        mount_path: &str,
    ) -> Self {
        Self {
            container_name: container_key.to_string(),
            build: BuildSpec {
                context: context.to_string(),
                dockerfile: "Dockerfile".to_string(),
            },
            restart: "unless-stopped".to_string(),
            env_file: format!("{}/.env", context.trim_end_matches('/')),
            networks: vec![NETWORK_NAME.to_string()],
            ports: vec![format!("{}:{}", host_port, container_port)],
            volumes: vec![format!("{}:{}", volume_key, mount_path)],
        }
    }
}

impl Default for ComposeTopology {
    fn default() -> Self {
        Self::skeleton()
    }
}

impl ComposeTopology {
    /// Empty document with the shared database network
    pub fn skeleton() -> Self {
        let mut network = Mapping::new();
        network.insert(key("driver"), key("bridge"));

        let mut networks = Mapping::new();
        networks.insert(key(NETWORK_NAME), Value::Mapping(network));

        Self {
            version: Some(key(COMPOSE_VERSION)),
            services: Mapping::new(),
            networks,
            volumes: Mapping::new(),
            extra: Mapping::new(),
        }
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn has_volume(&self, name: &str) -> bool {
        self.volumes.contains_key(name)
    }

    pub fn service_names(&self) -> Vec<String> {
        self.services
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect()
    }

    /// Insert unless a service with the same key exists. Returns whether it was inserted.
    pub fn insert_service_if_absent(&mut self, name: &str, declaration: Value) -> bool {
        if self.has_service(name) {
            return false;
        }
        self.services.insert(key(name), declaration);
        true
    }

    /// Insert an empty named volume unless present. Returns whether it was inserted.
    pub fn insert_volume_if_absent(&mut self, name: &str) -> bool {
        if self.has_volume(name) {
            return false;
        }
        self.volumes.insert(key(name), Value::Mapping(Mapping::new()));
        true
    }

    /// Make sure the shared network is declared
    pub fn ensure_network(&mut self) -> bool {
        if self.networks.contains_key(NETWORK_NAME) {
            return false;
        }
        self.networks
            .insert(key(NETWORK_NAME), Value::Mapping(Mapping::new()));
        true
    }

    pub fn remove_service(&mut self, name: &str) -> bool {
        self.services.remove(name).is_some()
    }

    pub fn remove_volume(&mut self, name: &str) -> bool {
        self.volumes.remove(name).is_some()
    }

    /// Host ports published by any service.
    ///
    /// Understands short syntax strings and long syntax mappings with `published`.
    pub fn host_ports(&self) -> Vec<u16> {
        self.services
            .values()
            .filter_map(|service| service.get("ports"))
            .filter_map(Value::as_sequence)
            .flatten()
            .filter_map(published_port)
            .collect()
    }

    pub fn is_port_mapped(&self, port: u16) -> bool {
        self.host_ports().contains(&port)
    }
}

fn published_port(entry: &Value) -> Option<u16> {
    match entry {
        Value::String(s) => host_port(s),
        Value::Mapping(m) => match m.get("published")? {
            Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        },
        _ => None,
    }
}

fn key(s: &str) -> Value {
    Value::String(s.to_string())
}
