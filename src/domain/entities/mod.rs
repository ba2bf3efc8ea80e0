//! Domain Entities
//!
//! Documents the tool reads and rewrites.
//! - `ProjectConfig` - `.mastermindrc`, the service registry
//! - `ComposeTopology` - `docker-compose.yml`
//! - `BackupCronConfig` - per-service scheduled backup settings

mod backup_config;
mod compose;
mod project_config;

pub use backup_config::{BackupCronConfig, BACKUP_CONFIG_FILE};
pub use compose::{BuildSpec, ComposeTopology, DatabaseContainer, COMPOSE_VERSION, NETWORK_NAME};
pub use project_config::{ProjectConfig, ServiceEntry};
