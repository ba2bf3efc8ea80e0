//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod backup_config;
mod compose;
mod project_config;

pub use backup_config::JsonBackupConfigStore;
pub use compose::YamlComposeRepository;
pub use project_config::JsonProjectConfigRepository;
