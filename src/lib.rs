//! Mastermind - per-service database scaffolding
//!
//! Mastermind bootstraps a database setup for each service of a project
//! (Docker container, Sequelize config, migrations/models/seeders folders),
//! keeps a JSON registry of those services in `.mastermindrc` and a compose
//! topology in `docker-compose.yml`, and drives the service lifecycle
//! (migrate, seed, backup, purge, start/stop) through external tools.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::Settings;
pub use domain::entities::{BackupCronConfig, ComposeTopology, ProjectConfig, ServiceEntry};
pub use domain::services::{derive_paths, DerivedPaths};
pub use domain::value_objects::{DatabaseKind, Environment, Orm, ServiceName};
pub use error::{MastermindError, MastermindResult};
pub use presentation::factory::Workspace;
