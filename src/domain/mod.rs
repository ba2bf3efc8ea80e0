//! Domain Layer
//!
//! Pure data and rules for the project registry, the compose topology and
//! scheduled backups, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Documents persisted by the tool (ProjectConfig, ComposeTopology, BackupCronConfig)
//! - `value_objects/` - Small validated types (ServiceName, DatabaseKind, Orm, CronExpression)
//! - `services/` - Pure functions (path derivation, host ports, cron table edits, retention)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system, network or processes directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
