//! Domain Services
//!
//! Stateless functions over domain values.

pub mod cron_table;
mod host_ports;
mod path_deriver;
mod retention;

pub use cron_table::{backup_line, backup_tag, BackupJob};
pub use host_ports::host_port;
pub use path_deriver::{derive_paths, DerivedPaths};
pub use retention::{RetentionPolicy, PROTECTED_FILE};
