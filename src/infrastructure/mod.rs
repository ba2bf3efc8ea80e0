//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Project config (JSON), compose file (YAML), backup configs
//! - `process/` - Command runners (system, recording)
//! - `network` - Host port probes
//! - `templates/` - Generated file contents

pub mod network;
pub mod process;
pub mod repositories;
pub mod templates;

// Re-export for convenience
pub use network::{StaticPortProbe, TcpPortProbe};
pub use process::{RecordingRunner, SystemCommandRunner};
pub use repositories::{JsonBackupConfigStore, JsonProjectConfigRepository, YamlComposeRepository};
