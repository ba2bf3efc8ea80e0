//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod compose_repository;
pub mod port_probe;
pub mod project_config_repository;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec, StdinSource};
pub use compose_repository::ComposeRepository;
pub use port_probe::PortProbe;
pub use project_config_repository::ProjectConfigRepository;
