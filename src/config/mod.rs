//! Configuration module for Mastermind
//!
//! Tool settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (MASTERMIND_*)
//! 3. Built-in defaults (lowest priority)
//!
//! Project data (`rootDir`, registered services) is not a setting; it lives in
//! the project config file handled by the registry repository.

mod loader;
mod types;

pub use loader::{with_env_overrides, with_env_overrides_from};
pub use types::{
    Settings, DEFAULT_COMPOSE_FILE, DEFAULT_CONFIG_FILE, DEFAULT_PACING_MS, DEFAULT_ROOT_DIR,
};
