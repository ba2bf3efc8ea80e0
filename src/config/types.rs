//! Settings types

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project config file name, relative to the project directory
pub const DEFAULT_CONFIG_FILE: &str = ".mastermindrc";
/// Compose file name, relative to the project directory
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
/// `rootDir` written by `init` and by a settings reset
pub const DEFAULT_ROOT_DIR: &str = "./src";
/// Pause between wizard steps
pub const DEFAULT_PACING_MS: u64 = 400;

/// Tool settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the project config and compose file
    pub project_root: PathBuf,
    pub config_file: PathBuf,
    pub compose_file: PathBuf,
    pub default_root_dir: String,
    /// Bind-test candidate ports on the local host
    pub probe_ports: bool,
    pub pacing_ms: u64,
}

impl Settings {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            compose_file: PathBuf::from(DEFAULT_COMPOSE_FILE),
            default_root_dir: DEFAULT_ROOT_DIR.to_string(),
            probe_ports: true,
            pacing_ms: DEFAULT_PACING_MS,
        }
    }

    /// Apply MASTERMIND_* environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        super::loader::with_env_overrides(self)
    }

    /// Disable the pause between wizard steps
    pub fn without_pacing(mut self) -> Self {
        self.pacing_ms = 0;
        self
    }

    pub fn config_path(&self) -> PathBuf {
        resolve(&self.project_root, &self.config_file)
    }

    pub fn compose_path(&self) -> PathBuf {
        resolve(&self.project_root, &self.compose_file)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

fn resolve(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}
