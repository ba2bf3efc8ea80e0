//! Error types for Mastermind
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Mastermind operations
pub type MastermindResult<T> = Result<T, MastermindError>;

/// Main error type for Mastermind operations
#[derive(Error, Debug)]
pub enum MastermindError {
    /// The project config has no `rootDir` yet
    #[error("project is not initialized: {path} has no rootDir\n  → Fix: Run `mastermind init`")]
    ConfigMissing { path: PathBuf },

    /// The project config exists but cannot be parsed
    #[error("project config corrupted: {path}\n  → Fix: Repair the JSON or delete the file and run `mastermind init`\n  → Details: {message}")]
    ConfigCorrupted { path: PathBuf, message: String },

    /// The compose document exists but cannot be parsed
    #[error("compose file corrupted: {path}\n  → Details: {message}")]
    ComposeCorrupted { path: PathBuf, message: String },

    /// A backup cron config exists but cannot be parsed
    #[error("backup config corrupted: {path}\n  → Details: {message}")]
    BackupConfigCorrupted { path: PathBuf, message: String },

    /// Service name is empty or not usable as a directory or container name
    #[error("invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    /// Migration, seeder or model name left blank
    #[error("{what} name cannot be empty")]
    EmptyName { what: &'static str },

    /// No registry entry for the requested service
    #[error("configuration for service '{name}' not found")]
    ServiceNotFound { name: String },

    /// Database engine outside the supported set
    #[error("unsupported database type '{kind}'. Supported types are mysql and postgres")]
    UnsupportedDatabase { kind: String },

    /// ORM outside the supported set
    #[error("unsupported ORM '{orm}'")]
    UnsupportedOrm { orm: String },

    /// Cron expression rejected by validation
    #[error("invalid cron expression '{expression}': use \"min hour day month day-of-week\" (e.g. \"0 * * * *\")")]
    InvalidCron { expression: String },

    /// Purge or retention requested before scheduled backups exist
    #[error("backups are not configured for '{service}': {path} not found\n  → Fix: Configure scheduled backups first")]
    BackupNotConfigured { service: String, path: PathBuf },

    /// Retention period must be a positive number of days
    #[error("invalid retention period '{value}': enter a number greater than 0")]
    InvalidRetention { value: String },

    /// No free host port left above the engine default
    #[error("no free port available starting from {start}")]
    PortExhausted { start: u16 },

    /// A required file is missing (compose file, dump file, ...)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// External program is not installed / not on PATH
    #[error("'{program}' was not found on PATH")]
    ToolNotFound { program: String },

    /// External program exited unsuccessfully
    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl MastermindError {
    /// Errors that must end the interactive session instead of returning to a menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MastermindError::ConfigCorrupted { .. })
    }

    /// Errors caused by missing configuration rather than a failing tool.
    pub fn is_config_missing(&self) -> bool {
        matches!(
            self,
            MastermindError::ConfigMissing { .. }
                | MastermindError::ServiceNotFound { .. }
                | MastermindError::BackupNotConfigured { .. }
        )
    }

    /// Suggested fixes for well-known failure messages.
    pub fn remediation(&self) -> Option<&'static Remediation> {
        remediation_for(&self.to_string())
    }
}

/// Known error signature with suggested fixes
#[derive(Debug, PartialEq, Eq)]
pub struct Remediation {
    pub signature: &'static str,
    pub solutions: &'static [&'static str],
}

const REMEDIATIONS: &[Remediation] = &[
    Remediation {
        signature: "ECONNREFUSED",
        solutions: &[
            "Ensure your database is running.",
            "If using Docker, check that the container is up and reachable.",
            "Verify your database configuration in \".sequelizerc\".",
        ],
    },
    Remediation {
        signature: "ENOENT",
        solutions: &[
            "Check if the file or directory exists.",
            "Verify the file path in your configuration.",
        ],
    },
    Remediation {
        signature: "Cannot connect to the Docker daemon",
        solutions: &[
            "Start Docker Desktop or the docker service.",
            "Check that your user can access the Docker socket.",
        ],
    },
    Remediation {
        signature: "was not found on PATH",
        solutions: &[
            "Install the missing tool and make sure it is on your PATH.",
            "Node tools are run through `npx`; install Node.js if it is missing.",
        ],
    },
];

/// Find the first known signature contained in `message`.
pub fn remediation_for(message: &str) -> Option<&'static Remediation> {
    REMEDIATIONS.iter().find(|r| message.contains(r.signature))
}
