//! Service name value object

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MastermindError, MastermindResult};

/// Characters Docker accepts in a container name.
static CONTAINER_SAFE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("container name pattern is valid")
});

/// Trim and collapse every internal whitespace run into a single hyphen.
pub fn sanitize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// A validated service name.
///
/// The trimmed raw name is the registry key and the folder name under
/// `rootDir`; the sanitized form names compose keys and containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn parse(raw: &str) -> MastermindResult<Self> {
        let name = raw.trim();
        let invalid = |reason: &str| MastermindError::InvalidServiceName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name cannot be a relative directory"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }
        if !CONTAINER_SAFE.is_match(&sanitize(name)) {
            return Err(invalid(
                "name must start with a letter or digit and use only letters, digits, spaces, '_', '.' or '-'",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn sanitized(&self) -> String {
        sanitize(&self.0)
    }

    /// Compose service key and container name
    pub fn container_key(&self) -> String {
        format!("{}-db", self.sanitized())
    }

    /// Compose named volume key
    pub fn volume_key(&self) -> String {
        format!("{}-data", self.sanitized())
    }

    /// Identifier usable inside SQL and shell words
    pub fn db_identifier(&self) -> String {
        self.sanitized().replace('-', "_")
    }

    pub fn database_name(&self) -> String {
        format!("{}_db", self.db_identifier())
    }

    pub fn database_user(&self) -> String {
        format!("{}_user", self.db_identifier())
    }

    pub fn database_password(&self) -> String {
        format!("{}_password", self.db_identifier())
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
