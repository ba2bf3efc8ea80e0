//! Database engine value object

use serde::{Deserialize, Serialize};

use crate::error::{MastermindError, MastermindResult};

/// Supported database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// MySQL
    Mysql,
    /// PostgreSQL
    #[serde(alias = "postgresql")]
    #[value(alias = "postgresql")]
    Postgres,
}

/// Container defaults for an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    pub default_port: u16,
    pub mount_path: &'static str,
}

impl EngineProfile {
    /// Used when the engine name is not recognized
    pub const FALLBACK: EngineProfile = EngineProfile {
        default_port: 3306,
        mount_path: "/data/unknown",
    };

    /// Profile for an engine name, falling back for unknown engines
    pub fn for_name(db_type: &str) -> EngineProfile {
        DatabaseKind::parse(db_type)
            .map(|kind| kind.profile())
            .unwrap_or(Self::FALLBACK)
    }
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 2] = [DatabaseKind::Mysql, DatabaseKind::Postgres];

    pub fn parse(value: &str) -> MastermindResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "mysql" => Ok(DatabaseKind::Mysql),
            "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
            _ => Err(MastermindError::UnsupportedDatabase {
                kind: value.to_string(),
            }),
        }
    }

    /// Name stored in the registry
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Postgres => "postgres",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "MySQL",
            DatabaseKind::Postgres => "PostgreSQL",
        }
    }

    pub fn profile(&self) -> EngineProfile {
        match self {
            DatabaseKind::Mysql => EngineProfile {
                default_port: 3306,
                mount_path: "/var/lib/mysql",
            },
            DatabaseKind::Postgres => EngineProfile {
                default_port: 5432,
                mount_path: "/var/lib/postgresql/data",
            },
        }
    }

    /// Sequelize dialect name
    pub fn dialect(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles() {
        assert_eq!(DatabaseKind::Mysql.profile().default_port, 3306);
        assert_eq!(DatabaseKind::Mysql.profile().mount_path, "/var/lib/mysql");
        assert_eq!(DatabaseKind::Postgres.profile().default_port, 5432);
        assert_eq!(
            DatabaseKind::Postgres.profile().mount_path,
            "/var/lib/postgresql/data"
        );
    }

    #[test]
    fn unknown_engine_uses_fallback_profile() {
        let profile = EngineProfile::for_name("oracle");
        assert_eq!(profile.default_port, 3306);
        assert_eq!(profile.mount_path, "/data/unknown");
    }

    #[test]
    fn parse_accepts_postgresql_alias() {
        assert_eq!(
            DatabaseKind::parse("PostgreSQL").unwrap(),
            DatabaseKind::Postgres
        );
        assert!(DatabaseKind::parse("sqlite").is_err());
    }

    #[test]
    fn serde_lowercase() {
        let kind: DatabaseKind = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(kind, DatabaseKind::Mysql);
        let kind: DatabaseKind = serde_json::from_str("\"postgresql\"").unwrap();
        assert_eq!(kind, DatabaseKind::Postgres);
        assert_eq!(
            serde_json::to_string(&DatabaseKind::Postgres).unwrap(),
            "\"postgres\""
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(DatabaseKind::Mysql.to_string(), "MySQL");
        assert_eq!(DatabaseKind::Postgres.to_string(), "PostgreSQL");
    }
}
