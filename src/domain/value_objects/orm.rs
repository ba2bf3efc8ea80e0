//! ORM value object

use crate::error::{MastermindError, MastermindResult};

/// ORMs the tool can scaffold for
///
/// The registry stores the ORM as an open string; only these are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orm {
    #[default]
    Sequelize,
}

impl Orm {
    pub const ALL: [Orm; 1] = [Orm::Sequelize];

    pub fn parse(value: &str) -> MastermindResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "sequelize" => Ok(Orm::Sequelize),
            _ => Err(MastermindError::UnsupportedOrm {
                orm: value.to_string(),
            }),
        }
    }

    /// Name stored in the registry
    pub fn as_str(&self) -> &'static str {
        match self {
            Orm::Sequelize => "Sequelize",
        }
    }

    /// Folder under the service directory
    pub fn directory_name(&self) -> &'static str {
        match self {
            Orm::Sequelize => "sequelize",
        }
    }
}

impl std::fmt::Display for Orm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
