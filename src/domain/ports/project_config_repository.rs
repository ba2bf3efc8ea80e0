//! ProjectConfigRepository port
//!
//! Persists the project registry (`.mastermindrc`).

use std::path::Path;

use crate::domain::entities::ProjectConfig;
use crate::error::MastermindResult;

pub trait ProjectConfigRepository: Send + Sync {
    /// Load the config; a missing file yields the default (uninitialized) config.
    ///
    /// A file that cannot be parsed is `ConfigCorrupted`.
    fn load(&self) -> MastermindResult<ProjectConfig>;

    /// Replace the whole document on disk.
    fn save(&self, config: &ProjectConfig) -> MastermindResult<()>;

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn path(&self) -> &Path;
}
