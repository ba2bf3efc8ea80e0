//! ComposeRepository port
//!
//! Persists the compose topology document.

use std::path::Path;

use crate::domain::entities::ComposeTopology;
use crate::error::MastermindResult;

pub trait ComposeRepository: Send + Sync {
    /// `None` when the file does not exist; parse failures are `ComposeCorrupted`.
    fn load(&self) -> MastermindResult<Option<ComposeTopology>>;

    fn save(&self, topology: &ComposeTopology) -> MastermindResult<()>;

    fn path(&self) -> &Path;

    fn exists(&self) -> bool {
        self.path().exists()
    }
}
