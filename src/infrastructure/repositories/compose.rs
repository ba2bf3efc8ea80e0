//! YAML Compose Repository

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::ComposeTopology;
use crate::domain::ports::ComposeRepository;
use crate::error::{MastermindError, MastermindResult};

pub struct YamlComposeRepository {
    path: PathBuf,
}

impl YamlComposeRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ComposeRepository for YamlComposeRepository {
    fn load(&self) -> MastermindResult<Option<ComposeTopology>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Some(ComposeTopology::skeleton()));
        }

        serde_yaml_ng::from_str(&content)
            .map(Some)
            .map_err(|e| MastermindError::ComposeCorrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    fn save(&self, topology: &ComposeTopology) -> MastermindResult<()> {
        let content = serde_yaml_ng::to_string(topology)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "saved compose file");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
