//! Scheduled backup config entity
//!
//! Stored as `cron-config.json` inside the service's scheduled backup directory.

use serde::{Deserialize, Serialize};

use crate::domain::services::RetentionPolicy;

pub const BACKUP_CONFIG_FILE: &str = "cron-config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCronConfig {
    pub service: String,
    /// Cron expression
    pub frequency: String,
    /// Days; 0 disables purging
    #[serde(default)]
    pub retention_period: u32,
    pub backup_dir: String,
}

impl BackupCronConfig {
    pub fn new(service: &str, frequency: &str, backup_dir: &str) -> Self {
        Self {
            service: service.to_string(),
            frequency: frequency.to_string(),
            retention_period: 0,
            backup_dir: backup_dir.to_string(),
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.retention_period)
    }
}
