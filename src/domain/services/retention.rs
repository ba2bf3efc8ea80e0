//! Backup retention policy

use std::time::{Duration, SystemTime};

/// File in the scheduled backup directory that purges never delete
pub const PROTECTED_FILE: &str = "cron-config.json";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Keep backups for `days` days; zero disables purging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub days: u32,
}

impl RetentionPolicy {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn is_enabled(&self) -> bool {
        self.days > 0
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(u64::from(self.days) * SECONDS_PER_DAY)
    }

    /// Whether a file last modified at `modified` is past retention at `now`.
    ///
    /// Files from the future are never expired.
    pub fn is_expired(&self, modified: SystemTime, now: SystemTime) -> bool {
        if !self.is_enabled() {
            return false;
        }
        now.duration_since(modified)
            .map(|age| age > self.max_age())
            .unwrap_or(false)
    }

    pub fn should_delete(&self, file_name: &str, modified: SystemTime, now: SystemTime) -> bool {
        file_name != PROTECTED_FILE && self.is_expired(modified, now)
    }
}
