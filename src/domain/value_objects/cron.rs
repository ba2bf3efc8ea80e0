//! Cron schedule value objects

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MastermindError, MastermindResult};

static CRON_FIVE_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+|\*)\s+(\d+|\*)\s+(\d+|\*)\s+(\d+|\*)\s+(\d+|\*)$")
        .expect("cron pattern is valid")
});

/// A five-field cron expression (`min hour day month day-of-week`).
///
/// Each field is a number or `*`; ranges, lists and steps are not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression(String);

impl CronExpression {
    pub fn parse(value: &str) -> MastermindResult<Self> {
        let trimmed = value.trim();
        if CRON_FIVE_FIELDS.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(MastermindError::InvalidCron {
                expression: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CronExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backup frequency choices offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFrequency {
    Hourly,
    Daily,
    Weekly,
    Custom,
}

impl BackupFrequency {
    pub const ALL: [BackupFrequency; 4] = [
        BackupFrequency::Hourly,
        BackupFrequency::Daily,
        BackupFrequency::Weekly,
        BackupFrequency::Custom,
    ];

    /// Preset expression, `None` for `Custom`
    pub fn preset(&self) -> Option<CronExpression> {
        let expr = match self {
            BackupFrequency::Hourly => "0 * * * *",
            BackupFrequency::Daily => "0 0 * * *",
            BackupFrequency::Weekly => "0 0 * * 0",
            BackupFrequency::Custom => return None,
        };
        Some(CronExpression(expr.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackupFrequency::Hourly => "Every hour",
            BackupFrequency::Daily => "Daily at midnight",
            BackupFrequency::Weekly => "Weekly (Sunday at midnight)",
            BackupFrequency::Custom => "Custom cron expression (advanced)",
        }
    }
}
