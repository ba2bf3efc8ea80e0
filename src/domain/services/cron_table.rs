//! Cron table edits
//!
//! The user's cron table is treated as plain text. Lines owned by the tool end
//! with a `# Backup for <service>` tag; everything else is passed through.

use crate::domain::value_objects::CronExpression;

/// Arguments of one scheduled backup job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupJob<'a> {
    pub schedule: &'a CronExpression,
    pub script: &'a str,
    pub service: &'a str,
    pub database: &'a str,
    pub database_name: &'a str,
    pub backup_dir: &'a str,
    pub retention_days: u32,
}

pub fn backup_tag(service: &str) -> String {
    format!("# Backup for {}", service)
}

pub fn is_backup_line(line: &str, service: &str) -> bool {
    line.trim_end().ends_with(&backup_tag(service))
}

/// Render the cron line for a job, including its tag.
pub fn backup_line(job: &BackupJob<'_>) -> String {
    let retention = job.retention_days.to_string();
    let words = [
        "bash",
        job.script,
        job.service,
        job.database,
        job.database_name,
        job.backup_dir,
        retention.as_str(),
    ];
    let command: Vec<String> = words.iter().map(|w| cron_word(w)).collect();

    format!(
        "{} {} {}",
        job.schedule,
        command.join(" "),
        backup_tag(job.service)
    )
}

/// Tagged lines for `service`, in table order
pub fn jobs_for(table: &str, service: &str) -> Vec<String> {
    table
        .lines()
        .filter(|line| is_backup_line(line, service))
        .map(|line| line.trim().to_string())
        .collect()
}

pub fn without_jobs_for(table: &str, service: &str) -> String {
    retain_lines(table, |line| !is_backup_line(line, service))
}

pub fn without_line(table: &str, job: &str) -> String {
    retain_lines(table, |line| line.trim() != job.trim())
}

pub fn with_line(table: &str, job: &str) -> String {
    let mut lines: Vec<&str> = table.lines().filter(|l| !l.trim().is_empty()).collect();
    lines.push(job);
    finish(lines)
}

fn retain_lines(table: &str, keep: impl Fn(&str) -> bool) -> String {
    let lines: Vec<&str> = table
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter(|l| keep(l))
        .collect();
    finish(lines)
}

/// Joined table with a trailing newline, or empty when no lines remain
fn finish(lines: Vec<&str>) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Quote one shell word for a cron command line.
///
/// `%` is a line break for cron and must be escaped even inside quotes.
fn cron_word(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:@+,".contains(c));
    let quoted = if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    };
    quoted.replace('%', r"\%")
}
