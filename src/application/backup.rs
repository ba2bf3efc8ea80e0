//! Scheduled backups, cron jobs and data purge

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::layout::ServiceLayout;
use super::registry::RegistryStore;
use crate::domain::entities::{BackupCronConfig, ServiceEntry};
use crate::domain::ports::{CommandRunner, CommandSpec, StdinSource};
use crate::domain::services::cron_table::{self, BackupJob};
use crate::domain::value_objects::{CronExpression, ServiceName};
use crate::error::{MastermindError, MastermindResult};
use crate::infrastructure::templates::BACKUP_SCRIPT;
use crate::infrastructure::JsonBackupConfigStore;

/// Written by `configure_schedule`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSchedule {
    pub config_path: PathBuf,
    pub script: PathBuf,
    pub cron_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PurgeReport {
    pub retention_days: u32,
    pub deleted: Vec<PathBuf>,
    pub kept: usize,
}

/// Parse a retention period typed by the user (whole days, greater than 0)
pub fn parse_retention(input: &str) -> MastermindResult<u32> {
    match input.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(MastermindError::InvalidRetention {
            value: input.to_string(),
        }),
    }
}

pub struct BackupManager {
    registry: RegistryStore,
    runner: Arc<dyn CommandRunner>,
    store: JsonBackupConfigStore,
    project_root: PathBuf,
}

impl BackupManager {
    pub fn new(
        registry: RegistryStore,
        runner: Arc<dyn CommandRunner>,
        project_root: PathBuf,
    ) -> Self {
        Self {
            registry,
            runner,
            store: JsonBackupConfigStore::new(),
            project_root,
        }
    }

    /// Write the backup config and script, then append a cron line.
    pub fn configure_schedule(
        &self,
        service: &ServiceName,
        schedule: &CronExpression,
    ) -> MastermindResult<BackupSchedule> {
        let (layout, entry) = self.resolve(service)?;
        let backup_dir = layout.scheduled_backups_dir();
        fs::create_dir_all(&backup_dir)?;

        let config = BackupCronConfig::new(
            service.as_str(),
            schedule.as_str(),
            &backup_dir.display().to_string(),
        );
        let config_path = layout.backup_config();
        self.store.save(&config_path, &config)?;

        let script = layout.backup_script();
        write_script(&script)?;

        let cron_line = self.job_line(service, &entry, &script, &config, schedule);
        let table = self.read_table()?;
        self.write_table(&cron_table::with_line(&table, &cron_line))?;
        tracing::info!(service = %service, schedule = %schedule, "scheduled backup configured");

        Ok(BackupSchedule {
            config_path,
            script,
            cron_line,
        })
    }

    /// Cron lines tagged for `service`
    pub fn list_jobs(&self, service: &ServiceName) -> MastermindResult<Vec<String>> {
        Ok(cron_table::jobs_for(&self.read_table()?, service.as_str()))
    }

    pub fn remove_job(&self, job: &str) -> MastermindResult<()> {
        let table = self.read_table()?;
        self.write_table(&cron_table::without_line(&table, job))
    }

    /// Remove every tagged line for `service`; returns how many were removed
    pub fn remove_all_jobs(&self, service: &ServiceName) -> MastermindResult<usize> {
        let table = self.read_table()?;
        let count = cron_table::jobs_for(&table, service.as_str()).len();
        if count > 0 {
            self.write_table(&cron_table::without_jobs_for(&table, service.as_str()))?;
        }
        Ok(count)
    }

    /// Set the retention period and replace the service's cron line with one
    /// that carries it.
    pub fn configure_retention(
        &self,
        service: &ServiceName,
        days: u32,
    ) -> MastermindResult<BackupCronConfig> {
        if days == 0 {
            return Err(MastermindError::InvalidRetention {
                value: days.to_string(),
            });
        }
        let (layout, entry) = self.resolve(service)?;
        let config_path = layout.backup_config();
        let mut config = self.require_config(service, &config_path)?;
        config.retention_period = days;
        self.store.save(&config_path, &config)?;

        let schedule = CronExpression::parse(&config.frequency)?;
        let script = layout.backup_script();
        write_script(&script)?;
        let line = self.job_line(service, &entry, &script, &config, &schedule);

        let table = cron_table::without_jobs_for(&self.read_table()?, service.as_str());
        self.write_table(&cron_table::with_line(&table, &line))?;
        tracing::info!(service = %service, days, "retention configured");

        Ok(config)
    }

    /// Delete backups older than the configured retention period
    pub fn purge(&self, service: &ServiceName) -> MastermindResult<PurgeReport> {
        self.purge_at(service, SystemTime::now())
    }

    pub fn purge_at(&self, service: &ServiceName, now: SystemTime) -> MastermindResult<PurgeReport> {
        let (layout, _) = self.resolve(service)?;
        let config = self.require_config(service, &layout.backup_config())?;
        let policy = config.retention();
        let mut report = PurgeReport {
            retention_days: policy.days,
            ..PurgeReport::default()
        };
        if !policy.is_enabled() {
            tracing::info!(service = %service, "retention is 0, nothing to purge");
            return Ok(report);
        }

        let backup_dir = layout.resolve(&config.backup_dir);
        for entry in fs::read_dir(&backup_dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if policy.should_delete(&name, metadata.modified()?, now) {
                fs::remove_file(entry.path())?;
                tracing::debug!(file = %name, "deleted expired backup");
                report.deleted.push(entry.path());
            } else {
                report.kept += 1;
            }
        }
        report.deleted.sort();
        Ok(report)
    }

    pub fn load_config(&self, service: &ServiceName) -> MastermindResult<Option<BackupCronConfig>> {
        let (layout, _) = self.resolve(service)?;
        self.store.load(&layout.backup_config())
    }

    fn resolve(&self, service: &ServiceName) -> MastermindResult<(ServiceLayout, ServiceEntry)> {
        let (root_dir, entry) = self.registry.require_service(service.as_str())?;
        Ok((
            ServiceLayout::new(&self.project_root, &root_dir, service.as_str()),
            entry,
        ))
    }

    fn require_config(&self, service: &ServiceName, path: &Path) -> MastermindResult<BackupCronConfig> {
        self.store
            .load(path)?
            .ok_or_else(|| MastermindError::BackupNotConfigured {
                service: service.to_string(),
                path: path.to_path_buf(),
            })
    }

    fn job_line(
        &self,
        service: &ServiceName,
        entry: &ServiceEntry,
        script: &Path,
        config: &BackupCronConfig,
        schedule: &CronExpression,
    ) -> String {
        let script = script.display().to_string();
        let database_name = service.database_name();
        cron_table::backup_line(&BackupJob {
            schedule,
            script: &script,
            service: service.as_str(),
            database: entry.database.as_str(),
            database_name: &database_name,
            backup_dir: &config.backup_dir,
            retention_days: config.retention_period,
        })
    }

    /// Current cron table; a user without one has an empty table
    fn read_table(&self) -> MastermindResult<String> {
        let output = self.runner.run(&CommandSpec::new("crontab").arg("-l"))?;
        if output.is_success() {
            return Ok(output.stdout);
        }
        if output.stderr.contains("no crontab") {
            return Ok(String::new());
        }
        Err(MastermindError::CommandFailed {
            command: "crontab -l".to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        })
    }

    fn write_table(&self, table: &str) -> MastermindResult<()> {
        if table.trim().is_empty() {
            let output = self.runner.run(&CommandSpec::new("crontab").arg("-r"))?;
            if !output.is_success() && !output.stderr.contains("no crontab") {
                return Err(MastermindError::CommandFailed {
                    command: "crontab -r".to_string(),
                    code: output.code,
                    stderr: output.stderr.trim().to_string(),
                });
            }
            return Ok(());
        }
        self.runner.run_checked(
            &CommandSpec::new("crontab")
                .arg("-")
                .stdin(StdinSource::Bytes(table.as_bytes().to_vec())),
        )?;
        Ok(())
    }
}

fn write_script(path: &Path) -> MastermindResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BACKUP_SCRIPT)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use crate::domain::value_objects::DatabaseKind;
    use crate::infrastructure::{JsonProjectConfigRepository, RecordingRunner};
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn manager(root: &Path, runner: Arc<RecordingRunner>) -> BackupManager {
        let registry = RegistryStore::new(Arc::new(JsonProjectConfigRepository::with_path(
            root.join(".mastermindrc"),
        )));
        registry
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();
        BackupManager::new(registry, runner, root.to_path_buf())
    }

    fn auth() -> ServiceName {
        ServiceName::parse("auth").unwrap()
    }

    fn daily() -> CronExpression {
        CronExpression::parse("0 0 * * *").unwrap()
    }

    fn written_table(runner: &RecordingRunner) -> String {
        let call = runner
            .calls()
            .into_iter()
            .filter(|c| c.args == ["-"])
            .last()
            .unwrap();
        match call.stdin {
            StdinSource::Bytes(bytes) => String::from_utf8(bytes).unwrap(),
            other => panic!("unexpected stdin {other:?}"),
        }
    }

    #[test]
    fn schedule_appends_to_existing_table() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "crontab -l",
            CommandOutput::success().with_stdout("@reboot echo hi\n"),
        ));
        let manager = manager(dir.path(), runner.clone());

        let schedule = manager.configure_schedule(&auth(), &daily()).unwrap();

        assert!(schedule.config_path.is_file());
        assert!(schedule.script.is_file());
        assert!(schedule.cron_line.starts_with("0 0 * * * bash "));
        assert!(schedule.cron_line.contains(" auth mysql auth_db "));
        assert!(schedule.cron_line.ends_with(" 0 # Backup for auth"));

        let table = written_table(&runner);
        assert!(table.starts_with("@reboot echo hi\n0 0 * * * bash "));
        assert!(table.ends_with("# Backup for auth\n"));

        let config = manager.load_config(&auth()).unwrap().unwrap();
        assert_eq!(config.frequency, "0 0 * * *");
        assert_eq!(config.retention_period, 0);
    }

    #[cfg(unix)]
    #[test]
    fn script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let schedule = manager(dir.path(), runner)
            .configure_schedule(&auth(), &daily())
            .unwrap();

        let mode = fs::metadata(&schedule.script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn missing_crontab_is_an_empty_table() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "crontab -l",
            CommandOutput::failure(1, "no crontab for dev"),
        ));
        assert!(manager(dir.path(), runner).list_jobs(&auth()).unwrap().is_empty());
    }

    #[test]
    fn removing_last_job_clears_table() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "crontab -l",
            CommandOutput::success().with_stdout("0 * * * * bash x # Backup for auth\n"),
        ));
        let manager = manager(dir.path(), runner.clone());

        assert_eq!(manager.remove_all_jobs(&auth()).unwrap(), 1);
        assert_eq!(runner.commands(), vec!["crontab -l", "crontab -r"]);
    }

    #[test]
    fn remove_single_job_keeps_others() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "crontab -l",
            CommandOutput::success()
                .with_stdout("0 * * * * a # Backup for auth\n0 0 * * * b # Backup for auth\n"),
        ));

        manager(dir.path(), runner.clone())
            .remove_job("0 * * * * a # Backup for auth")
            .unwrap();
        assert_eq!(written_table(&runner), "0 0 * * * b # Backup for auth\n");
    }

    #[test]
    fn retention_requires_backup_config() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let err = manager(dir.path(), runner)
            .configure_retention(&auth(), 7)
            .unwrap_err();
        assert!(matches!(err, MastermindError::BackupNotConfigured { .. }));
    }

    #[test]
    fn retention_replaces_cron_line() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "crontab -l",
            CommandOutput::success().with_stdout("0 0 * * * bash old # Backup for auth\n"),
        ));
        let manager = manager(dir.path(), runner.clone());
        manager.configure_schedule(&auth(), &daily()).unwrap();

        let config = manager.configure_retention(&auth(), 7).unwrap();
        assert_eq!(config.retention_period, 7);

        let table = written_table(&runner);
        assert_eq!(table.lines().count(), 1);
        assert!(table.contains(" 7 # Backup for auth"));
    }

    #[test]
    fn purge_deletes_only_expired_files() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let manager = manager(dir.path(), runner);
        let schedule = manager.configure_schedule(&auth(), &daily()).unwrap();
        manager.configure_retention(&auth(), 3).unwrap();

        let backup_dir = schedule.config_path.parent().unwrap().to_path_buf();
        let old = backup_dir.join("dump-auth-old.sql");
        let fresh = backup_dir.join("dump-auth-new.sql");
        File::create(&old).unwrap();
        File::create(&fresh).unwrap();

        let now = SystemTime::now() + DAY * 10;
        File::options()
            .write(true)
            .open(&fresh)
            .unwrap()
            .set_modified(now - DAY)
            .unwrap();

        let report = manager.purge_at(&auth(), now).unwrap();
        assert_eq!(report.retention_days, 3);
        assert_eq!(report.deleted, vec![old.clone()]);
        assert!(!old.exists());
        assert!(fresh.exists());
        assert!(schedule.config_path.exists());
    }

    #[test]
    fn purge_with_zero_retention_deletes_nothing() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let manager = manager(dir.path(), runner);
        let schedule = manager.configure_schedule(&auth(), &daily()).unwrap();
        let dump = schedule.config_path.with_file_name("dump.sql");
        File::create(&dump).unwrap();

        let report = manager
            .purge_at(&auth(), SystemTime::now() + DAY * 365)
            .unwrap();
        assert!(report.deleted.is_empty());
        assert!(dump.exists());
    }

    #[test]
    fn retention_input_parsing() {
        assert_eq!(parse_retention(" 14 ").unwrap(), 14);
        assert!(parse_retention("0").is_err());
        assert!(parse_retention("-3").is_err());
        assert!(parse_retention("week").is_err());
    }
}
