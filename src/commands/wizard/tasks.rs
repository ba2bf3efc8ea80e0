//! Work behind each wizard entry

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use mastermind::application::{parse_retention, DeleteOptions, OrmCommand, StopOutcome};
use mastermind::domain::value_objects::{BackupFrequency, CronExpression};
use mastermind::{DatabaseKind, Environment, ServiceName};

use crate::ui::primitives::icon::Icon;

use super::state::{Action, Choice, Screen};
use super::Session;

impl Session {
    pub(super) fn create_service(&self) -> Result<Action> {
        self.workspace.registry().require_root_dir()?;

        let name = self.prompts.validated_text("Service name", |input| {
            ServiceName::parse(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })?;
        let service = ServiceName::parse(&name)?;

        let engines: Vec<&str> = DatabaseKind::ALL.iter().map(|k| k.display_name()).collect();
        let Some(index) = self.prompts.select("Database", &engines, 0)? else {
            return Ok(Action::Back);
        };
        let database = DatabaseKind::ALL[index];

        let report = self
            .workspace
            .scaffolder()
            .create_service(&service, database)?;
        self.reporter.success(format!(
            "Service '{}' created ({} on port {})",
            service,
            database.display_name(),
            report.port
        ));
        for path in &report.written {
            self.reporter.detail(format!("created {}", self.relative(path)));
        }
        for path in &report.skipped {
            self.reporter
                .detail(format!("kept existing {}", self.relative(path)));
        }

        if self
            .prompts
            .confirm("Add the database container to docker-compose.yml?", true)?
        {
            let upsert = self
                .workspace
                .topology()
                .upsert_service(&service, database.as_str(), report.port)?;
            if upsert.service_added {
                self.reporter.success(format!(
                    "Added '{}' to {}",
                    upsert.container_key,
                    self.relative(&upsert.compose_path)
                ));
            } else {
                self.reporter.warn(format!(
                    "'{}' is already declared; left it unchanged",
                    upsert.container_key
                ));
            }
            self.offer_start(&service)?;
        }

        self.reporter.pause();
        Ok(Action::Back)
    }

    fn offer_start(&self, service: &ServiceName) -> Result<()> {
        let containers = self.workspace.containers();
        if !containers.is_runtime_up() {
            self.reporter
                .warn("Docker is not running; start the container later from the Container menu.");
            return Ok(());
        }
        if self.prompts.confirm("Start the container now?", true)? {
            self.reporter
                .step(Icon::Container, format!("Starting {}...", service.container_key()));
            containers.start(service)?;
            self.reporter.success("Container started");
        }
        Ok(())
    }

    pub(super) fn select_service(&self) -> Result<Action> {
        match self.pick_service("Select a service")? {
            Some(service) => Ok(Action::Go(Screen::Service(service.as_str().to_string()))),
            None => Ok(Action::Back),
        }
    }

    pub(super) fn delete_service(&self) -> Result<Action> {
        let Some(service) = self.pick_service("Which service should be deleted?")? else {
            return Ok(Action::Back);
        };
        let prompt = format!("Delete '{}' and all of its files? This cannot be undone", service);
        if !self.prompts.confirm(&prompt, false)? {
            self.reporter.info("Deletion cancelled");
            return Ok(Action::Back);
        }

        let options = DeleteOptions {
            remove_compose: self.workspace.compose_repository().exists()
                && self
                    .prompts
                    .confirm("Also remove it from docker-compose.yml?", true)?,
            remove_container: self.workspace.containers().is_runtime_up()
                && self
                    .prompts
                    .confirm("Stop and remove its container if it is running?", true)?,
        };
        let report = self.workspace.remover().delete(&service, options)?;

        if report.dir_removed {
            self.reporter.step(
                Icon::Trash,
                format!("Removed {}", self.relative(&report.service_dir)),
            );
        } else {
            self.reporter.warn(format!(
                "{} did not exist",
                self.relative(&report.service_dir)
            ));
        }
        if let Some(compose) = report.compose {
            if compose.service_removed || compose.volume_removed {
                self.reporter
                    .detail(format!("removed '{}' from the compose file", service.container_key()));
            }
        }
        if let Some(StopOutcome::Removed) = report.container {
            self.reporter
                .detail(format!("stopped and removed {}", service.container_key()));
        }
        self.reporter.success(format!("Service '{}' deleted", service));
        self.reporter.pause();
        Ok(Action::Back)
    }

    fn pick_service(&self, prompt: &str) -> Result<Option<ServiceName>> {
        let registry = self.workspace.registry();
        registry.require_root_dir()?;
        let config = registry.load()?;
        let names = config.service_names();
        if names.is_empty() {
            self.reporter.warn("No services registered yet. Create one first.");
            self.reporter.pause();
            return Ok(None);
        }
        let Some(index) = self.prompts.select(prompt, &names, 0)? else {
            return Ok(None);
        };
        Ok(Some(ServiceName::parse(names[index])?))
    }

    /// Run the task behind `choice`; navigation choices do nothing here.
    pub(super) fn perform(&self, screen: &Screen, choice: &Choice) -> Result<()> {
        match choice {
            Choice::Open(_) | Choice::Back | Choice::Exit => return Ok(()),
            Choice::ViewConfig => return self.view_config(),
            Choice::ChangeRootDir => return self.change_root_dir(),
            Choice::ResetConfig => return self.reset_config(),
            _ => {}
        }

        let Some(name) = screen.service() else {
            return Ok(());
        };
        let service = ServiceName::parse(name)?;
        match choice {
            Choice::Orm(command) => self.run_orm(&service, *command),
            Choice::GenerateMigration => self.generate_migration(&service),
            Choice::GenerateSeeder => self.generate_seeder(&service),
            Choice::GenerateModel => self.generate_model(&service),
            Choice::ContainerStatus => self.container_status(&service),
            Choice::StartContainer => self.start_container(&service),
            Choice::StopContainer => self.stop_container(&service),
            Choice::RefreshContainer => self.refresh_container(&service),
            Choice::PurgeContainer => self.purge_container(&service),
            Choice::ExportDatabase => self.export_database(&service),
            Choice::ImportDatabase => self.import_database(&service),
            Choice::ResetDatabase => self.reset_database(&service),
            Choice::ScheduleBackup => self.schedule_backup(&service),
            Choice::ViewCronJobs => self.view_cron_jobs(&service),
            Choice::RemoveCronJob => self.remove_cron_job(&service),
            Choice::RemoveAllCronJobs => self.remove_all_cron_jobs(&service),
            Choice::ConfigureRetention => self.configure_retention(&service),
            Choice::PurgeBackups => self.purge_backups(&service),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // ORM
    // ------------------------------------------------------------------------

    fn run_orm(&self, service: &ServiceName, command: OrmCommand) -> Result<()> {
        let envs: Vec<&str> = Environment::ALL.iter().map(|e| e.display_name()).collect();
        let Some(index) = self.prompts.select("Environment", &envs, 0)? else {
            return Ok(());
        };
        let env = Environment::ALL[index];

        if command.needs_confirmation() {
            let prompt = format!("{} for '{}' ({})?", command.label(), service, env);
            if !self.prompts.confirm(&prompt, false)? {
                self.reporter.info("Cancelled");
                return Ok(());
            }
        }

        self.reporter.step(
            Icon::Progress,
            format!("Running {}...", command.subcommand()),
        );
        let output = self.workspace.orm().run(service.as_str(), command, env)?;
        self.reporter.orm_output(&output.stdout);
        self.reporter.success(format!("{} finished", command.label()));
        self.reporter.pause();
        Ok(())
    }

    fn generate_migration(&self, service: &ServiceName) -> Result<()> {
        let name = self.prompts.text("Migration name")?.unwrap_or_default();
        let file = self.workspace.generator().migration(service.as_str(), &name)?;
        self.report_generated("Migration", &file.path, file.created);
        Ok(())
    }

    fn generate_seeder(&self, service: &ServiceName) -> Result<()> {
        let name = self.prompts.text("Seeder name")?.unwrap_or_default();
        let table = self
            .prompts
            .text("Table name (leave empty to use the seeder name)")?
            .unwrap_or_default();
        let file = self
            .workspace
            .generator()
            .seeder(service.as_str(), &name, &table)?;
        self.report_generated("Seeder", &file.path, file.created);
        Ok(())
    }

    fn generate_model(&self, service: &ServiceName) -> Result<()> {
        let name = self.prompts.text("Model name")?.unwrap_or_default();
        let table = self
            .prompts
            .text("Table name (leave empty to use the model name)")?
            .unwrap_or_default();
        let file = self
            .workspace
            .generator()
            .model(service.as_str(), &name, &table)?;
        self.report_generated("Model", &file.path, file.created);
        Ok(())
    }

    fn report_generated(&self, what: &str, path: &Path, created: bool) {
        if created {
            self.reporter
                .success(format!("{} created: {}", what, self.relative(path)));
        } else {
            self.reporter
                .warn(format!("{} already exists: {}", what, self.relative(path)));
        }
        self.reporter.pause();
    }

    // ------------------------------------------------------------------------
    // Container
    // ------------------------------------------------------------------------

    /// Warn and return false when the Docker daemon does not answer
    fn require_runtime(&self) -> bool {
        let up = self.workspace.containers().is_runtime_up();
        if !up {
            self.reporter
                .warn("Docker is not running. Start Docker and try again.");
            self.reporter.pause();
        }
        up
    }

    fn container_status(&self, service: &ServiceName) -> Result<()> {
        if !self.require_runtime() {
            return Ok(());
        }
        let key = service.container_key();
        if self.workspace.containers().is_running(service)? {
            self.reporter.success(format!("{} is running", key));
        } else {
            self.reporter.info(format!("{} is not running", key));
        }
        self.reporter.pause();
        Ok(())
    }

    fn start_container(&self, service: &ServiceName) -> Result<()> {
        if !self.require_runtime() {
            return Ok(());
        }
        self.reporter.step(
            Icon::Container,
            format!("Starting {}...", service.container_key()),
        );
        self.workspace.containers().start(service)?;
        self.reporter.success("Container started");
        self.reporter.pause();
        Ok(())
    }

    fn stop_container(&self, service: &ServiceName) -> Result<()> {
        if !self.require_runtime() {
            return Ok(());
        }
        self.workspace.containers().stop(service)?;
        self.reporter
            .success(format!("{} stopped", service.container_key()));
        self.reporter.pause();
        Ok(())
    }

    fn refresh_container(&self, service: &ServiceName) -> Result<()> {
        if !self.require_runtime() {
            return Ok(());
        }
        self.reporter.step(
            Icon::Container,
            format!("Recreating {}...", service.container_key()),
        );
        self.workspace.containers().refresh(service)?;
        self.reporter.success("Container refreshed");
        self.reporter.pause();
        Ok(())
    }

    fn purge_container(&self, service: &ServiceName) -> Result<()> {
        if !self.require_runtime() {
            return Ok(());
        }
        let prompt = format!(
            "Remove {} and its volumes? All data in it will be lost",
            service.container_key()
        );
        if !self.prompts.confirm(&prompt, false)? {
            self.reporter.info("Cancelled");
            return Ok(());
        }
        self.workspace.containers().purge(service)?;
        self.reporter.step(
            Icon::Trash,
            format!("{} and its volumes were removed", service.container_key()),
        );
        self.reporter.pause();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Database
    // ------------------------------------------------------------------------

    fn export_database(&self, service: &ServiceName) -> Result<()> {
        self.reporter
            .step(Icon::Database, format!("Exporting {}...", service.database_name()));
        let path = self.workspace.database().export(service)?;
        self.reporter
            .success(format!("Exported to {}", self.relative(&path)));
        self.reporter.pause();
        Ok(())
    }

    fn import_database(&self, service: &ServiceName) -> Result<()> {
        let database = self.workspace.database();
        let backups = database.manual_backups_dir(service)?;
        let start = if backups.is_dir() {
            backups
        } else {
            self.project_root().to_path_buf()
        };
        let Some(file) = self.prompts.pick_sql_file(&start)? else {
            return Ok(());
        };

        if self.prompts.confirm("Edit the file before importing?", false)? {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if let Some(edited) = self.prompts.edit(&content, ".sql")? {
                fs::write(&file, edited)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
            }
        }

        self.reporter.step(
            Icon::Database,
            format!("Importing {}...", self.relative(&file)),
        );
        database.import(service, &file)?;
        self.reporter
            .success(format!("Imported into {}", service.database_name()));
        self.reporter.pause();
        Ok(())
    }

    fn reset_database(&self, service: &ServiceName) -> Result<()> {
        let prompt = format!(
            "Drop and recreate {}? All data will be lost",
            service.database_name()
        );
        if !self.prompts.confirm(&prompt, false)? {
            self.reporter.info("Cancelled");
            return Ok(());
        }
        self.workspace.database().reset(service)?;
        self.reporter
            .success(format!("{} was reset", service.database_name()));
        self.reporter.pause();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Backups
    // ------------------------------------------------------------------------

    fn schedule_backup(&self, service: &ServiceName) -> Result<()> {
        let labels: Vec<&str> = BackupFrequency::ALL.iter().map(|f| f.label()).collect();
        let Some(index) = self.prompts.select("Backup frequency", &labels, 1)? else {
            return Ok(());
        };
        let schedule = match BackupFrequency::ALL[index].preset() {
            Some(expr) => expr,
            None => {
                let raw = self.prompts.validated_text(
                    "Cron expression (minute hour day month weekday)",
                    |input| {
                        CronExpression::parse(input)
                            .map(|_| ())
                            .map_err(|_| "Expected five fields of numbers or *".to_string())
                    },
                )?;
                CronExpression::parse(&raw)?
            }
        };

        let backup = self
            .workspace
            .backups()
            .configure_schedule(service, &schedule)?;
        self.reporter.step(
            Icon::Backup,
            format!("Scheduled backups for '{}' ({})", service, schedule),
        );
        self.reporter.detail(&backup.cron_line);
        self.reporter
            .detail(format!("config: {}", self.relative(&backup.config_path)));
        self.reporter.pause();
        Ok(())
    }

    fn view_cron_jobs(&self, service: &ServiceName) -> Result<()> {
        let jobs = self.workspace.backups().list_jobs(service)?;
        if jobs.is_empty() {
            self.reporter
                .info(format!("No cron jobs for '{}'", service));
        } else {
            self.reporter.heading(&format!("Cron jobs for '{}'", service));
            for job in &jobs {
                println!("  {}", job);
            }
        }
        self.reporter.pause();
        Ok(())
    }

    fn remove_cron_job(&self, service: &ServiceName) -> Result<()> {
        let backups = self.workspace.backups();
        let jobs = backups.list_jobs(service)?;
        if jobs.is_empty() {
            self.reporter
                .info(format!("No cron jobs for '{}'", service));
            return Ok(());
        }
        let Some(index) = self.prompts.select("Cron job to remove", &jobs, 0)? else {
            return Ok(());
        };
        backups.remove_job(&jobs[index])?;
        self.reporter.success("Cron job removed");
        self.reporter.pause();
        Ok(())
    }

    fn remove_all_cron_jobs(&self, service: &ServiceName) -> Result<()> {
        let prompt = format!("Remove every cron job for '{}'?", service);
        if !self.prompts.confirm(&prompt, false)? {
            self.reporter.info("Cancelled");
            return Ok(());
        }
        let removed = self.workspace.backups().remove_all_jobs(service)?;
        if removed == 0 {
            self.reporter
                .info(format!("No cron jobs for '{}'", service));
        } else {
            self.reporter
                .success(format!("Removed {} cron job(s)", removed));
        }
        self.reporter.pause();
        Ok(())
    }

    fn configure_retention(&self, service: &ServiceName) -> Result<()> {
        let raw = self
            .prompts
            .validated_text("Delete backups older than how many days?", |input| {
                parse_retention(input)
                    .map(|_| ())
                    .map_err(|_| "Enter a whole number of days greater than 0".to_string())
            })?;
        let days = parse_retention(&raw)?;
        let config = self
            .workspace
            .backups()
            .configure_retention(service, days)?;
        self.reporter.success(format!(
            "Backups older than {} day(s) will be purged ({})",
            config.retention_period, config.frequency
        ));
        self.reporter.pause();
        Ok(())
    }

    fn purge_backups(&self, service: &ServiceName) -> Result<()> {
        let report = self.workspace.backups().purge(service)?;
        if report.retention_days == 0 {
            self.reporter
                .info("Retention is not configured; nothing was deleted");
        } else {
            for path in &report.deleted {
                self.reporter
                    .detail(format!("deleted {}", self.relative(path)));
            }
            self.reporter.step(
                Icon::Trash,
                format!(
                    "Deleted {} backup(s) older than {} day(s), kept {}",
                    report.deleted.len(),
                    report.retention_days,
                    report.kept
                ),
            );
        }
        self.reporter.pause();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    fn view_config(&self) -> Result<()> {
        let rendered = self.workspace.registry().render()?;
        println!("{}", rendered);
        self.reporter.pause();
        Ok(())
    }

    fn change_root_dir(&self) -> Result<()> {
        let registry = self.workspace.registry();
        let current = registry.require_root_dir()?;
        let root_dir = self
            .prompts
            .text_with_default("New root directory", &current)?;
        registry.set_root_dir(&root_dir)?;
        self.reporter
            .success(format!("Root directory set to {}", root_dir));
        self.reporter
            .info("Existing services keep their stored paths");
        self.reporter.pause();
        Ok(())
    }

    fn reset_config(&self) -> Result<()> {
        if !self.prompts.confirm(
            "Reset the configuration? Registered services will be forgotten",
            false,
        )? {
            self.reporter.info("Cancelled");
            return Ok(());
        }
        let default_root = &self.workspace.settings().default_root_dir;
        self.workspace.registry().reset(default_root)?;
        self.reporter
            .success(format!("Configuration reset (rootDir: {})", default_root));
        self.reporter.pause();
        Ok(())
    }

    /// `path` relative to the project root when possible
    fn relative(&self, path: &Path) -> String {
        pathdiff::diff_paths(path, self.project_root())
            .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(".."))
            .unwrap_or_else(|| path.to_path_buf())
            .display()
            .to_string()
    }
}
