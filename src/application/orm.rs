//! ORM CLI commands (migrations and seeders)

use std::path::PathBuf;
use std::sync::Arc;

use super::layout::ServiceLayout;
use super::registry::RegistryStore;
use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec};
use crate::domain::value_objects::{Environment, Orm};
use crate::error::MastermindResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrmCommand {
    Migrate,
    MigrateUndoAll,
    MigrateUndo,
    SeedAll,
    SeedUndoAll,
    SeedUndo,
}

impl OrmCommand {
    pub const MIGRATIONS: [OrmCommand; 3] = [
        OrmCommand::Migrate,
        OrmCommand::MigrateUndoAll,
        OrmCommand::MigrateUndo,
    ];

    pub const SEEDERS: [OrmCommand; 3] = [
        OrmCommand::SeedAll,
        OrmCommand::SeedUndoAll,
        OrmCommand::SeedUndo,
    ];

    pub fn subcommand(&self) -> &'static str {
        match self {
            OrmCommand::Migrate => "db:migrate",
            OrmCommand::MigrateUndoAll => "db:migrate:undo:all",
            OrmCommand::MigrateUndo => "db:migrate:undo",
            OrmCommand::SeedAll => "db:seed:all",
            OrmCommand::SeedUndoAll => "db:seed:undo:all",
            OrmCommand::SeedUndo => "db:seed:undo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrmCommand::Migrate => "Run all pending migrations",
            OrmCommand::MigrateUndoAll => "Undo all migrations",
            OrmCommand::MigrateUndo => "Undo the latest migration",
            OrmCommand::SeedAll => "Run all seeders",
            OrmCommand::SeedUndoAll => "Undo all seeders",
            OrmCommand::SeedUndo => "Undo the latest seeder",
        }
    }

    /// Destructive commands that must be confirmed first
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, OrmCommand::MigrateUndoAll | OrmCommand::SeedUndoAll)
    }
}

/// How a line of ORM output should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Info,
    Success,
    Plain,
}

pub fn classify_line(line: &str) -> LineKind {
    if line.contains("No migrations were executed") || line.contains("No migration to execute") {
        LineKind::Info
    } else if line.contains("executed successfully") || line.contains("migrated") {
        LineKind::Success
    } else {
        LineKind::Plain
    }
}

pub struct OrmRunner {
    registry: RegistryStore,
    runner: Arc<dyn CommandRunner>,
    project_root: PathBuf,
}

impl OrmRunner {
    pub fn new(
        registry: RegistryStore,
        runner: Arc<dyn CommandRunner>,
        project_root: PathBuf,
    ) -> Self {
        Self {
            registry,
            runner,
            project_root,
        }
    }

    /// The invocation `run` would perform, without running it
    pub fn command_spec(
        &self,
        service: &str,
        command: OrmCommand,
        env: Environment,
    ) -> MastermindResult<CommandSpec> {
        let (root_dir, entry) = self.registry.require_service(service)?;
        Orm::parse(&entry.orm)?;
        let layout = ServiceLayout::new(&self.project_root, &root_dir, service);

        Ok(CommandSpec::new("npx")
            .args(["sequelize-cli", command.subcommand(), "--options-path"])
            .arg(layout.sequelizerc().display().to_string())
            .current_dir(layout.service_dir())
            .env("NODE_ENV", env.as_str()))
    }

    /// Run `command` for `service`; a non-zero exit is `CommandFailed`.
    pub fn run(
        &self,
        service: &str,
        command: OrmCommand,
        env: Environment,
    ) -> MastermindResult<CommandOutput> {
        let spec = self.command_spec(service, command, env)?;
        tracing::info!(service, command = command.subcommand(), env = env.as_str(), "running ORM command");
        self.runner.run_checked(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DatabaseKind;
    use crate::error::MastermindError;
    use crate::infrastructure::{JsonProjectConfigRepository, RecordingRunner};
    use std::path::Path;
    use tempfile::tempdir;

    fn orm_runner(root: &Path, runner: Arc<RecordingRunner>) -> OrmRunner {
        let registry = RegistryStore::new(Arc::new(JsonProjectConfigRepository::with_path(
            root.join(".mastermindrc"),
        )));
        registry
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();
        OrmRunner::new(registry, runner, root.to_path_buf())
    }

    #[test]
    fn migrate_uses_options_path_and_node_env() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let orm = orm_runner(dir.path(), runner.clone());

        orm.run("auth", OrmCommand::Migrate, Environment::Production)
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.program, "npx");
        assert_eq!(&call.args[..3], ["sequelize-cli", "db:migrate", "--options-path"]);
        assert!(call.args[3].ends_with(".sequelizerc"));
        assert!(Path::new(&call.args[3]).is_absolute());
        assert_eq!(call.env, vec![("NODE_ENV".to_string(), "production".to_string())]);
        assert!(call.cwd.as_ref().unwrap().ends_with("src/auth"));
    }

    #[test]
    fn failure_carries_stderr() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new().respond(
            "db:seed:all",
            CommandOutput::failure(1, "connect ECONNREFUSED 127.0.0.1:3306"),
        ));
        let orm = orm_runner(dir.path(), runner);

        let err = orm
            .run("auth", OrmCommand::SeedAll, Environment::Development)
            .unwrap_err();
        assert!(err.to_string().contains("ECONNREFUSED"));
        assert_eq!(err.remediation().unwrap().signature, "ECONNREFUSED");
    }

    #[test]
    fn unknown_service_runs_nothing() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let orm = orm_runner(dir.path(), runner.clone());

        let err = orm
            .run("ghost", OrmCommand::Migrate, Environment::Test)
            .unwrap_err();
        assert!(matches!(err, MastermindError::ServiceNotFound { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn destructive_commands_need_confirmation() {
        let confirmed: Vec<_> = OrmCommand::MIGRATIONS
            .iter()
            .chain(OrmCommand::SEEDERS.iter())
            .filter(|c| c.needs_confirmation())
            .map(|c| c.subcommand())
            .collect();
        assert_eq!(confirmed, vec!["db:migrate:undo:all", "db:seed:undo:all"]);
    }

    #[test]
    fn output_classification() {
        assert_eq!(classify_line("No migrations were executed, database schema was already up to date."), LineKind::Info);
        assert_eq!(classify_line("No migration to execute"), LineKind::Info);
        assert_eq!(classify_line("== 20240101-create-users: migrated (0.021s)"), LineKind::Success);
        assert_eq!(classify_line("Seeder executed successfully"), LineKind::Success);
        assert_eq!(classify_line("Loaded configuration file"), LineKind::Plain);
    }
}
