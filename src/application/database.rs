//! Database operations inside the service container
//!
//! Everything runs through `docker exec`. Values that reach a shell inside the
//! container are passed as positional parameters, never spliced into the
//! script text.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::layout::ServiceLayout;
use super::registry::RegistryStore;
use crate::domain::ports::{CommandRunner, CommandSpec, StdinSource};
use crate::domain::value_objects::{DatabaseKind, ServiceName};
use crate::error::{MastermindError, MastermindResult};

/// Superuser inside the postgres image
const POSTGRES_SUPERUSER: &str = "postgres";

const MYSQL_DUMP: &str = r#"mysqldump -uroot -p"$MYSQL_ROOT_PASSWORD" "$1""#;
const MYSQL_IMPORT: &str = r#"mysql -uroot -p"$MYSQL_ROOT_PASSWORD" "$1""#;
const MYSQL_CREATE: &str =
    r#"mysql -uroot -p"$MYSQL_ROOT_PASSWORD" -e "CREATE DATABASE IF NOT EXISTS \`$1\`""#;
const MYSQL_RESET: &str = r#"mysql -uroot -p"$MYSQL_ROOT_PASSWORD" -e "DROP DATABASE IF EXISTS \`$1\`; CREATE DATABASE \`$1\`""#;

pub struct DatabaseOps {
    registry: RegistryStore,
    runner: Arc<dyn CommandRunner>,
    project_root: PathBuf,
}

impl DatabaseOps {
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

    /// Directory holding manual dumps for `service`
    pub fn manual_backups_dir(&self, service: &ServiceName) -> MastermindResult<PathBuf> {
        let root_dir = self.registry.require_root_dir()?;
        Ok(ServiceLayout::new(&self.project_root, &root_dir, service.as_str()).manual_backups_dir())
    }

    /// Dump the service database into `backups/manual/`.
    pub fn export(&self, service: &ServiceName) -> MastermindResult<PathBuf> {
        self.export_at(service, Utc::now())
    }

    pub fn export_at(&self, service: &ServiceName, now: DateTime<Utc>) -> MastermindResult<PathBuf> {
        let kind = self.database_kind(service)?;
        let dir = self.manual_backups_dir(service)?;
        fs::create_dir_all(&dir)?;

        let file = dir.join(format!(
            "dump-{}-{}.sql",
            service.sanitized(),
            now.format("%Y-%m-%dT%H-%M-%S")
        ));
        let db_name = service.database_name();
        let spec = match kind {
            DatabaseKind::Mysql => exec(service, false, shell(MYSQL_DUMP, &db_name)),
            DatabaseKind::Postgres => exec(
                service,
                false,
                vec![
                    "pg_dump".to_string(),
                    "-U".to_string(),
                    POSTGRES_SUPERUSER.to_string(),
                    db_name,
                ],
            ),
        }
        .stdout_to(&file);

        if let Err(e) = self.runner.run_checked(&spec) {
            if file.exists() {
                fs::remove_file(&file)?;
            }
            return Err(e);
        }
        tracing::info!(service = %service, file = %file.display(), "database exported");
        Ok(file)
    }

    /// Create the service database when it does not exist yet
    pub fn ensure_database(&self, service: &ServiceName) -> MastermindResult<()> {
        let db_name = service.database_name();
        match self.database_kind(service)? {
            DatabaseKind::Mysql => {
                self.runner
                    .run_checked(&exec(service, false, shell(MYSQL_CREATE, &db_name)))?;
            }
            DatabaseKind::Postgres => {
                let output = self.runner.run(&exec(
                    service,
                    false,
                    vec![
                        "createdb".to_string(),
                        "-U".to_string(),
                        POSTGRES_SUPERUSER.to_string(),
                        db_name.clone(),
                    ],
                ))?;
                if !output.is_success() && !output.stderr.contains("already exists") {
                    return Err(MastermindError::CommandFailed {
                        command: format!("createdb {}", db_name),
                        code: output.code,
                        stderr: output.stderr.trim().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Stream `file` into the service database, creating it first if needed
    pub fn import(&self, service: &ServiceName, file: &Path) -> MastermindResult<()> {
        if !file.is_file() {
            return Err(MastermindError::FileNotFound {
                path: file.to_path_buf(),
            });
        }
        self.ensure_database(service)?;

        let db_name = service.database_name();
        let spec = match self.database_kind(service)? {
            DatabaseKind::Mysql => exec(service, true, shell(MYSQL_IMPORT, &db_name)),
            DatabaseKind::Postgres => exec(
                service,
                true,
                vec![
                    "psql".to_string(),
                    "-U".to_string(),
                    POSTGRES_SUPERUSER.to_string(),
                    "-d".to_string(),
                    db_name,
                ],
            ),
        }
        .stdin(StdinSource::File(file.to_path_buf()));

        self.runner.run_checked(&spec)?;
        tracing::info!(service = %service, file = %file.display(), "database imported");
        Ok(())
    }

    /// Drop and recreate the service database
    pub fn reset(&self, service: &ServiceName) -> MastermindResult<()> {
        let db_name = service.database_name();
        match self.database_kind(service)? {
            DatabaseKind::Mysql => {
                self.runner
                    .run_checked(&exec(service, false, shell(MYSQL_RESET, &db_name)))?;
            }
            DatabaseKind::Postgres => {
                for program in ["dropdb", "createdb"] {
                    let mut args = vec![program.to_string()];
                    if program == "dropdb" {
                        args.extend(["--if-exists".to_string(), "--force".to_string()]);
                    }
                    args.extend([
                        "-U".to_string(),
                        POSTGRES_SUPERUSER.to_string(),
                        db_name.clone(),
                    ]);
                    self.runner.run_checked(&exec(service, false, args))?;
                }
            }
        }
        tracing::info!(service = %service, "database reset");
        Ok(())
    }

    fn database_kind(&self, service: &ServiceName) -> MastermindResult<DatabaseKind> {
        let (_, entry) = self.registry.require_service(service.as_str())?;
        Ok(entry.database)
    }
}

/// `docker exec [-i] <container> <command...>`
fn exec(service: &ServiceName, interactive: bool, command: Vec<String>) -> CommandSpec {
    let mut spec = CommandSpec::new("docker").arg("exec");
    if interactive {
        spec = spec.arg("-i");
    }
    spec.arg(service.container_key()).args(command)
}

/// `sh -c <script> sh <arg>`: the script reads `arg` as `$1`
fn shell(script: &str, arg: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
        "sh".to_string(),
        arg.to_string(),
    ]
}
