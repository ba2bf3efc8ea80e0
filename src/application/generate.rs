//! ORM file generation (migrations, seeders, models)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::layout::ServiceLayout;
use super::registry::RegistryStore;
use crate::domain::entities::ServiceEntry;
use crate::domain::value_objects::sanitize;
use crate::error::{MastermindError, MastermindResult};
use crate::infrastructure::templates::{migration_file, model_file, seeder_file};

/// A generated file. `created` is false when the file already existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub created: bool,
}

pub struct OrmFileGenerator {
    registry: RegistryStore,
    project_root: PathBuf,
}

impl OrmFileGenerator {
    pub fn new(registry: RegistryStore, project_root: PathBuf) -> Self {
        Self {
            registry,
            project_root,
        }
    }

    pub fn migration(&self, service: &str, name: &str) -> MastermindResult<GeneratedFile> {
        self.migration_at(service, name, Utc::now())
    }

    pub fn migration_at(
        &self,
        service: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> MastermindResult<GeneratedFile> {
        let slug = file_slug(name, "Migration")?;
        let (layout, entry) = self.resolve(service)?;
        let path = layout
            .resolve(&entry.migrations_dir)
            .join(format!("{}-{}.js", timestamp(now), slug));
        write_new(&path, &migration_file(&slug))
    }

    /// `table` defaults to the seeder name when blank
    pub fn seeder(&self, service: &str, name: &str, table: &str) -> MastermindResult<GeneratedFile> {
        self.seeder_at(service, name, table, Utc::now())
    }

    pub fn seeder_at(
        &self,
        service: &str,
        name: &str,
        table: &str,
        now: DateTime<Utc>,
    ) -> MastermindResult<GeneratedFile> {
        let slug = file_slug(name, "Seeder")?;
        let table = default_table(table, name);
        let (layout, entry) = self.resolve(service)?;
        let path = layout
            .resolve(&entry.seeders_dir)
            .join(format!("{}-{}.js", timestamp(now), slug));
        write_new(&path, &seeder_file(&table))
    }

    /// `table` defaults to the model name when blank
    pub fn model(&self, service: &str, name: &str, table: &str) -> MastermindResult<GeneratedFile> {
        let slug = file_slug(name, "Model")?;
        let table = default_table(table, name);
        let (layout, entry) = self.resolve(service)?;
        let path = layout
            .resolve(&entry.models_dir)
            .join(format!("{}.model.js", slug));
        write_new(&path, &model_file(&class_name(name), &table))
    }

    fn resolve(&self, service: &str) -> MastermindResult<(ServiceLayout, ServiceEntry)> {
        let (root_dir, entry) = self.registry.require_service(service)?;
        Ok((
            ServiceLayout::new(&self.project_root, &root_dir, service),
            entry,
        ))
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

fn file_slug(name: &str, what: &'static str) -> MastermindResult<String> {
    let slug = sanitize(name).to_lowercase();
    if slug.is_empty() {
        return Err(MastermindError::EmptyName { what });
    }
    Ok(slug)
}

fn default_table(table: &str, name: &str) -> String {
    let table = table.trim();
    if table.is_empty() {
        sanitize(name)
    } else {
        table.to_string()
    }
}

/// `user profile` -> `UserProfile`, `order` -> `Order`
fn class_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn write_new(path: &Path, contents: &str) -> MastermindResult<GeneratedFile> {
    if path.exists() {
        tracing::warn!(path = %path.display(), "file exists, not overwriting");
        return Ok(GeneratedFile {
            path: path.to_path_buf(),
            created: false,
        });
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(GeneratedFile {
        path: path.to_path_buf(),
        created: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DatabaseKind;
    use crate::infrastructure::JsonProjectConfigRepository;
    use chrono::TimeZone;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn generator(root: &Path) -> OrmFileGenerator {
        let registry = RegistryStore::new(Arc::new(JsonProjectConfigRepository::with_path(
            root.join(".mastermindrc"),
        )));
        registry
            .add_or_update("auth", "Sequelize", DatabaseKind::Mysql, "./src")
            .unwrap();
        OrmFileGenerator::new(registry, root.to_path_buf())
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn migration_file_name_is_timestamped() {
        let dir = tempdir().unwrap();
        let file = generator(dir.path())
            .migration_at("auth", "Create Users", fixed_now())
            .unwrap();

        assert!(file.created);
        assert_eq!(
            file.path,
            dir.path()
                .join("./src/auth/sequelize/migrations")
                .join("20240309140507-create-users.js")
        );
        assert!(file.path.is_file());
    }

    #[test]
    fn seeder_table_defaults_to_name() {
        let dir = tempdir().unwrap();
        let file = generator(dir.path())
            .seeder_at("auth", "roles", "  ", fixed_now())
            .unwrap();

        let js = fs::read_to_string(&file.path).unwrap();
        assert!(js.contains("bulkInsert('roles'"));
        assert!(file.path.ends_with("20240309140507-roles.js"));
    }

    #[test]
    fn model_class_is_capitalized() {
        let dir = tempdir().unwrap();
        let file = generator(dir.path()).model("auth", "user", "users").unwrap();

        assert!(file.path.ends_with("user.model.js"));
        let js = fs::read_to_string(&file.path).unwrap();
        assert!(js.contains("class User extends Model"));
        assert!(js.contains("tableName: 'users'"));
    }

    #[test]
    fn existing_model_is_kept() {
        let dir = tempdir().unwrap();
        let generator = generator(dir.path());
        let first = generator.model("auth", "user", "").unwrap();
        fs::write(&first.path, "// edited").unwrap();

        let second = generator.model("auth", "user", "").unwrap();
        assert!(!second.created);
        assert_eq!(fs::read_to_string(&second.path).unwrap(), "// edited");
    }

    #[test]
    fn blank_names_are_rejected() {
        let dir = tempdir().unwrap();
        let err = generator(dir.path()).migration("auth", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Migration name cannot be empty");
    }

    #[test]
    fn unknown_service_is_reported() {
        let dir = tempdir().unwrap();
        let err = generator(dir.path()).model("ghost", "user", "").unwrap_err();
        assert!(matches!(err, MastermindError::ServiceNotFound { .. }));
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name("user"), "User");
        assert_eq!(class_name("order item"), "OrderItem");
        assert_eq!(class_name("audit_log"), "AuditLog");
    }
}
