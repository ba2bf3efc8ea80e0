//! Container files for each database engine

use super::render;
use crate::domain::value_objects::DatabaseKind;

pub struct DatabaseTemplateVars<'a> {
    pub db_name: &'a str,
    pub db_user: &'a str,
    pub db_password: &'a str,
    pub root_password: &'a str,
    pub port: u16,
}

const MYSQL_DOCKERFILE: &str = r#"FROM mysql:8.0

ENV MYSQL_DATABASE={{db_name}}

COPY init.sql /docker-entrypoint-initdb.d/init.sql

EXPOSE 3306
"#;

const MYSQL_ENV: &str = r#"MYSQL_ROOT_PASSWORD={{root_password}}
MYSQL_DATABASE={{db_name}}
MYSQL_USER={{db_user}}
MYSQL_PASSWORD={{db_password}}

DB_HOST=127.0.0.1
DB_PORT={{port}}
DB_NAME={{db_name}}
DB_USER={{db_user}}
DB_PASSWORD={{db_password}}
"#;

const MYSQL_INIT_SQL: &str = r#"CREATE DATABASE IF NOT EXISTS `{{db_name}}`;
CREATE USER IF NOT EXISTS '{{db_user}}'@'%' IDENTIFIED BY '{{db_password}}';
GRANT ALL PRIVILEGES ON `{{db_name}}`.* TO '{{db_user}}'@'%';
FLUSH PRIVILEGES;
"#;

const POSTGRES_DOCKERFILE: &str = r#"FROM postgres:16

ENV POSTGRES_DB={{db_name}}

COPY init.sql /docker-entrypoint-initdb.d/init.sql

EXPOSE 5432
"#;

const POSTGRES_ENV: &str = r#"POSTGRES_USER=postgres
POSTGRES_PASSWORD={{root_password}}
POSTGRES_DB={{db_name}}

DB_HOST=127.0.0.1
DB_PORT={{port}}
DB_NAME={{db_name}}
DB_USER={{db_user}}
DB_PASSWORD={{db_password}}
"#;

const POSTGRES_INIT_SQL: &str = r#"DO $$
BEGIN
  IF NOT EXISTS (SELECT FROM pg_roles WHERE rolname = '{{db_user}}') THEN
    CREATE ROLE "{{db_user}}" LOGIN PASSWORD '{{db_password}}';
  END IF;
END
$$;

GRANT ALL PRIVILEGES ON DATABASE "{{db_name}}" TO "{{db_user}}";
ALTER DATABASE "{{db_name}}" OWNER TO "{{db_user}}";
GRANT ALL ON SCHEMA public TO "{{db_user}}";
"#;

/// `(file name, contents)` for the service's `docker/` directory
pub fn database_files(
    kind: DatabaseKind,
    vars: &DatabaseTemplateVars<'_>,
) -> Vec<(&'static str, String)> {
    let port = vars.port.to_string();
    let values = [
        ("db_name", vars.db_name),
        ("db_user", vars.db_user),
        ("db_password", vars.db_password),
        ("root_password", vars.root_password),
        ("port", port.as_str()),
    ];

    let (dockerfile, env, init_sql) = match kind {
        DatabaseKind::Mysql => (MYSQL_DOCKERFILE, MYSQL_ENV, MYSQL_INIT_SQL),
        DatabaseKind::Postgres => (POSTGRES_DOCKERFILE, POSTGRES_ENV, POSTGRES_INIT_SQL),
    };

    vec![
        ("Dockerfile", render(dockerfile, &values)),
        (".env", render(env, &values)),
        ("init.sql", render(init_sql, &values)),
    ]
}
