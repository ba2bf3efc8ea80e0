//! Sequelize CLI files

use super::render;

pub const SEQUELIZERC_FILE: &str = ".sequelizerc";

const CONFIG_JS: &str = r#"'use strict';

const base = {
  username: process.env.DB_USER || '{{db_user}}',
  password: process.env.DB_PASSWORD || '{{db_password}}',
  database: process.env.DB_NAME || '{{db_name}}',
  host: process.env.DB_HOST || '127.0.0.1',
  port: Number(process.env.DB_PORT || {{port}}),
  dialect: '{{dialect}}',
};

module.exports = {
  development: { ...base },
  test: { ...base, logging: false },
  production: { ...base, logging: false },
};
"#;

const SEQUELIZERC: &str = r#"const path = require('path');

module.exports = {
  config: path.resolve(__dirname, 'config.js'),
  'migrations-path': path.resolve(__dirname, 'migrations'),
  'models-path': path.resolve(__dirname, 'models'),
  'seeders-path': path.resolve(__dirname, 'seeders'),
};
"#;

const MIGRATION: &str = r#"'use strict';

/** @type {import('sequelize-cli').Migration} */
module.exports = {
  async up(queryInterface, Sequelize) {
    // {{name}}
  },

  async down(queryInterface, Sequelize) {
  },
};
"#;

const SEEDER: &str = r#"'use strict';

/** @type {import('sequelize-cli').Migration} */
module.exports = {
  async up(queryInterface, Sequelize) {
    await queryInterface.bulkInsert('{{table_name}}', [], {});
  },

  async down(queryInterface, Sequelize) {
    await queryInterface.bulkDelete('{{table_name}}', null, {});
  },
};
"#;

const MODEL: &str = r#"'use strict';

const { Model } = require('sequelize');

module.exports = (sequelize, DataTypes) => {
  class {{class_name}} extends Model {
    static associate(models) {
    }
  }

  {{class_name}}.init(
    {
      id: {
        type: DataTypes.INTEGER,
        primaryKey: true,
        autoIncrement: true,
      },
    },
    {
      sequelize,
      modelName: '{{class_name}}',
      tableName: '{{table_name}}',
    },
  );

  return {{class_name}};
};
"#;

pub fn sequelize_config(
    dialect: &str,
    db_name: &str,
    db_user: &str,
    db_password: &str,
    port: u16,
) -> String {
    let port = port.to_string();
    render(
        CONFIG_JS,
        &[
            ("dialect", dialect),
            ("db_name", db_name),
            ("db_user", db_user),
            ("db_password", db_password),
            ("port", port.as_str()),
        ],
    )
}

pub fn sequelizerc() -> String {
    SEQUELIZERC.to_string()
}

pub fn migration_file(name: &str) -> String {
    render(MIGRATION, &[("name", name)])
}

/// Escape text for a single-quoted JavaScript string literal.
fn js_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

pub fn seeder_file(table_name: &str) -> String {
    let table_name = js_single_quoted(table_name);
    render(SEEDER, &[("table_name", table_name.as_str())])
}

pub fn model_file(class_name: &str, table_name: &str) -> String {
    let table_name = js_single_quoted(table_name);
    render(
        MODEL,
        &[("class_name", class_name), ("table_name", table_name.as_str())],
    )
}
