mod common;

use common::TestEnv;

#[test]
fn list_requires_init() {
    let env = TestEnv::new();

    let result = env.run(&["list"]);

    assert!(!result.success);
    assert!(result.stderr.contains("mastermind init"), "{}", result.stderr);
}

#[test]
fn list_shows_registered_services() {
    let env = TestEnv::new();
    env.write_project_file(
        ".mastermindrc",
        r#"{
  "rootDir": "./src",
  "services": {
    "auth": {
      "database": "mysql",
      "orm": "Sequelize",
      "migrationsDir": "./src/auth/sequelize/migrations",
      "modelsDir": "./src/auth/sequelize/models",
      "seedersDir": "./src/auth/sequelize/seeders"
    }
  }
}"#,
    );

    let result = env.run(&["list"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("auth (MySQL, Sequelize)"), "{}", result.stdout);
    assert!(result.stdout.contains("./src/auth/sequelize/migrations"));
}

#[test]
fn no_subcommand_prints_help() {
    let env = TestEnv::new();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Usage: mastermind"), "{}", result.stdout);
    assert!(result.stdout.contains("wizard"));
}
