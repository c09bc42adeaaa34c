//! Loading definitions and configuration from files, then generating
//! statements the way the binary does.

use std::fs;
use std::path::PathBuf;

use oxide_dbal_cli::{create_statements, diff_statements, load_config, load_table, CliError};
use oxide_dbal_mysql::{MySqlConfig, MySqlPlatform};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const USERS_V1: &str = r#"{
    "name": "users",
    "columns": [
        {"name": "id", "type": "integer", "autoincrement": true},
        {"name": "name", "type": "string", "length": 100}
    ],
    "primary_key": ["id"]
}"#;

const USERS_V2: &str = r#"{
    "name": "users",
    "columns": [
        {"name": "id", "type": "integer", "autoincrement": true},
        {"name": "name", "type": "string", "length": 100},
        {"name": "email", "type": "string", "length": 180, "nullable": true}
    ],
    "primary_key": ["id"],
    "indexes": [{"name": "uniq_email", "columns": ["email"], "unique": true}]
}"#;

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "mysql.json",
        r#"{"charset": "utf8mb4", "engine": "MyISAM"}"#,
    );

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.charset, "utf8mb4");
    assert_eq!(config.engine, "MyISAM");
    assert_eq!(
        config.foreign_key_engines,
        MySqlConfig::default().foreign_key_engines
    );
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        load_config(Some(&path)),
        Err(CliError::Read { .. })
    ));
}

#[test]
fn malformed_definition_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{\"name\": ");
    assert!(matches!(
        load_table(&path, &MySqlConfig::default()),
        Err(CliError::Parse { .. })
    ));
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn create_from_definition_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "users.json", USERS_V1);
    let config_path = write(&dir, "mysql.json", r#"{"charset": "utf8mb4"}"#);

    let config = load_config(Some(&config_path)).unwrap();
    let table = load_table(&path, &config).unwrap();
    let platform = MySqlPlatform::with_config(config);

    assert_eq!(
        create_statements(&platform, &table).unwrap(),
        vec![
            "CREATE TABLE users (id INT AUTO_INCREMENT NOT NULL, name VARCHAR(100) NOT NULL, \
             PRIMARY KEY(id)) DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci \
             ENGINE = InnoDB"
        ]
    );
}

#[test]
fn diff_between_definition_files() {
    let dir = TempDir::new().unwrap();
    let config = MySqlConfig::default();
    let from = load_table(&write(&dir, "v1.json", USERS_V1), &config).unwrap();
    let to = load_table(&write(&dir, "v2.json", USERS_V2), &config).unwrap();
    let platform = MySqlPlatform::new();

    assert_eq!(
        diff_statements(&platform, &from, &to).unwrap(),
        vec![
            "ALTER TABLE users ADD email VARCHAR(180) DEFAULT NULL",
            "CREATE UNIQUE INDEX uniq_email ON users (email)",
        ]
    );
    assert!(diff_statements(&platform, &to, &to.clone())
        .unwrap()
        .is_empty());
}

#[test]
fn foreign_keys_follow_configured_engines() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "posts.json",
        r#"{
            "name": "posts",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "author_id", "type": "integer"}
            ],
            "foreign_keys": [
                {"name": "fk_author", "columns": ["author_id"], "foreign_table": "users",
                 "foreign_columns": ["id"]}
            ],
            "options": {"engine": "NDB"}
        }"#,
    );
    let default_config = MySqlConfig::default();
    let table = load_table(&path, &default_config).unwrap();
    assert_eq!(
        create_statements(&MySqlPlatform::new(), &table)
            .unwrap()
            .len(),
        1
    );

    let config = MySqlConfig {
        foreign_key_engines: vec![String::from("InnoDB"), String::from("NDB")],
        ..MySqlConfig::default()
    };
    let statements = create_statements(&MySqlPlatform::with_config(config), &table).unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[1],
        "ALTER TABLE posts ADD CONSTRAINT fk_author FOREIGN KEY (author_id) REFERENCES users (id)"
    );
}
