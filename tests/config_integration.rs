//! Integration tests for loading settings from files and the environment.

use std::io::Write;

use henson_mongodb::ext::{EnvExpander, MapEnvSource, keys};
use henson_mongodb::prelude::*;

/// Test a minimal settings file
#[test]
fn test_settings_minimal() {
    let settings = Settings::from_toml_str_with(
        r#"MONGODB_URI = "mongodb://localhost/testing""#,
        &EnvExpander::with_source(MapEnvSource::new()),
    )
    .expect("Failed to parse settings");

    let derived = ConnectionSettings::from_settings(&settings).unwrap();
    assert_eq!(derived.database, "testing");
}

/// Test a settings file with every host-supplied key and env interpolation
#[test]
fn test_settings_full() {
    let env = MapEnvSource::new()
        .set("MONGO_USER", "svc")
        .set("MONGO_PASSWORD", "s3cret");
    let settings = Settings::from_toml_str_with(
        r#"
            MONGODB_URI = "mongodb://${MONGO_USER}:${MONGO_PASSWORD}@${MONGO_HOST:-localhost}:27018/app?replicaset=rs0&max_pool_size=20"
            MONGODB_DOCUMENT_CLASS = "document"
            MONGODB_TIME_ZONE_AWARE = true
        "#,
        &EnvExpander::with_source(env),
    )
    .expect("Failed to parse settings");

    let derived = ConnectionSettings::from_settings(&settings).unwrap();
    assert_eq!(derived.username.as_deref(), Some("svc"));
    assert_eq!(derived.password.as_deref(), Some("s3cret"));
    assert_eq!(derived.hosts[0].to_string(), "localhost:27018");
    assert_eq!(derived.replica_set.as_deref(), Some("rs0"));
    assert_eq!(derived.max_pool_size, Some(20));
    assert!(derived.time_zone_aware);
}

/// Test that a missing environment variable is reported, not silently dropped
#[test]
fn test_settings_missing_env() {
    let result = Settings::from_toml_str_with(
        r#"MONGODB_URI = "mongodb://${MONGO_HOST}/app""#,
        &EnvExpander::with_source(MapEnvSource::new()),
    );
    assert!(matches!(result, Err(MongoError::EnvNotFound(name)) if name == "MONGO_HOST"));
}

/// Test loading from a file on disk
#[test]
fn test_settings_from_file() {
    let path = std::env::temp_dir().join(format!(
        "henson-mongodb-settings-{}.toml",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, r#"MONGODB_URI = "mongodb://localhost/testing""#).unwrap();
    drop(file);

    let settings = Settings::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(
        settings.get_str(keys::URI).unwrap(),
        Some("mongodb://localhost/testing")
    );
}

/// Test that a missing file is an I/O configuration error
#[test]
fn test_settings_file_not_found() {
    let err = Settings::from_file("/nonexistent/henson-mongodb.toml").unwrap_err();
    assert!(matches!(err, MongoError::Io { .. }));
    assert!(err.is_config_error());
}

/// Test reading host-supplied keys from an environment source
#[test]
fn test_settings_from_env_source() {
    let env = MapEnvSource::new()
        .set("MONGODB_URI", "mongodb://localhost/testing")
        .set("MONGODB_TIME_ZONE_AWARE", "true");
    let settings = Settings::from_env_source(&env);

    let derived = ConnectionSettings::from_settings(&settings).unwrap();
    assert!(derived.time_zone_aware);
    assert_eq!(derived.database, "testing");
}
