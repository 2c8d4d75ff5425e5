// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the configuration module
use backend_lib::config::Settings;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_config_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("estate.toml");

    let config_content = r#"
        log_level = "debug"

        [server]
        host = "192.168.1.1"
        port = 8888

        [database]
        url = "sqlite://test.db"
        max_connections = 2

        [auth]
        jwt_secret = "file-secret"
        cookie_secure = true
    "#;
    fs::write(&config_path, config_content).unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.server.host, "192.168.1.1");
    assert_eq!(settings.server.port, 8888);
    assert_eq!(settings.database.url, "sqlite://test.db");
    assert_eq!(settings.database.max_connections, 2);
    assert_eq!(settings.auth.jwt_secret.as_deref(), Some("file-secret"));
    assert!(settings.auth.cookie_secure);
    // defaults fill the gaps
    assert_eq!(settings.auth.session_ttl_secs, 3600);
    assert_eq!(settings.auth.password_min_length, 8);
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("estate.toml");
    fs::write(&config_path, "[auth]\nsession_ttl_secs = 0\n").unwrap();

    assert!(Settings::load_from(&config_path).is_err());
}

#[test]
fn test_unparseable_file_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("estate.toml");
    fs::write(&config_path, "[server]\nport = \"not a port\"\n").unwrap();

    assert!(Settings::load_from(&config_path).is_err());
}
