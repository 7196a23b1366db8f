//! Playground Config File Tests

use pretty_assertions::assert_eq;
use promptlab::app::config::PlaygroundConfig;
use promptlab::PlaygroundApp;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = PlaygroundConfig::load_from_file(dir.path().join("config.toml")).unwrap();
    assert_eq!(config, PlaygroundConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    // Parent directories are created on save
    let path = dir.path().join("nested").join("config.toml");

    let config = PlaygroundConfig {
        endpoint: "https://prompts.example.com".to_string(),
        project_id: "proj-42".to_string(),
        model: "gpt-4o".to_string(),
        temperature: 0.3,
        public_key: Some("pk".to_string()),
        secret_key: Some("sk".to_string()),
        ..PlaygroundConfig::default()
    };
    config.save_to_file(&path).unwrap();

    let loaded = PlaygroundConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.credentials(), Some(("pk", "sk")));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "project_id = \"abc\"\n").unwrap();

    let config = PlaygroundConfig::load_from_file(&path).unwrap();
    assert_eq!(config.project_id, "abc");
    assert_eq!(config.endpoint, "http://localhost:3000");
    assert!(config.is_complete());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "project_id = [not toml").unwrap();

    let err = PlaygroundConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_app_reports_broken_config_with_details() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "temperature = \"hot\"").unwrap();

    let mut app = PlaygroundApp::with_config(PlaygroundConfig::default(), path.clone());
    app.load_config(path);

    assert_eq!(app.config, PlaygroundConfig::default());
    let notifications = app.notification_manager.get_active_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Could not load settings");
    let details = notifications[0].details.as_deref().unwrap_or_default();
    assert!(details.contains("Failed to parse config file"));
}
