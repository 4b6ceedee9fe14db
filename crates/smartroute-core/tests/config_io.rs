use std::fs;

use smartroute_core::{
    ConfigSource, DEFAULT_API_BASE_URL, FileConfig, ThemePreference, load_config_from,
    save_config_to,
};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_disk() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");

    let mut config = FileConfig::default();
    config.ui.theme = ThemePreference::Dark;
    config.ui.reference_city = "Bauru, SP".to_string();
    config.api.base_url = "http://localhost:8000/api".to_string();

    save_config_to(&path, &config).expect("save config");

    let loaded = load_config_from(&path);
    assert_eq!(loaded.source, ConfigSource::File);
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.config, config);
}

#[test]
fn hand_edited_trailing_slash_is_sanitized_on_load() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");

    fs::write(
        &path,
        "schema_version = 1\n\n[api]\nbase_url = \"http://localhost:8000/api/\"\n",
    )
    .expect("write fixture");

    let loaded = load_config_from(&path);
    assert_eq!(loaded.config.api.base_url, "http://localhost:8000/api");
}

#[test]
fn missing_file_yields_defaults_without_warnings() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("does-not-exist.toml");

    let loaded = load_config_from(&path);
    assert_eq!(loaded.source, ConfigSource::Default);
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.config.api.base_url, DEFAULT_API_BASE_URL);
}
