use repbook::config::{load_from_path, save_to_path};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_valid() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        use_keyring = false

        [store]
        project_id = "8fv9krpb"
        dataset = "staging"
        use_cdn = true

        [identity]
        secret_key = "sk_test_abc"
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).expect("Failed to load valid config");

    assert!(!config.use_keyring);
    assert_eq!(config.store.project_id, "8fv9krpb");
    assert_eq!(config.store.dataset, "staging");
    assert!(config.store.use_cdn);
    assert_eq!(config.identity.secret_key.as_deref(), Some("sk_test_abc"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_config_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[store]\nproject_id = \"abc123\"\n")
        .unwrap();

    let config = load_from_path(temp_file.path()).unwrap();

    assert!(config.use_keyring);
    assert_eq!(config.store.dataset, "production");
    assert_eq!(config.store.api_version, "2024-01-01");
    assert!(!config.store.use_cdn);
    assert_eq!(config.store.token, None);
    assert_eq!(config.identity.api_url, "https://api.clerk.com");
    assert_eq!(config.state.state_dir_override, None);
}

#[test]
fn test_empty_config_loads_defaults_but_fails_validation() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();

    let config = load_from_path(temp_file.path()).expect("empty config should parse");
    assert_eq!(config.store.project_id, "");
    assert_eq!(config.store.dataset, "production");

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("store.project_id is not set"));
}

#[test]
fn test_config_without_store_keeps_other_sections() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        use_keyring = false

        [identity]
        api_url = "http://127.0.0.1:9"

        [state]
        state_dir_override = "/tmp/repbook-custom"
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).unwrap();

    assert!(!config.use_keyring);
    assert_eq!(config.identity.api_url, "http://127.0.0.1:9");
    assert_eq!(
        config.state.state_dir_override.as_deref(),
        Some(std::path::Path::new("/tmp/repbook-custom"))
    );
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[store
project_id = ").unwrap();

    assert!(load_from_path(temp_file.path()).is_err());
}

#[test]
fn test_invalid_project_id_fails_validation() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[store]\nproject_id = \"Not Valid\"\n")
        .unwrap();

    let config = load_from_path(temp_file.path()).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid project id"));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = repbook::config::Config::default();
    config.use_keyring = false;
    config.store.project_id = "roundtrip".to_string();
    config.store.api_url = Some("http://127.0.0.1:9999".to_string());

    save_to_path(&config, &path).unwrap();
    let reloaded = load_from_path(&path).unwrap();

    assert_eq!(reloaded.store.project_id, "roundtrip");
    assert_eq!(reloaded.store.api_url.as_deref(), Some("http://127.0.0.1:9999"));
    assert!(!reloaded.use_keyring);
}
