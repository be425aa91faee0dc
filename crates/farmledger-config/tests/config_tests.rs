use farmledger_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.api_base_url.is_empty());
    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.api_base_url = "https://farm.example.com/api".to_string();
    cfg.currency = "USD".to_string();
    cfg.default_expense_category = Some("FEEDS".to_string());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.api_base_url, "https://farm.example.com/api");
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.default_expense_category.as_deref(), Some("FEEDS"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.api_base_url, Config::default_api_base_url());
}

#[test]
fn older_config_files_keep_loading() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale": "en-KE"}"#).expect("write legacy config");

    let manager = ConfigManager::new(path);
    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.locale, "en-KE");
    assert_eq!(loaded.currency, Config::default_currency());
}
