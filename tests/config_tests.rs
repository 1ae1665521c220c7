//! Configuration Module Tests
//!
//! Building a running system from layered configuration.

mod common;

use std::collections::HashMap;
use std::io::Write;

use common::Kitchen;
use cyrk_core::{ConfigManager, System, SystemConfig};

#[test]
fn system_runs_with_file_configuration() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "workers = 3\nclient_timeout_ms = 250").unwrap();

    let manager =
        ConfigManager::load_with_env(Some(file.path().to_path_buf()), Some(HashMap::new()))
            .unwrap();
    let kitchen = Kitchen::new();
    let system = System::from_config(kitchen.stations(), manager.config()).unwrap();

    assert_eq!(system.client_timeout().as_millis(), 250);
    let pager = system.order(["burger"]).unwrap();
    pager.wait();
    system.collect_order(&pager).unwrap();
    assert_eq!(system.shutdown().len(), 3);
}

#[test]
fn environment_overrides_reach_the_system() {
    let vars = HashMap::from([
        ("CYRK_WORKERS".to_string(), "5".to_string()),
        ("CYRK_CLIENT_TIMEOUT_MS".to_string(), "40".to_string()),
    ]);
    let manager = ConfigManager::load_with_env(None, Some(vars)).unwrap();
    assert_eq!(manager.config().workers, 5);

    let kitchen = Kitchen::new();
    let system = System::from_config(kitchen.stations(), manager.config()).unwrap();
    assert_eq!(system.shutdown().len(), 5);
}

#[test]
fn json_file_is_accepted() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"workers": 2, "logging": {{"level": "warn", "json": true}}}}"#).unwrap();

    let manager =
        ConfigManager::load_with_env(Some(file.path().to_path_buf()), Some(HashMap::new()))
            .unwrap();
    let config = manager.config();
    assert_eq!(config.workers, 2);
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.json);
    assert_eq!(config.client_timeout_ms, SystemConfig::default().client_timeout_ms);
}

#[test]
fn wrapped_configuration_is_validated() {
    assert!(ConfigManager::from_config(SystemConfig::default()).is_ok());

    let mut config = SystemConfig::default();
    config.workers = 0;
    assert!(ConfigManager::from_config(config).is_err());
}
