use crate::config::Config;
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.model_path, PathBuf::from("LBMA-SILVER-model.json"));
    assert_eq!(config.bind_address(), "0.0.0.0:8000");
}

#[test]
fn test_config_overrides() {
    let config = Config::from_lookup(lookup_from(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "9100"),
        ("MODEL_PATH", "/srv/models/silver.json"),
    ]))
    .unwrap();

    assert_eq!(config.bind_address(), "127.0.0.1:9100");
    assert_eq!(config.model_path, PathBuf::from("/srv/models/silver.json"));
}

#[test]
fn test_config_rejects_bad_port() {
    let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid SERVER_PORT"));

    assert!(Config::from_lookup(lookup_from(&[("SERVER_PORT", "70000")])).is_err());
}

#[test]
fn test_config_rejects_bad_host() {
    let err = Config::from_lookup(lookup_from(&[("SERVER_HOST", "not a host")])).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid SERVER_HOST"));
}

#[test]
fn test_config_rejects_empty_model_path() {
    let err = Config::from_lookup(lookup_from(&[("MODEL_PATH", "  ")])).unwrap_err();
    assert!(format!("{:#}", err).contains("MODEL_PATH must not be empty"));
}
