//! Persisted API configuration: merge, fallback and reset

use capa::config::api::{self, ApiConfigError};
use capa::config::{ApiConfig, ApiConfigPatch, EndpointKind};
use capa::store::{LocalStore, API_CONFIG_KEY};

fn store() -> LocalStore {
    LocalStore::open_in_memory().unwrap()
}

#[test]
fn test_nothing_stored_gives_defaults() {
    let store = store();
    assert_eq!(api::load(&store), ApiConfig::default());
}

#[test]
fn test_partial_override_merges_over_defaults() {
    let store = store();
    store
        .set(API_CONFIG_KEY, r#"{"timeout":2500,"endpoints":{"users":"/v2/users"}}"#)
        .unwrap();

    let config = api::load(&store);
    let defaults = ApiConfig::default();
    assert_eq!(config.timeout, 2500);
    assert_eq!(config.endpoints.users, "/v2/users");
    assert_eq!(config.endpoints.centres, defaults.endpoints.centres);
    assert_eq!(config.base_url, defaults.base_url);
    assert_eq!(config.retries, defaults.retries);
}

#[test]
fn test_malformed_json_falls_back_to_defaults() {
    let store = store();
    store.set(API_CONFIG_KEY, "{not json").unwrap();

    assert!(matches!(api::try_load(&store), Err(ApiConfigError::Json(_))));
    assert_eq!(api::load(&store), ApiConfig::default());
}

#[test]
fn test_save_keeps_unrelated_fields() {
    let store = store();
    api::save(
        &store,
        &ApiConfigPatch {
            base_url: Some("https://capa.example/api".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let config = api::save(&store, &ApiConfigPatch::endpoint(EndpointKind::Actions, "/v2/actions"))
        .unwrap();

    assert_eq!(config.base_url, "https://capa.example/api");
    assert_eq!(config.endpoints.actions, "/v2/actions");
    assert_eq!(config.timeout, ApiConfig::default().timeout);
    assert_eq!(api::load(&store), config);
    assert_eq!(
        config.endpoint_url(EndpointKind::Actions),
        "https://capa.example/api/v2/actions"
    );
}

#[test]
fn test_reset_restores_defaults() {
    let store = store();
    api::save(
        &store,
        &ApiConfigPatch {
            retries: Some(9),
            ..Default::default()
        },
    )
    .unwrap();
    api::reset(&store).unwrap();

    assert!(store.get(API_CONFIG_KEY).unwrap().is_none());
    assert_eq!(api::load(&store), ApiConfig::default());
}

#[test]
fn test_stored_record_uses_camel_case() {
    let store = store();
    api::save(
        &store,
        &ApiConfigPatch {
            base_url: Some("http://10.0.0.1/api".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let raw = store.get(API_CONFIG_KEY).unwrap().unwrap();
    assert!(raw.contains("\"baseUrl\":\"http://10.0.0.1/api\""));
}
