//! API endpoint configuration persisted in local storage
//!
//! The stored record is a partial override: reads merge it over the built-in
//! defaults, writes merge an update over the current effective record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{LocalStore, API_CONFIG_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    pub endpoints: Endpoints,
    /// Request timeout in milliseconds
    pub timeout: u64,
    pub retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub centres: String,
    pub users: String,
    pub actions: String,
}

/// Which resource endpoint to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Centres,
    Users,
    Actions,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 3] = [
        EndpointKind::Centres,
        EndpointKind::Users,
        EndpointKind::Actions,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "centres" | "centers" | "centros" => Some(EndpointKind::Centres),
            "users" | "usuarios" => Some(EndpointKind::Users),
            "actions" | "acciones" => Some(EndpointKind::Actions),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EndpointKind::Centres => "centres",
            EndpointKind::Users => "users",
            EndpointKind::Actions => "actions",
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            endpoints: Endpoints {
                centres: "/centres".to_string(),
                users: "/users".to_string(),
                actions: "/actions".to_string(),
            },
            timeout: 10_000,
            retries: 3,
        }
    }
}

impl ApiConfig {
    pub fn endpoint(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::Centres => &self.endpoints.centres,
            EndpointKind::Users => &self.endpoints.users,
            EndpointKind::Actions => &self.endpoints.actions,
        }
    }

    /// Full URL for an endpoint: base URL joined with the endpoint path
    pub fn endpoint_url(&self, kind: EndpointKind) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.endpoint(kind);
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<EndpointsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<String>,
}

impl ApiConfigPatch {
    pub fn endpoint(kind: EndpointKind, path: impl Into<String>) -> Self {
        let path = Some(path.into());
        let endpoints = match kind {
            EndpointKind::Centres => EndpointsPatch {
                centres: path,
                ..Default::default()
            },
            EndpointKind::Users => EndpointsPatch {
                users: path,
                ..Default::default()
            },
            EndpointKind::Actions => EndpointsPatch {
                actions: path,
                ..Default::default()
            },
        };
        Self {
            endpoints: Some(endpoints),
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiConfigError {
    #[error("stored API config is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Effective configuration, or the error that prevented reading it
pub fn try_load(store: &LocalStore) -> Result<ApiConfig, ApiConfigError> {
    let Some(raw) = store.get(API_CONFIG_KEY)? else {
        return Ok(ApiConfig::default());
    };
    let stored: Value = serde_json::from_str(&raw)?;
    merged(&ApiConfig::default(), stored)
}

/// Effective configuration. Unreadable overrides fall back to defaults.
pub fn load(store: &LocalStore) -> ApiConfig {
    match try_load(store) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring stored API config: {err}");
            ApiConfig::default()
        }
    }
}

/// Merge `patch` over the effective config and persist the result
pub fn save(store: &LocalStore, patch: &ApiConfigPatch) -> Result<ApiConfig, ApiConfigError> {
    let current = load(store);
    let updated = merged(&current, serde_json::to_value(patch)?)?;
    store.set(API_CONFIG_KEY, &serde_json::to_string(&updated)?)?;
    log::info!("API config updated (base {})", updated.base_url);
    Ok(updated)
}

/// Drop the stored override so defaults apply again
pub fn reset(store: &LocalStore) -> Result<(), ApiConfigError> {
    store.remove(API_CONFIG_KEY)?;
    log::info!("API config reset to defaults");
    Ok(())
}

fn merged(base: &ApiConfig, overlay: Value) -> Result<ApiConfig, ApiConfigError> {
    let mut value = serde_json::to_value(base)?;
    merge_value(&mut value, overlay);
    Ok(serde_json::from_value(value)?)
}

/// Recursive object merge; non-object overlay values replace the target.
fn merge_value(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match target.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, overlay) => *target = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_nested_keeps_siblings() {
        let mut base = json!({"a": 1, "b": {"x": 1, "y": 2}});
        merge_value(&mut base, json!({"b": {"y": 3}}));
        assert_eq!(base, json!({"a": 1, "b": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let mut config = ApiConfig::default();
        config.base_url = "https://capa.example/api/".to_string();
        assert_eq!(
            config.endpoint_url(EndpointKind::Users),
            "https://capa.example/api/users"
        );
        config.endpoints.users = "people".to_string();
        assert_eq!(
            config.endpoint_url(EndpointKind::Users),
            "https://capa.example/api/people"
        );
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ApiConfigPatch::endpoint(EndpointKind::Actions, "/v2/actions");
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"endpoints": {"actions": "/v2/actions"}})
        );
    }

    #[test]
    fn test_endpoint_kind_parse() {
        assert_eq!(EndpointKind::parse("Centros"), Some(EndpointKind::Centres));
        assert_eq!(EndpointKind::parse("nope"), None);
    }
}
