use std::collections::HashMap;

use http::Method;
use serde::Deserialize;

use crate::config::settings::SettingsConfig;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub scopes: HashMap<String, ScopeConfig>,
}

/// ================================
/// Token scopes
/// ================================

/// One cacheable credential: how to mint it and, when the authority
/// distinguishes the two, how to rotate it. The scope's name doubles as
/// its cache key.
#[derive(Debug, Deserialize, Clone)]
pub struct ScopeConfig {
    pub generate: RequestConfig,
    pub refresh: Option<RequestConfig>,
    /// JSON pointer to the credential in the upstream response body
    #[serde(default = "default_token_pointer")]
    pub token_pointer: String,
}

/// Upstream request details
#[derive(Debug, Deserialize, Clone)]
pub struct RequestConfig {
    pub url: String,
    #[serde(with = "http_serde::method", default)]
    pub method: Method, // GET, POST
    pub headers: Option<HashMap<String, CredentialValue>>,
    pub body: Option<HashMap<String, CredentialValue>>,
}

/// Where a header/body field's value comes from
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum CredentialValue {
    Literal { value: String },
    FromEnv { from_env: String },
    FromFile { path: String },
}

fn default_token_pointer() -> String {
    "/data/token".to_owned()
}
