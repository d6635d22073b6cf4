// tests/common/mod.rs
pub use std::thread::sleep;
pub use std::time::Duration;

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tempfile::TempDir;

use crate::cache::file_store::FileStore;
use crate::cache::object_cache::ObjectCache;
use crate::cache::store::ObjectStore;
use crate::cache::ttl::{CacheTtl, TtlUnit};
use crate::config::scopes::{CredentialValue, RequestConfig, ScopeConfig};
use crate::tokens::manager::TokenManager;
use crate::utils::constants::SUFFIX_OBJECT;

/// Fresh disk store in its own temp location. The returned TempDir must
/// stay alive for the duration of the test.
pub fn temp_store(prefix: &str, ttl: CacheTtl) -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("temp store location");
    let store = FileStore::new(dir.path(), prefix, SUFFIX_OBJECT, ttl);
    (dir, store)
}

pub fn seconds(magnitude: u32) -> CacheTtl {
    CacheTtl::new(TtlUnit::Seconds, magnitude)
}

pub fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Scope pointing at a mock generate (and optionally refresh) endpoint.
pub fn scope_config(generate_url: &str, refresh_url: Option<&str>) -> ScopeConfig {
    ScopeConfig {
        generate: json_post(generate_url),
        refresh: refresh_url.map(json_post),
        token_pointer: "/data/token".to_owned(),
    }
}

fn json_post(url: &str) -> RequestConfig {
    let mut body = HashMap::new();
    body.insert(
        "projectCode".to_owned(),
        CredentialValue::Literal {
            value: "customer_app".to_owned(),
        },
    );
    RequestConfig {
        url: url.to_owned(),
        method: http::Method::POST,
        headers: None,
        body: Some(body),
    }
}

/// Manager with a single configured scope on top of the given store.
pub fn manager_with(store: Arc<dyn ObjectStore>, scope: &str, cfg: ScopeConfig) -> TokenManager {
    let mut scopes = HashMap::new();
    scopes.insert(scope.to_owned(), cfg);
    TokenManager::new(scopes, ObjectCache::new(store), build_client())
}
