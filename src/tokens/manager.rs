use std::collections::HashMap;
use std::sync::Arc;
use std::{env, fs};

use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::object_cache::ObjectCache;
use crate::config::scopes::{CredentialValue, RequestConfig, ScopeConfig};
use crate::error::UpstreamError;
use crate::tokens::record::TokenRecord;

/// Cache-aside bearer-credential lifecycle per named scope.
///
/// Expiry is delegated entirely to the store's TTL check: a read that
/// comes back absent is indistinguishable from "never generated", and
/// both take the generate path. A failed generate caches nothing, so the
/// next call retries from scratch.
pub struct TokenManager {
    scopes: HashMap<String, ScopeConfig>,
    cache: ObjectCache,
    client: Client,
    // one guard per scope so concurrent demand coalesces on a single
    // upstream generate; losers re-read the cache after the winner stores
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(scopes: HashMap<String, ScopeConfig>, cache: ObjectCache, client: Client) -> Self {
        Self {
            scopes,
            cache,
            client,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Cached credential for `scope`, minting one on a miss.
    pub async fn get_token(&self, scope: &str) -> Result<TokenRecord, UpstreamError> {
        if let Some(record) = self.cache.get::<TokenRecord>(scope) {
            debug!("token for scope '{}' served from cache", scope);
            return Ok(record);
        }
        let guard = self.scope_guard(scope).await;
        let _held = guard.lock().await;
        if let Some(record) = self.cache.get::<TokenRecord>(scope) {
            debug!("token for scope '{}' stored while waiting", scope);
            return Ok(record);
        }
        self.generate(scope).await
    }

    /// Mint a fresh credential from the scope's generate endpoint and
    /// store it, overwriting whatever was cached before.
    pub async fn generate(&self, scope: &str) -> Result<TokenRecord, UpstreamError> {
        let cfg = self.scope(scope)?;
        info!("generating token for scope '{}'", scope);
        let record = self
            .exchange(&cfg.generate, &cfg.token_pointer, None)
            .await?;
        Ok(self.cache.put(scope, record))
    }

    /// Rotate the scope's credential through its refresh endpoint,
    /// authorizing with the current one (minting it first if absent).
    /// The result supersedes the prior record under the same key.
    pub async fn refresh(&self, scope: &str) -> Result<TokenRecord, UpstreamError> {
        let cfg = self.scope(scope)?;
        let refresh_cfg = match &cfg.refresh {
            Some(request) => request,
            None => {
                // authority makes no generate/refresh distinction: a
                // fresh mint is the rotation
                debug!("scope '{}' has no refresh endpoint, generating", scope);
                return self.generate(scope).await;
            }
        };
        let current = match self.cache.get::<TokenRecord>(scope) {
            Some(record) => record,
            None => self.generate(scope).await?,
        };
        info!("refreshing token for scope '{}'", scope);
        let record = self
            .exchange(refresh_cfg, &cfg.token_pointer, Some(&current))
            .await?;
        Ok(self.cache.put(scope, record))
    }

    fn scope(&self, scope: &str) -> Result<&ScopeConfig, UpstreamError> {
        self.scopes
            .get(scope)
            .ok_or_else(|| UpstreamError::UnknownScope(scope.to_owned()))
    }

    async fn scope_guard(&self, scope: &str) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight.entry(scope.to_owned()).or_default().clone()
    }

    /// One upstream exchange: build the request from config, send it,
    /// and pull the credential out of the JSON response at the
    /// configured pointer.
    async fn exchange(
        &self,
        request_cfg: &RequestConfig,
        pointer: &str,
        authorization: Option<&TokenRecord>,
    ) -> Result<TokenRecord, UpstreamError> {
        let url = request_cfg.url.as_str();
        let mut request = self.client.request(request_cfg.method.clone(), url);

        if let Some(current) = authorization {
            request = request.header("Authorization", current.bearer());
        }
        if let Some(headers) = &request_cfg.headers {
            for (key, value) in headers {
                request = request.header(key.as_str(), resolve_value(key, value)?);
            }
        }
        if let Some(body_cfg) = &request_cfg.body {
            let mut body = HashMap::new();
            for (key, value) in body_cfg {
                body.insert(key.to_owned(), resolve_value(key, value)?);
            }
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| UpstreamError::unavailable(url, err))?;
        if !response.status().is_success() {
            return Err(UpstreamError::status(url, response.status()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| UpstreamError::unavailable(url, err))?;

        body.pointer(pointer)
            .and_then(Value::as_str)
            .map(TokenRecord::new)
            .ok_or_else(|| UpstreamError::TokenMissing {
                url: url.to_owned(),
                pointer: pointer.to_owned(),
            })
    }
}

/// Resolve configured credential material to its concrete string.
fn resolve_value(field: &str, value: &CredentialValue) -> Result<String, UpstreamError> {
    match value {
        CredentialValue::Literal { value } => Ok(value.to_owned()),
        CredentialValue::FromEnv { from_env } => {
            env::var(from_env).map_err(|err| UpstreamError::material(field, err))
        }
        CredentialValue::FromFile { path } => fs::read_to_string(path)
            .map(|contents| contents.trim().to_owned())
            .map_err(|err| UpstreamError::material(field, err)),
    }
}
