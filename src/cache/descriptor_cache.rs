use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use reqwest::Client;
use tracing::{debug, info};

use crate::cache::store::ObjectStore;
use crate::error::UpstreamError;

/// Cache of fetched service descriptors (WSDL-style documents) keyed by
/// source URL, so repeated calls against one endpoint skip the descriptor
/// round trip within the TTL window.
#[derive(Clone)]
pub struct DescriptorCache {
    store: Arc<dyn ObjectStore>,
}

impl DescriptorCache {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Cached descriptor body for `url`, or one bounded fetch on a miss.
    pub async fn get_or_fetch(&self, client: &Client, url: &str) -> Result<String, UpstreamError> {
        let key = descriptor_key(url);
        if let Some(bytes) = self.store.get(&key) {
            match String::from_utf8(bytes) {
                Ok(body) => {
                    debug!("descriptor for '{}' served from cache", url);
                    return Ok(body);
                }
                Err(err) => {
                    debug!("corrupt descriptor entry for '{}' purged: {}", url, err);
                    self.store.purge(&key);
                }
            }
        }

        info!("fetching descriptor '{}'", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| UpstreamError::unavailable(url, err))?;
        if !response.status().is_success() {
            return Err(UpstreamError::status(url, response.status()));
        }
        let body = response
            .text()
            .await
            .map_err(|err| UpstreamError::unavailable(url, err))?;
        self.store.put(&key, body.clone().into_bytes());
        Ok(body)
    }
}

/// File-name-safe store key for a descriptor URL.
fn descriptor_key(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(url.as_bytes())
}
