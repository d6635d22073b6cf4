use reqwest::Client;
use tracing::debug;

use crate::error::{ExchangeError, UpstreamError};
use crate::soap::envelope::extract_envelope;

/// Sanitized SOAP exchange: post an envelope, repair the reply.
///
/// Both directions are logged at debug level so a misbehaving upstream
/// can be diagnosed from the raw bytes.
pub struct SoapClient {
    client: Client,
}

impl SoapClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Post `envelope` to `endpoint` and return the sanitized reply
    /// envelope. The raw reply may carry extraneous framing bytes; only
    /// the extracted envelope is treated as the authoritative payload.
    pub async fn call(
        &self,
        endpoint: &str,
        action: &str,
        envelope: &str,
    ) -> Result<String, ExchangeError> {
        debug!("soap request to '{}': {}", endpoint, envelope);
        let response = self
            .client
            .post(endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", action)
            .body(envelope.to_owned())
            .send()
            .await
            .map_err(|err| UpstreamError::unavailable(endpoint, err))?;
        if !response.status().is_success() {
            return Err(UpstreamError::status(endpoint, response.status()).into());
        }
        let raw = response
            .text()
            .await
            .map_err(|err| UpstreamError::unavailable(endpoint, err))?;
        debug!("soap reply from '{}': {}", endpoint, raw);

        let reply = extract_envelope(&raw)?;
        Ok(reply.to_owned())
    }
}
