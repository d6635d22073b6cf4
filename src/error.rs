use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to an upstream authority while minting or rotating a
/// credential, or fetching a descriptor. Surfaced to the caller as-is;
/// the cache layer never retries these on its own.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request to '{url}' failed: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("upstream '{url}' answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("no token at pointer '{pointer}' in response from '{url}'")]
    TokenMissing { url: String, pointer: String },

    #[error("credential material for '{field}' unavailable: {reason}")]
    MaterialUnavailable { field: String, reason: String },

    #[error("unknown token scope '{0}'")]
    UnknownScope(String),
}

impl UpstreamError {
    pub fn unavailable(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            url: url.to_owned(),
            reason: err.to_string(),
        }
    }

    pub fn status(url: &str, status: StatusCode) -> Self {
        Self::Status {
            url: url.to_owned(),
            status,
        }
    }

    pub fn material(field: &str, err: impl std::fmt::Display) -> Self {
        Self::MaterialUnavailable {
            field: field.to_owned(),
            reason: err.to_string(),
        }
    }
}

/// Raw reply body does not contain a recognized envelope boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("no known envelope opening marker in response body")]
    OpeningMarkerNotFound,

    #[error("closing marker '{0}' missing after opening marker")]
    ClosingMarkerNotFound(&'static str),
}

/// Either half of a sanitized SOAP exchange can fail: the transport, or
/// the envelope repair of the reply.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
