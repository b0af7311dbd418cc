//! Upstream forecast API client.
//!
//! # Responsibilities
//! - Build the upstream URL from validated query parameters
//! - Append the server-held credential under the configured parameter name
//! - Issue exactly one GET per call; no retries

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::ACCEPT;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Error type for upstream operations.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
}

/// Query parameters forwarded to the forecast API.
///
/// `lat` and `lon` are opaque strings taken from the client verbatim;
/// numeric well-formedness is the upstream's concern.
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub lat: String,
    pub lon: String,
    pub units: String,
    pub lang: String,
}

/// Reply from the upstream API. Status and body are forwarded verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client for the upstream forecast API.
#[derive(Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    base_url: Url,
    credential_param: String,
}

impl ForecastClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            credential_param: config.credential_param.clone(),
        })
    }

    /// Build the full upstream URL for a query, credential included.
    ///
    /// The returned URL embeds the secret key. It must never be logged or
    /// echoed to clients.
    pub fn endpoint_url(&self, query: &ForecastQuery, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &query.lat)
            .append_pair("lon", &query.lon)
            .append_pair("units", &query.units)
            .append_pair("lang", &query.lang)
            .append_pair(&self.credential_param, api_key);
        url
    }

    /// Perform a single upstream round trip.
    ///
    /// The reply is returned as-is whatever its status; HTTP-level errors
    /// from the upstream are not errors here.
    pub async fn fetch(&self, url: Url) -> Result<UpstreamReply, UpstreamError> {
        // reqwest errors echo the request URL, which embeds the credential;
        // strip it before the error can escape into logs.
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        Ok(UpstreamReply { status, body })
    }
}
