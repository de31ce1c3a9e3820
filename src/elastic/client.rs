//! Blocking JSON-over-HTTP transport to the index service

use crate::config::ElasticConfig;
use crate::error::{AppError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Status plus decoded body of one round trip
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Client for the document-index service.
///
/// Every call is one blocking round trip; nothing is retried here.
#[derive(Debug, Clone)]
pub struct ElasticClient {
    client: Client,
    base_url: String,
}

impl ElasticClient {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ElasticConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = %method, path = path, "index service request");
        self.client.request(method, self.url(path))
    }

    /// `HEAD {path}`, returning only the status
    pub fn head(&self, path: &str) -> Result<StatusCode> {
        let response = self.request(Method::HEAD, path).send()?;
        Ok(response.status())
    }

    /// `GET {path}` with an optional JSON body
    pub fn get(&self, path: &str, body: Option<&Value>) -> Result<RawResponse> {
        let mut request = self.request(Method::GET, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::decode(request)
    }

    /// `PUT {path}` with a JSON body
    pub fn put_json(&self, path: &str, body: &Value) -> Result<RawResponse> {
        Self::decode(self.request(Method::PUT, path).json(body))
    }

    /// `PUT {path}` with a newline-delimited bulk body
    pub fn put_bulk(&self, path: &str, body: String) -> Result<RawResponse> {
        let request = self
            .request(Method::PUT, path)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body);
        Self::decode(request)
    }

    fn decode(request: RequestBuilder) -> Result<RawResponse> {
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        // Error pages are not always JSON; keep them as a string body.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(RawResponse { status, body })
    }
}
