//! HTTP transport for the admin backend.
//!
//! One `reqwest` client configured with a base URL and a fixed request
//! timeout. Every outgoing request reads the injected [`AuthStore`] and
//! attaches `Authorization: Bearer <token>` when a token is present. The
//! response is decoded into the uniform [`Envelope`]; non-2xx statuses
//! become [`ApiError::Http`] carrying the server `msg` when one is
//! parseable, while 2xx envelopes are returned as-is regardless of their
//! logical `code`.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use dc_admin_api::{Envelope, HttpMethod};
use dc_admin_state::AuthStore;

use crate::error::ApiError;

/// Configuration for the transport layer.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL all endpoint paths are joined against.
    pub base_url: String,
    /// Fixed per-request timeout; there is no per-operation cancellation.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// The HTTP client shared by the typed service and the playground.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    auth: Arc<AuthStore>,
}

impl Transport {
    pub fn new(config: &TransportConfig, auth: Arc<AuthStore>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http, base_url, auth })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    /// Concatenate an endpoint path onto the base URL. Plain string
    /// concatenation keeps any path prefix on the base URL, which
    /// `Url::join` with an absolute path would discard.
    fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{path}: {e}")))
    }

    /// Dispatch a request and decode the envelope with a typed payload.
    ///
    /// `query` and `body` must be JSON objects when present; GET callers
    /// pass no body by convention (the backend ignores one anyway).
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Value>,
        body: Option<&Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.endpoint_url(path)?;

        let mut request = self.http.request(to_reqwest_method(method), url);

        if let Some(query) = query {
            request = request.query(&query_pairs(query)?);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let token = self.auth.token();
        if !token.is_empty() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        decode_response(response).await
    }

    /// Untyped variant used by the playground and bare acknowledgements.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Value>,
        body: Option<&Value>,
    ) -> Result<Envelope, ApiError> {
        self.call::<Value>(method, path, query, body).await
    }

    /// Send a file as a single-field (`file`) multipart payload.
    pub async fn upload(
        &self,
        path: &str,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Envelope, ApiError> {
        let url = self.endpoint_url(path)?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http.post(url).multipart(form);
        let token = self.auth.token();
        if !token.is_empty() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        decode_response(response).await
    }

    /// Resolve a server-relative asset path against the base URL. Absolute
    /// URLs and empty strings pass through untouched. Pure string/URL work,
    /// no network activity.
    pub fn resolve_asset_url(&self, path: &str) -> String {
        if path.is_empty() || is_absolute_url(path) {
            return path.to_string();
        }
        match self.base_url.join(path) {
            Ok(url) => url.to_string(),
            Err(_) => path.to_string(),
        }
    }
}

fn is_absolute_url(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Flatten a JSON object into query pairs. Strings are sent verbatim,
/// scalars via their JSON rendering; nulls are dropped; nested values are
/// sent as compact JSON.
fn query_pairs(value: &Value) -> Result<Vec<(String, String)>, ApiError> {
    let Some(object) = value.as_object() else {
        return Err(ApiError::InvalidJson {
            field: "query parameters",
            message: "expected a JSON object".to_string(),
        });
    };
    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            nested => nested.to_string(),
        };
        pairs.push((key.clone(), rendered));
    }
    Ok(pairs)
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        // Prefer the server's envelope msg when the error body carries one.
        let message = serde_json::from_str::<Envelope>(&text)
            .ok()
            .map(|env| env.msg)
            .filter(|msg| !msg.is_empty());
        return Err(ApiError::Http { status: status.as_u16(), message });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
