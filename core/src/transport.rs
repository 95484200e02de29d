//! HTTP transport for the Imperial API.
//!
//! # Design
//! `Transport` holds the base URL, API version segment, API key and the
//! `reqwest` handle. The key is an immutable per-instance credential attached
//! to each request as it is built; the handle's default headers are never
//! mutated, so a transport is safe to share across concurrent tasks. Callers
//! needing different keys use separate instances (cloning is cheap — the
//! handle is reference-counted).
//!
//! Status codes are not interpreted here: the server returns its envelope on
//! failures too, so every verb decodes whatever body arrives. A body that is
//! empty or not valid JSON for `T` yields `Ok(None)` rather than an error;
//! only failures to execute the request at all are `Err`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://api.imperialb.in/";
const DEFAULT_VERSION: &str = "v1";
const USER_AGENT: &str = concat!("imperial-rs/", env!("CARGO_PKG_VERSION"));

/// An HTTP response reduced to the parts callers inspect: status and body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx class.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues authenticated JSON requests against `{base_url}{version}/...`.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    version: String,
    api_key: Option<String>,
}

impl Transport {
    /// Creates a transport with an owned `reqwest` handle.
    ///
    /// The handle sends `User-Agent: imperial-rs/<version>` and
    /// `Accept: application/json` on every request.
    ///
    /// # Errors
    /// Returns an error if the underlying client cannot be built.
    pub fn new() -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self::with_http_client(http))
    }

    /// Creates a transport over a caller-supplied handle. The caller keeps
    /// ownership of the handle's configuration (user agent, timeouts, TLS).
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            api_key: None,
        }
    }

    /// Binds the API key sent as the raw `Authorization` header value
    /// (no scheme prefix) on all subsequent requests.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replaces the base URL. A trailing slash is appended when missing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Replaces the API version segment (default `v1`).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Full URL for an endpoint path: `{base_url}{version}/{path}`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, self.version, path)
    }

    /// `GET {version}/{path}`, decoded into `T` when the body allows it.
    ///
    /// # Errors
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let raw = self.execute(Method::GET, path, None).await?;
        Ok(decode(&raw))
    }

    /// `POST {version}/{path}` with a JSON body.
    ///
    /// # Errors
    /// `ApiError::Serialization` when the body cannot be encoded,
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Option<T>, ApiError> {
        let body = encode(body)?;
        let raw = self.execute(Method::POST, path, Some(body)).await?;
        Ok(decode(&raw))
    }

    /// `PATCH {version}/{path}` with a JSON body.
    ///
    /// # Errors
    /// `ApiError::Serialization` when the body cannot be encoded,
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Option<T>, ApiError> {
        let body = encode(body)?;
        let raw = self.execute(Method::PATCH, path, Some(body)).await?;
        Ok(decode(&raw))
    }

    /// `DELETE {version}/{path}`, decoded into `T` when the body allows it.
    ///
    /// # Errors
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let raw = self.execute(Method::DELETE, path, None).await?;
        Ok(decode(&raw))
    }

    /// `DELETE {version}/{path}` returning the raw status and body, for
    /// callers that must inspect the status when the body is undecodable.
    ///
    /// # Errors
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn delete_raw(&self, path: &str) -> Result<RawResponse, ApiError> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.endpoint_url(path);
        debug!(%method, %url, "dispatching request");

        let mut builder = self.http.request(method, &url);
        if let Some(api_key) = &self.api_key {
            builder = builder.header(reqwest::header::AUTHORIZATION, api_key.as_str());
        }
        if let Some(body) = body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}

fn encode(body: &impl Serialize) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Option<T> {
    if raw.body.is_empty() {
        return None;
    }
    serde_json::from_str(&raw.body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ApiResponse;

    #[test]
    fn endpoint_url_joins_base_version_and_path() {
        let transport = Transport::with_http_client(reqwest::Client::new());
        assert_eq!(
            transport.endpoint_url("document/abc123"),
            "https://api.imperialb.in/v1/document/abc123"
        );
    }

    #[test]
    fn with_base_url_appends_missing_trailing_slash() {
        let transport = Transport::with_http_client(reqwest::Client::new())
            .with_base_url("http://localhost:3000")
            .with_version("v2");
        assert_eq!(
            transport.endpoint_url("document"),
            "http://localhost:3000/v2/document"
        );
    }

    #[test]
    fn decode_empty_body_yields_none() {
        let raw = RawResponse {
            status: 200,
            body: String::new(),
        };
        assert!(decode::<ApiResponse>(&raw).is_none());
    }

    #[test]
    fn decode_non_json_body_yields_none() {
        let raw = RawResponse {
            status: 200,
            body: "<html>gateway error</html>".to_string(),
        };
        assert!(decode::<ApiResponse>(&raw).is_none());
    }

    #[test]
    fn decode_envelope_body_yields_value() {
        let raw = RawResponse {
            status: 200,
            body: r#"{"success": true}"#.to_string(),
        };
        let response = decode::<ApiResponse>(&raw).unwrap();
        assert!(response.success);
    }

    #[test]
    fn raw_response_success_is_2xx_only() {
        let ok = RawResponse {
            status: 204,
            body: String::new(),
        };
        let missing = RawResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
