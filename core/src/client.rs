//! Document operations over one shared [`Transport`].
//!
//! # Design
//! [`ImperialClient`] returns the full `{success, data, error}` envelope and
//! leaves inspection to the caller. [`Documents`], obtained from
//! [`ImperialClient::documents`], is the second variant: the same five
//! operations, but the envelope is unwrapped into the document payload and a
//! `success: false` response becomes an error. Both are thin call sites over
//! the same transport.
//!
//! The original API's overloaded edit forms map onto the builder:
//! `EditDocumentRequest::new(id).with_content(..)` and/or `.with_settings(..)`.

use crate::error::ApiError;
use crate::request::{CreateDocumentRequest, EditDocumentRequest};
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{Document, RequestDocumentSettings};

/// Client for the Imperial document API, returning response envelopes.
#[derive(Debug, Clone)]
pub struct ImperialClient {
    transport: Transport,
}

impl ImperialClient {
    /// Creates a client with an owned HTTP handle and default endpoint.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self {
            transport: Transport::new()?,
        })
    }

    /// Creates a client over a caller-supplied `reqwest` handle.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            transport: Transport::with_http_client(http),
        }
    }

    /// Binds the API key used on all subsequent calls.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.transport = self.transport.with_api_key(api_key);
        self
    }

    /// Replaces the base URL (default `https://api.imperialb.in/`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport = self.transport.with_base_url(base_url);
        self
    }

    /// Replaces the API version segment (default `v1`).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.transport = self.transport.with_version(version);
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// The bare-document variant of this client, sharing its transport.
    pub fn documents(&self) -> Documents<'_> {
        Documents { client: self }
    }

    /// `POST document` — creates a document.
    ///
    /// # Errors
    /// `ApiError::MissingResponse` when the server yields no decodable
    /// envelope, `ApiError::Transport` / `ApiError::Serialization` otherwise.
    pub async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.transport
            .post("document", request)
            .await?
            .ok_or(ApiError::MissingResponse)
    }

    /// `PATCH document` — edits a document. Fields absent from the request
    /// are left unchanged server-side.
    ///
    /// # Errors
    /// `ApiError::MissingResponse` when the server yields no decodable
    /// envelope, `ApiError::Transport` / `ApiError::Serialization` otherwise.
    pub async fn edit_document(
        &self,
        request: &EditDocumentRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.transport
            .patch("document", request)
            .await?
            .ok_or(ApiError::MissingResponse)
    }

    /// `GET document/{id}` — fetches a document.
    ///
    /// # Errors
    /// `ApiError::MissingResponse` when the server yields no decodable
    /// envelope, `ApiError::Transport` otherwise.
    pub async fn get_document(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.transport
            .get(&document_path(id))
            .await?
            .ok_or(ApiError::MissingResponse)
    }

    /// `GET document/{id}?password={password}` — fetches an encrypted
    /// document.
    ///
    /// The password is interpolated into the query string verbatim; values
    /// containing reserved URL characters such as `&` or `#` are passed
    /// through unescaped.
    ///
    /// # Errors
    /// `ApiError::MissingResponse` when the server yields no decodable
    /// envelope, `ApiError::Transport` otherwise.
    pub async fn get_document_with_password(
        &self,
        id: &str,
        password: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.transport
            .get(&document_path_with_password(id, password))
            .await?
            .ok_or(ApiError::MissingResponse)
    }

    /// `DELETE document/{id}` — deletes a document.
    ///
    /// Delete responses do not always carry a parseable envelope; when the
    /// body cannot be decoded, a minimal envelope is synthesized from the
    /// HTTP status class so callers still get a usable result.
    ///
    /// # Errors
    /// `ApiError::Transport` when the request cannot be executed.
    pub async fn delete_document(&self, id: &str) -> Result<ApiResponse, ApiError> {
        let raw = self.transport.delete_raw(&document_path(id)).await?;
        Ok(serde_json::from_str(&raw.body)
            .unwrap_or_else(|_| ApiResponse::from_status(raw.is_success())))
    }
}

/// Bare-document view over an [`ImperialClient`]: the same five operations,
/// with the envelope unwrapped into its payload.
#[derive(Debug, Clone, Copy)]
pub struct Documents<'a> {
    client: &'a ImperialClient,
}

impl Documents<'_> {
    /// Creates a document from content and optional settings.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::create_document`].
    pub async fn create(
        &self,
        content: impl Into<String>,
        settings: Option<RequestDocumentSettings>,
    ) -> Result<Document, ApiError> {
        let mut request = CreateDocumentRequest::new(content);
        if let Some(settings) = settings {
            request = request.with_settings(settings);
        }
        self.create_request(&request).await
    }

    /// Creates a document from a prepared request.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::create_document`].
    pub async fn create_request(
        &self,
        request: &CreateDocumentRequest,
    ) -> Result<Document, ApiError> {
        self.client.create_document(request).await?.into_document()
    }

    /// Edits a document.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::edit_document`].
    pub async fn edit(&self, request: &EditDocumentRequest) -> Result<Document, ApiError> {
        self.client.edit_document(request).await?.into_document()
    }

    /// Fetches a document.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::get_document`].
    pub async fn get(&self, id: &str) -> Result<Document, ApiError> {
        self.client.get_document(id).await?.into_document()
    }

    /// Fetches an encrypted document using its password.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::get_document_with_password`].
    pub async fn get_with_password(&self, id: &str, password: &str) -> Result<Document, ApiError> {
        self.client
            .get_document_with_password(id, password)
            .await?
            .into_document()
    }

    /// Deletes a document.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reports failure, plus the error
    /// conditions of [`ImperialClient::delete_document`].
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete_document(id).await?;
        if response.success {
            Ok(())
        } else {
            Err(ApiError::Api(
                response
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "delete failed".to_string()),
            ))
        }
    }
}

fn document_path(id: &str) -> String {
    format!("document/{id}")
}

fn document_path_with_password(id: &str, password: &str) -> String {
    format!("document/{id}?password={password}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_path_embeds_id() {
        assert_eq!(document_path("abc123"), "document/abc123");
    }

    #[test]
    fn password_is_sent_as_plain_query_parameter() {
        assert_eq!(
            document_path_with_password("abc123", "secret"),
            "document/abc123?password=secret"
        );
    }

    #[test]
    fn password_is_not_escaped() {
        // Matches the server's wire contract; callers must pre-escape
        // reserved characters themselves.
        assert_eq!(
            document_path_with_password("abc123", "a&b"),
            "document/abc123?password=a&b"
        );
    }

    #[test]
    fn client_builders_reach_the_transport() {
        let client = ImperialClient::with_http_client(reqwest::Client::new())
            .with_base_url("http://localhost:3000")
            .with_version("v9");
        assert_eq!(client.transport().base_url(), "http://localhost:3000/");
        assert_eq!(client.transport().version(), "v9");
    }
}
