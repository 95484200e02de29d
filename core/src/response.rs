//! The `{success, data, error}` envelope every API response uses.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{Document, ErrorMessage};

/// Response envelope returned by every document operation.
///
/// `data` is populated iff `success` is true and `error` iff it is false,
/// but the server does not enforce this strictly — both fields decode
/// defensively to `None`, and callers must check `success` before trusting
/// `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMessage>,
}

impl ApiResponse {
    /// Minimal envelope synthesized from an HTTP status class, used when a
    /// delete response body cannot be decoded.
    pub(crate) fn from_status(success: bool) -> Self {
        Self {
            success,
            data: None,
            error: None,
        }
    }

    /// Unwraps the envelope into its document payload.
    ///
    /// # Errors
    /// `ApiError::Api` when the server reported failure, `ApiError::MissingData`
    /// when the envelope claimed success but carried no document.
    pub fn into_document(self) -> Result<Document, ApiError> {
        if self.success {
            self.data.ok_or(ApiError::MissingData)
        } else {
            Err(ApiError::Api(
                self.error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentSettings, Links, Timestamps};

    fn document(id: &str) -> Document {
        Document {
            id: id.to_string(),
            content: "hello".to_string(),
            creator: None,
            views: 0,
            gist_url: None,
            timestamps: Timestamps {
                creation: "2024-01-01T00:00:00Z".parse().unwrap(),
                expiration: None,
            },
            settings: DocumentSettings::default(),
            links: Links {
                formatted: "https://imperialb.in/p/abc".to_string(),
                raw: "https://imperialb.in/r/abc".to_string(),
            },
        }
    }

    #[test]
    fn into_document_returns_data_on_success() {
        let response = ApiResponse {
            success: true,
            data: Some(document("abc")),
            error: None,
        };
        assert_eq!(response.into_document().unwrap().id, "abc");
    }

    #[test]
    fn into_document_surfaces_server_error_message() {
        let response = ApiResponse {
            success: false,
            data: None,
            error: Some(ErrorMessage {
                message: "document not found".to_string(),
            }),
        };
        let err = response.into_document().unwrap_err();
        assert!(matches!(err, ApiError::Api(msg) if msg == "document not found"));
    }

    #[test]
    fn into_document_without_error_message_still_fails() {
        let response = ApiResponse::from_status(false);
        assert!(matches!(
            response.into_document().unwrap_err(),
            ApiError::Api(_)
        ));
    }

    #[test]
    fn success_without_data_is_missing_data() {
        let response = ApiResponse::from_status(true);
        assert!(matches!(
            response.into_document().unwrap_err(),
            ApiError::MissingData
        ));
    }

    #[test]
    fn envelope_decodes_with_absent_data_and_error() {
        let response: ApiResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert!(response.data.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn failure_envelope_decodes_error_message() {
        let body = r#"{"success": false, "error": {"message": "invalid API key"}}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.unwrap().message, "invalid API key");
    }
}
