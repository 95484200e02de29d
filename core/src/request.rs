//! Request payloads for document creation and editing.
//!
//! # Design
//! Edit requests carry partial-update semantics: fields the caller never set
//! must be excluded from the JSON entirely (not sent as `null`) so the server
//! leaves the stored values untouched. Both builders render as their JSON
//! payload via `Display` for debugging and logging.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RequestDocumentSettings;

/// Payload for `POST document`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<RequestDocumentSettings>,
}

impl CreateDocumentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            settings: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_settings(mut self, settings: RequestDocumentSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

impl fmt::Display for CreateDocumentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_json(self, f)
    }
}

/// Payload for `PATCH document`. `content` and `settings` are each
/// independently optional; omitted fields are left unchanged server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDocumentRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<RequestDocumentSettings>,
}

impl EditDocumentRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            settings: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_settings(mut self, settings: RequestDocumentSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

impl fmt::Display for EditDocumentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_json(self, f)
    }
}

fn write_json<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string(value) {
        Ok(json) => f.write_str(&json),
        Err(_) => f.write_str("<unserializable>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_without_settings_omits_the_field() {
        let request = CreateDocumentRequest::new("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["content"], "hello");
        assert!(json.get("settings").is_none());
    }

    #[test]
    fn create_with_settings_serializes_them() {
        let request = CreateDocumentRequest::new("hello")
            .with_settings(RequestDocumentSettings::new().with_language("rust"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["settings"]["language"], "rust");
    }

    #[test]
    fn edit_with_only_content_omits_settings() {
        let request = EditDocumentRequest::new("abc123").with_content("updated");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["id"], "abc123");
        assert_eq!(json["content"], "updated");
        assert!(json.get("settings").is_none());
    }

    #[test]
    fn edit_with_only_settings_omits_content() {
        let request = EditDocumentRequest::new("abc123")
            .with_settings(RequestDocumentSettings::new().as_public(true));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["settings"]["public"], true);
    }

    #[test]
    fn edit_with_neither_sends_id_alone() {
        let request = EditDocumentRequest::new("abc123");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"id":"abc123"}"#);
    }

    #[test]
    fn with_content_replaces_previous_content() {
        let request = CreateDocumentRequest::new("first").with_content("second");
        assert_eq!(request.content, "second");
    }

    #[test]
    fn display_renders_json_payload() {
        let request = EditDocumentRequest::new("abc123").with_content("updated");
        assert_eq!(
            request.to_string(),
            r#"{"id":"abc123","content":"updated"}"#
        );
    }
}
