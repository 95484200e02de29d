//! Wire types for the Imperial document API.
//!
//! # Design
//! These types mirror the API's JSON schema. Response types are immutable
//! snapshots — only ever produced by decoding a server response. Request
//! settings are a distinct type ([`RequestDocumentSettings`]) because request
//! semantics (partial update, omit-what-you-don't-touch) differ from response
//! semantics (always fully populated).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::editor_list;

/// A stored document as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque document id, used for subsequent edit/get/delete calls.
    pub id: String,
    pub content: String,
    /// Owning account; `None` for anonymous documents.
    pub creator: Option<Creator>,
    pub views: u64,
    /// External GitHub Gist mirror, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gist_url: Option<String>,
    pub timestamps: Timestamps,
    pub settings: DocumentSettings,
    pub links: Links,
}

/// An account associated with a document, as owner or editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub documents_made: u64,
    pub username: String,
    /// Integer flag bitset as defined by the service.
    pub flags: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Document settings as returned in responses — always fully populated.
///
/// `editors` is submitted to the server as bare usernames but returned as
/// full profiles; the [`editor_list`] codec handles both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub image_embed: bool,
    #[serde(default)]
    pub instant_delete: bool,
    #[serde(default)]
    pub encrypted: bool,
    /// Write-only: serialized when set, never returned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default, with = "editor_list")]
    pub editors: Vec<Creator>,
}

fn default_language() -> String {
    "auto".to_string()
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            image_embed: false,
            instant_delete: false,
            encrypted: false,
            password: None,
            public: false,
            editors: Vec::new(),
        }
    }
}

/// Document settings for create/edit requests. Every field is optional:
/// `None` means "leave unchanged" on edit, or "use the server default" on
/// create, and is omitted from the payload entirely — never sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDocumentSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_embed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Editor usernames; the server resolves them to full profiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editors: Option<Vec<String>>,
}

impl RequestDocumentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_image_embed(mut self, image_embed: bool) -> Self {
        self.image_embed = Some(image_embed);
        self
    }

    pub fn with_instant_delete(mut self, instant_delete: bool) -> Self {
        self.instant_delete = Some(instant_delete);
        self
    }

    pub fn with_encryption(mut self, encrypted: bool) -> Self {
        self.encrypted = Some(encrypted);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn as_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_editors<I, S>(mut self, editors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.editors = Some(editors.into_iter().map(Into::into).collect());
        self
    }
}

/// Creation and expiration instants of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub creation: DateTime<Utc>,
    /// Absent means the document never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Human-viewable and plain-text URLs for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub formatted: String,
    pub raw: String,
}

/// Error payload inside a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
