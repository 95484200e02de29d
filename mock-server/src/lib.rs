//! In-memory mock of the Imperial document API for integration tests.
//!
//! Wire types are defined here independently of `imperial-core` so that
//! integration tests catch schema drift between client and server.
//!
//! Behavior worth noting:
//! - Editor usernames submitted in settings are expanded into full creator
//!   profiles in responses, mirroring the real service's asymmetric contract.
//! - Requests carrying the `Authorization` value [`TEST_API_KEY`] are
//!   attributed to a fixed test account; anonymous documents have no creator.
//! - `DELETE` on an unknown id answers 404 with an **empty body**, which is
//!   what the real service's edge does — clients must cope without JSON.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// API key recognized by the mock; requests carrying it get a creator.
pub const TEST_API_KEY: &str = "imperial-test-key";

const TEST_USERNAME: &str = "tester";

#[derive(Clone, Debug, Serialize)]
pub struct Creator {
    pub id: String,
    pub documents_made: u64,
    pub username: String,
    pub flags: u64,
    pub icon: Option<String>,
}

impl Creator {
    fn from_username(username: &str) -> Self {
        Self {
            id: format!("usr_{username}"),
            documents_made: 0,
            username: username.to_string(),
            flags: 0,
            icon: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Settings {
    pub language: String,
    pub image_embed: bool,
    pub instant_delete: bool,
    pub encrypted: bool,
    pub public: bool,
    pub editors: Vec<Creator>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            image_embed: false,
            instant_delete: false,
            encrypted: false,
            public: false,
            editors: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Timestamps {
    pub creation: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Links {
    pub formatted: String,
    pub raw: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub creator: Option<Creator>,
    pub views: u64,
    pub gist_url: Option<String>,
    pub timestamps: Timestamps,
    pub settings: Settings,
    pub links: Links,
}

#[derive(Serialize)]
struct Envelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl Envelope {
    fn ok(document: Document) -> Self {
        Self {
            success: true,
            data: Some(document),
            error: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: message.to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
pub struct RequestSettings {
    pub language: Option<String>,
    pub image_embed: Option<bool>,
    pub instant_delete: Option<bool>,
    pub encrypted: Option<bool>,
    pub password: Option<String>,
    pub public: Option<bool>,
    pub editors: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateDocument {
    pub content: String,
    pub settings: Option<RequestSettings>,
}

#[derive(Deserialize)]
pub struct EditDocument {
    pub id: String,
    pub content: Option<String>,
    pub settings: Option<RequestSettings>,
}

#[derive(Clone)]
struct Stored {
    document: Document,
    password: Option<String>,
}

type Db = Arc<RwLock<HashMap<String, Stored>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/v1/document", post(create_document).patch(edit_document))
        .route(
            "/v1/document/{id}",
            get(get_document).delete(delete_document),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn creator_from_headers(headers: &HeaderMap) -> Option<Creator> {
    let key = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    (key == TEST_API_KEY).then(|| Creator::from_username(TEST_USERNAME))
}

fn apply_settings(settings: &mut Settings, password: &mut Option<String>, input: RequestSettings) {
    if let Some(language) = input.language {
        settings.language = language;
    }
    if let Some(image_embed) = input.image_embed {
        settings.image_embed = image_embed;
    }
    if let Some(instant_delete) = input.instant_delete {
        settings.instant_delete = instant_delete;
    }
    if let Some(encrypted) = input.encrypted {
        settings.encrypted = encrypted;
    }
    if let Some(new_password) = input.password {
        *password = Some(new_password);
    }
    if let Some(public) = input.public {
        settings.public = public;
    }
    if let Some(editors) = input.editors {
        settings.editors = editors
            .iter()
            .map(|username| Creator::from_username(username))
            .collect();
    }
}

async fn create_document(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateDocument>,
) -> Response {
    let id = Uuid::new_v4().simple().to_string();
    let mut settings = Settings::default();
    let mut password = None;
    if let Some(request_settings) = input.settings {
        apply_settings(&mut settings, &mut password, request_settings);
    }

    let document = Document {
        id: id.clone(),
        content: input.content,
        creator: creator_from_headers(&headers),
        views: 0,
        gist_url: None,
        timestamps: Timestamps {
            creation: Utc::now(),
            expiration: None,
        },
        settings,
        links: Links {
            formatted: format!("https://imperialb.in/p/{id}"),
            raw: format!("https://imperialb.in/r/{id}"),
        },
    };

    db.write().await.insert(
        id,
        Stored {
            document: document.clone(),
            password,
        },
    );
    Json(Envelope::ok(document)).into_response()
}

async fn edit_document(State(db): State<Db>, Json(input): Json<EditDocument>) -> Response {
    let mut documents = db.write().await;
    let Some(stored) = documents.get_mut(&input.id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(Envelope::fail("document not found")),
        )
            .into_response();
    };

    if let Some(content) = input.content {
        stored.document.content = content;
    }
    if let Some(request_settings) = input.settings {
        apply_settings(
            &mut stored.document.settings,
            &mut stored.password,
            request_settings,
        );
    }
    Json(Envelope::ok(stored.document.clone())).into_response()
}

async fn get_document(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut documents = db.write().await;
    let Some(stored) = documents.get_mut(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(Envelope::fail("document not found")),
        )
            .into_response();
    };

    if let Some(expected) = &stored.password {
        if params.get("password") != Some(expected) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(Envelope::fail("incorrect password")),
            )
                .into_response();
        }
    }

    stored.document.views += 1;
    Json(Envelope::ok(stored.document.clone())).into_response()
}

async fn delete_document(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut documents = db.write().await;
    match documents.remove(&id) {
        Some(_) => Json(Envelope {
            success: true,
            data: None,
            error: None,
        })
        .into_response(),
        // The real edge answers an unknown id with a bodyless 404.
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_serializes_success_and_data() {
        let document = Document {
            id: "abc".to_string(),
            content: "hello".to_string(),
            creator: None,
            views: 0,
            gist_url: None,
            timestamps: Timestamps {
                creation: Utc::now(),
                expiration: None,
            },
            settings: Settings::default(),
            links: Links {
                formatted: "https://imperialb.in/p/abc".to_string(),
                raw: "https://imperialb.in/r/abc".to_string(),
            },
        };
        let json = serde_json::to_value(Envelope::ok(document)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], "abc");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn fail_envelope_serializes_error_message() {
        let json = serde_json::to_value(Envelope::fail("document not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["message"], "document not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn editors_are_expanded_to_full_profiles() {
        let mut settings = Settings::default();
        let mut password = None;
        apply_settings(
            &mut settings,
            &mut password,
            RequestSettings {
                language: None,
                image_embed: None,
                instant_delete: None,
                encrypted: None,
                password: None,
                public: None,
                editors: Some(vec!["alice".to_string()]),
            },
        );
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["editors"][0]["username"], "alice");
        assert_eq!(json["editors"][0]["id"], "usr_alice");
    }

    #[test]
    fn apply_settings_leaves_unset_fields_untouched() {
        let mut settings = Settings {
            language: "rust".to_string(),
            ..Settings::default()
        };
        let mut password = Some("hunter2".to_string());
        apply_settings(
            &mut settings,
            &mut password,
            RequestSettings {
                language: None,
                image_embed: Some(true),
                instant_delete: None,
                encrypted: None,
                password: None,
                public: None,
                editors: None,
            },
        );
        assert_eq!(settings.language, "rust");
        assert!(settings.image_embed);
        assert_eq!(password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn create_document_rejects_missing_content() {
        let result: Result<CreateDocument, _> = serde_json::from_str(r#"{"settings": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn edit_document_all_update_fields_optional() {
        let input: EditDocument = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(input.id, "abc");
        assert!(input.content.is_none());
        assert!(input.settings.is_none());
    }
}
