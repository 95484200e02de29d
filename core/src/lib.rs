//! Asynchronous API client for the Imperial document-paste service.
//!
//! # Overview
//! Wraps the service's single REST resource (`document`) behind typed
//! request/response objects: construct a JSON body, attach the API key,
//! issue an HTTP verb, decode the envelope. Nothing more — retries,
//! timeouts and caching are the caller's business.
//!
//! # Design
//! - [`Transport`] holds the base URL, API version, API key and the
//!   `reqwest` handle. The key is bound at construction and attached per
//!   request; the shared handle's default headers are never mutated, so one
//!   client is safe to share across tasks.
//! - [`ImperialClient`] exposes the five document operations returning the
//!   full `{success, data, error}` envelope; [`Documents`] is a thin view
//!   over the same transport that unwraps the envelope into the document
//!   payload directly.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod codec;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{Documents, ImperialClient};
pub use error::ApiError;
pub use request::{CreateDocumentRequest, EditDocumentRequest};
pub use response::ApiResponse;
pub use transport::{RawResponse, Transport};
pub use types::{
    Creator, Document, DocumentSettings, ErrorMessage, Links, RequestDocumentSettings, Timestamps,
};
