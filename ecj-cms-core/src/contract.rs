//! # contract: the two faces of the Directus API
//!
//! This module defines the traits the rest of the crate talks to, so that
//! provisioning, seeding and content reads never touch HTTP directly:
//!
//! - [`AdminApi`]: the authenticated calls used once, out of band, to build the
//!   schema and insert demo records.
//! - [`ContentApi`]: the read-only calls made at page-render time.
//!
//! [`crate::client::DirectusClient`] implements both over reqwest. Both traits
//! are annotated for `mockall`, and the mocks are exported under the default
//! `test-export-mocks` feature so integration tests can script the API.
//!
//! Implementations unwrap Directus' `{ "data": ... }` envelope; callers see the
//! payload only.

use async_trait::async_trait;
use serde_json::Value;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::CmsError;
use crate::query::ItemQuery;
use crate::schema::{CollectionPayload, FieldDefinition, PermissionPayload};

/// Authenticated schema and item management.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /users/me`; succeeds only with a valid token.
    async fn current_user(&self) -> Result<Value, CmsError>;

    /// `GET /collections/{collection}`.
    async fn read_collection(&self, collection: &str) -> Result<Value, CmsError>;

    /// `POST /collections`.
    async fn create_collection(&self, payload: &CollectionPayload) -> Result<(), CmsError>;

    /// `POST /fields/{collection}`.
    async fn create_field(&self, collection: &str, field: &FieldDefinition)
        -> Result<(), CmsError>;

    /// `POST /permissions`.
    async fn create_permission(&self, permission: &PermissionPayload) -> Result<(), CmsError>;

    /// `POST /items/{collection}`; returns the created record.
    async fn create_item(&self, collection: &str, item: &Value) -> Result<Value, CmsError>;
}

/// Public reads of published content.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /items/{collection}` with filter, sort and limit.
    async fn read_items(&self, collection: &str, query: &ItemQuery)
        -> Result<Vec<Value>, CmsError>;

    /// `GET /items/{collection}` on a singleton; `None` when it has no record yet.
    async fn read_singleton(&self, collection: &str) -> Result<Option<Value>, CmsError>;
}
