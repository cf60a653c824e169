//! # Directus client
//!
//! [`DirectusClient`] is the only place that speaks HTTP. It wraps a single
//! request helper ([`DirectusClient::request`]) and implements both
//! [`AdminApi`] and [`ContentApi`] on top of it.
//!
//! - Construct it from a [`CmsConfig`] (see [`CmsConfig::admin_from_env`] and
//!   [`CmsConfig::public_from_env`]).
//! - Every call is one request; there are no retries and no timeout.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::CmsConfig;
use crate::contract::{AdminApi, ContentApi};
use crate::error::CmsError;
use crate::query::ItemQuery;
use crate::schema::{CollectionPayload, FieldDefinition, PermissionPayload};

pub struct DirectusClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl DirectusClient {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let http = Client::builder().build().map_err(|e| {
            error!(error = ?e, "Failed to build HTTP client");
            e
        })?;
        info!(
            base_url = %config.base_url,
            authenticated = config.admin_token.is_some(),
            "Initialized DirectusClient"
        );
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.admin_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one JSON request to `{base_url}{endpoint}`.
    ///
    /// Non-success statuses become [`CmsError::Api`] with the response text.
    /// An empty body yields `Ok(None)`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Option<Value>, CmsError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, url = %url, "Sending Directus request");

        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            error!(error = ?e, %method, url = %url, "Directus request failed to send");
            e
        })?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            error!(status = %status, %method, url = %url, "Directus returned error. Response body: {text}");
            return Err(CmsError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Option<Value>, CmsError> {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }
}

/// Strips the `{ "data": ... }` envelope Directus wraps every payload in.
fn into_data(body: Option<Value>) -> Value {
    match body {
        Some(Value::Object(mut map)) => map.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// A list read must come back as `{ "data": [...] }`; anything else is a decode error.
fn into_list(body: Option<Value>) -> Result<Vec<Value>, CmsError> {
    match body {
        Some(Value::Object(mut map)) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(malformed(format!("expected `data` to be an array, got {other}"))),
            None => Err(malformed("response has no `data` envelope".to_string())),
        },
        Some(other) => Err(malformed(format!("expected an object, got {other}"))),
        None => Err(malformed("empty response body".to_string())),
    }
}

fn malformed(reason: String) -> CmsError {
    CmsError::Decode(<serde_json::Error as serde::de::Error>::custom(reason))
}

#[async_trait]
impl AdminApi for DirectusClient {
    async fn current_user(&self) -> Result<Value, CmsError> {
        let body = self.request(Method::GET, "/users/me", &[], None).await?;
        Ok(into_data(body))
    }

    async fn read_collection(&self, collection: &str) -> Result<Value, CmsError> {
        let endpoint = format!("/collections/{collection}");
        let body = self.request(Method::GET, &endpoint, &[], None).await?;
        Ok(into_data(body))
    }

    async fn create_collection(&self, payload: &CollectionPayload) -> Result<(), CmsError> {
        let body = serde_json::to_value(payload)?;
        self.post("/collections", &body).await?;
        Ok(())
    }

    async fn create_field(
        &self,
        collection: &str,
        field: &FieldDefinition,
    ) -> Result<(), CmsError> {
        let body = serde_json::to_value(field)?;
        self.post(&format!("/fields/{collection}"), &body).await?;
        Ok(())
    }

    async fn create_permission(&self, permission: &PermissionPayload) -> Result<(), CmsError> {
        let body = serde_json::to_value(permission)?;
        self.post("/permissions", &body).await?;
        Ok(())
    }

    async fn create_item(&self, collection: &str, item: &Value) -> Result<Value, CmsError> {
        let body = self.post(&format!("/items/{collection}"), item).await?;
        Ok(into_data(body))
    }
}

#[async_trait]
impl ContentApi for DirectusClient {
    async fn read_items(
        &self,
        collection: &str,
        query: &ItemQuery,
    ) -> Result<Vec<Value>, CmsError> {
        let endpoint = format!("/items/{collection}");
        let body = self
            .request(Method::GET, &endpoint, &query.to_query_pairs(), None)
            .await?;
        into_list(body).map_err(|e| {
            error!(collection, error = %e, "Malformed list response");
            e
        })
    }

    async fn read_singleton(&self, collection: &str) -> Result<Option<Value>, CmsError> {
        let endpoint = format!("/items/{collection}");
        let body = self.request(Method::GET, &endpoint, &[], None).await?;
        match into_data(body) {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_data_unwraps_the_envelope() {
        assert_eq!(
            into_data(Some(json!({ "data": { "id": 1 } }))),
            json!({ "id": 1 })
        );
        assert_eq!(into_data(Some(json!({ "other": 1 }))), Value::Null);
        assert_eq!(into_data(None), Value::Null);
    }

    #[test]
    fn into_list_requires_an_enveloped_array() {
        assert_eq!(
            into_list(Some(json!({ "data": [{ "id": 1 }, { "id": 2 }] }))).unwrap(),
            vec![json!({ "id": 1 }), json!({ "id": 2 })]
        );
        assert!(into_list(Some(json!({ "data": [] }))).unwrap().is_empty());

        for malformed in [
            None,
            Some(json!({ "errors": [] })),
            Some(json!({ "data": { "id": 1 } })),
            Some(json!({ "data": null })),
            Some(json!([{ "id": 1 }])),
        ] {
            let err = into_list(malformed.clone()).unwrap_err();
            assert!(matches!(err, CmsError::Decode(_)), "{malformed:?} gave {err:?}");
        }
    }

    #[test]
    fn new_client_normalises_base_url() {
        let config = CmsConfig {
            base_url: "http://localhost:8055/".into(),
            admin_token: None,
        };
        let client = DirectusClient::new(&config).expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8055");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane test host.
        let config = CmsConfig::new("http://127.0.0.1:9", Some("token".into()));
        let client = DirectusClient::new(&config).expect("client builds");
        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, CmsError::Transport(_)), "got {err:?}");
    }
}
