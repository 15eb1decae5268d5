//! Typed REST client for the storefront backend.
//!
//! Every request reads the bearer token from client storage, so a login or
//! logout takes effect on the very next call. Non-2xx responses become
//! [`RequestError`]; there are no retries.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::settings::ApiConfig;
use super::transport::ReqwestTransport;
use crate::error::{RequestError, Result};
use crate::port::outbound::storage::{KeyValueStore, StorageKey};
use crate::port::outbound::transport::{HttpRequest, HttpResponse, Method, Transport};

/// JSON client over a [`Transport`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn KeyValueStore>,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` that reads its credential from `storage`.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            storage,
            base_url,
        }
    }

    /// Create a reqwest-backed client from configuration.
    pub fn from_config(config: &ApiConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::from_config(config)?);
        Ok(Self::new(config.base_url.clone(), transport, storage))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Get, path, None).await
    }

    /// GET with URL-encoded query parameters appended to `path`.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        if params.is_empty() {
            return self.get(path).await;
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();
        let separator = if path.contains('?') { '&' } else { '?' };
        self.get(&format!("{path}{separator}{query}")).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Delete, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let request = self.build_request(method, path, body)?;
        debug!(
            %method,
            path,
            authenticated = request.header("authorization").is_some(),
            "Sending request"
        );

        let response = self.transport.send(request).await?;
        debug!(%method, path, status = response.status, "Received response");

        if !response.is_success() {
            return Err(RequestError {
                method: method.as_str(),
                path: path.to_string(),
                status: response.status,
                status_text: status_text(response.status),
            }
            .into());
        }

        decode(&response)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpRequest> {
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = self.storage.get(StorageKey::Token)? {
            if !token.is_empty() {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        })
    }
}

fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), ToOwned::to_owned)
}

/// Decode a success body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(&response.body)?)
}
