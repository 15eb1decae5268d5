//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::settings::ApiConfig;
use crate::error::Result;
use crate::port::outbound::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Sends requests with a shared `reqwest::Client`.
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    /// Build a client honoring the configured timeout.
    ///
    /// Fails with [`crate::error::Error::Http`] when reqwest cannot build the
    /// client, rather than continuing without the requested settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(Self::method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
