//! Mock [`Transport`] for testing.
//!
//! [`ScriptedTransport`] pops one pre-loaded result per request and records
//! what was sent, so tests can assert on URLs, headers and bodies without a
//! live backend.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::outbound::transport::{HttpRequest, HttpResponse, Transport};

/// A transport with a fixed queue of responses.
///
/// When the queue is exhausted every further request fails with
/// [`Error::Connection`].
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body.
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        let body = body.to_string().into_bytes();
        self.push(Ok(HttpResponse { status, body }))
    }

    /// Queue a response with an empty body.
    pub fn with_status(self, status: u16) -> Self {
        self.push(Ok(HttpResponse {
            status,
            body: Vec::new(),
        }))
    }

    /// Queue a transport-level failure.
    pub fn with_error(self, message: &str) -> Self {
        self.push(Err(Error::Connection(message.to_string())))
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }

    fn push(self, response: Result<HttpResponse>) -> Self {
        self.responses.lock().push_back(response);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Connection(format!("no scripted response for {url}"))))
    }
}
