use std::collections::VecDeque;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use crate::client::config::ConnectionConfig;
use crate::client::connection::{Connection, HttpRequest, HttpResponse};
use crate::common::error::{ArangoError, Result};

/// In-memory transport that records requests and replays canned responses
#[derive(Debug, Default)]
pub struct MockConnection {
    config: ConnectionConfig,
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    pub fn with_config(config: ConnectionConfig) -> Self {
        MockConnection {
            config,
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a response with a JSON body
    pub fn respond(&self, status_code: u16, body: Value) -> &Self {
        let response = HttpResponse {
            status_code,
            body: body.to_string().into_bytes(),
        };
        self.responses.lock().push_back(response);
        self
    }

    /// Queue a response without body
    pub fn respond_empty(&self, status_code: u16) -> &Self {
        self.responses.lock().push_back(HttpResponse::new(status_code));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request.clone());
        self.responses.lock().pop_front().ok_or_else(|| {
            ArangoError::Network(format!(
                "no response queued for {} {}",
                request.method.as_str(),
                request.url()
            ))
        })
    }

    fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}
