use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use crate::client::config::ConnectionConfig;
use crate::common::error::{ArangoError, ErrorCode, Result};
use crate::common::utils::append_params;

/// HTTP methods used by the graph API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// Request handed to a [`Connection`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query_params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        HttpRequest {
            method,
            path: path.into(),
            query_params: Vec::new(),
            body: None,
        }
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = params;
        self
    }

    pub fn with_json_body<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    pub fn get_query_param(&self, key: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path plus encoded query string
    pub fn url(&self) -> String {
        append_params(&self.path, &self.query_params)
    }
}

/// Response returned by a [`Connection`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16) -> Self {
        HttpResponse {
            status_code,
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_json_body<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = serde_json::to_vec(data)?;
        Ok(self)
    }

    pub fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// Decode the body as JSON; an empty body decodes to `null`
    pub fn json(&self) -> Result<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(ArangoError::from)
    }

    /// Turn error answers into typed errors and decode the rest.
    ///
    /// A 2xx answer whose body carries `"error": true` is still an error.
    pub fn into_result(self) -> Result<Value> {
        let body = match self.json() {
            Ok(body) => body,
            Err(_) if !self.is_success() => {
                let text = String::from_utf8_lossy(&self.body).into_owned();
                return Err(error_from_body(self.status_code, &Value::String(text)));
            }
            Err(e) => return Err(e),
        };

        let flagged = body.get("error").and_then(Value::as_bool).unwrap_or(false);
        if !self.is_success() || flagged {
            return Err(error_from_body(self.status_code, &body));
        }
        Ok(body)
    }
}

fn error_from_body(status: u16, body: &Value) -> ArangoError {
    let code = match body.get("errorNum").and_then(Value::as_u64) {
        Some(n) => u32::try_from(n).map(ErrorCode::from_u32).unwrap_or(ErrorCode::Unknown),
        None => ErrorCode::from_u32(status as u32),
    };
    let message = body
        .get("errorMessage")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| body.as_str().filter(|s| !s.is_empty()).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP status {}", status));

    if status == 412 || code == ErrorCode::ArangoConflict {
        tracing::warn!("revision conflict reported by server: {}", message);
        return ArangoError::revision_conflict(message);
    }
    ArangoError::server(status, code, message)
}

/// Transport used by the graph handler
///
/// Implementations must be safe to share between tasks; the handler only
/// reads the configuration and never mutates the connection.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Send one request and return the raw response, whatever its status
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Connection-level defaults
    fn config(&self) -> &ConnectionConfig;
}
