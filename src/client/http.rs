use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use crate::client::config::ConnectionConfig;
use crate::client::connection::{Connection, HttpMethod, HttpRequest, HttpResponse};
use crate::common::error::Result;

/// HTTP transport backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpConnection {
    client: reqwest::Client,
    config: ConnectionConfig,
    base_url: String,
}

impl HttpConnection {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        let base_url = format!(
            "{}{}",
            config.endpoint.trim_end_matches('/'),
            config.database_prefix()
        );

        Ok(HttpConnection {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::GET => Method::GET,
        HttpMethod::POST => Method::POST,
        HttpMethod::PUT => Method::PUT,
        HttpMethod::PATCH => Method::PATCH,
        HttpMethod::DELETE => Method::DELETE,
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .query(&request.query_params);
        if let Some(username) = &self.config.username {
            builder = builder.basic_auth(username, self.config.password.as_ref());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("{} {} -> {}", request.method.as_str(), request.path, status_code);

        Ok(HttpResponse { status_code, body })
    }

    fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_includes_database() {
        let connection = HttpConnection::new(
            ConnectionConfig::default()
                .with_endpoint("http://localhost:8529/")
                .with_database("social"),
        ).unwrap();
        assert_eq!(connection.base_url(), "http://localhost:8529/_db/social");

        let system = HttpConnection::new(ConnectionConfig::default()).unwrap();
        assert_eq!(system.base_url(), "http://127.0.0.1:8529");
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(HttpConnection::new(ConnectionConfig::default().with_endpoint("nope")).is_err());
    }
}
