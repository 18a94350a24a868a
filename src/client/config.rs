use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::common::error::{ArangoError, Result};
use crate::common::utils::url_encode;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8529";
pub const SYSTEM_DATABASE: &str = "_system";
const ENV_PREFIX: &str = "ARANGO";

/// Connection configuration shared by every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Default for `waitForSync` when an operation does not set it
    pub wait_for_sync: bool,
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            database: SYSTEM_DATABASE.to_string(),
            username: None,
            password: None,
            wait_for_sync: false,
            timeout_secs: 30,
        }
    }
}

impl ConnectionConfig {
    /// Load defaults, then the optional file, then `ARANGO_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let loaded: ConnectionConfig = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| ArangoError::Config(format!("invalid endpoint '{}': {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ArangoError::Config(format!(
                "unsupported endpoint scheme '{}'", url.scheme()
            )));
        }
        if self.database.is_empty() {
            return Err(ArangoError::Config("database name cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = wait_for_sync;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path prefix selecting the database; empty for `_system`
    pub fn database_prefix(&self) -> String {
        if self.database == SYSTEM_DATABASE {
            String::new()
        } else {
            format!("/_db/{}", url_encode(&self.database))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::load_with_env(None, Some(env(&[]))).unwrap();
        assert_eq!(config, ConnectionConfig::default());
        assert_eq!(config.database_prefix(), "");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_environment_overrides() {
        let config = ConnectionConfig::load_with_env(None, Some(env(&[
            ("ARANGO_ENDPOINT", "http://db.local:8530"),
            ("ARANGO_DATABASE", "social"),
            ("ARANGO_WAIT_FOR_SYNC", "true"),
            ("ARANGO_TIMEOUT_SECS", "5"),
        ]))).unwrap();

        assert_eq!(config.endpoint, "http://db.local:8530");
        assert!(config.wait_for_sync);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.database_prefix(), "/_db/social");
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "endpoint = \"https://graph.example:8529\"").unwrap();
        writeln!(file, "username = \"root\"").unwrap();
        writeln!(file, "wait_for_sync = true").unwrap();

        let config = ConnectionConfig::load_with_env(
            Some(file.path()),
            Some(env(&[("ARANGO_WAIT_FOR_SYNC", "false")])),
        ).unwrap();

        assert_eq!(config.endpoint, "https://graph.example:8529");
        assert_eq!(config.username.as_deref(), Some("root"));
        assert!(!config.wait_for_sync);
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = ConnectionConfig::load_with_env(None, Some(env(&[("ARANGO_ENDPOINT", "not a url")])));
        assert!(matches!(result, Err(ArangoError::Config(_))));

        let ftp = ConnectionConfig::default().with_endpoint("ftp://host");
        assert!(ftp.validate().is_err());
    }
}
