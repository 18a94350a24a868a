// Arango Graph Client Library
// Graph operations (graphs, vertices, edges) over the ArangoDB graph REST API

// Common modules
pub mod common {
    pub mod error;
    pub mod document;
    pub mod utils;
}

// Transport and configuration
pub mod client {
    pub mod config;
    pub mod connection;
    pub mod http;
    pub mod mock;
}

pub mod graph;

// Re-export commonly used types for convenience
pub use common::error::{ArangoError, ErrorCode, Result};
pub use common::document::{Document, DocumentId, DocumentKey, DocumentRevision, Edge, FetchOptions};

pub use client::config::ConnectionConfig;
pub use client::connection::{Connection, HttpMethod, HttpRequest, HttpResponse};
pub use client::http::HttpConnection;
pub use client::mock::MockConnection;

pub use graph::{
    GraphCommand,
    GraphDescriptor,
    GraphHandler,
    GraphOperations,
    Policy,
    RemoveOptions,
    UpdateOptions,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "arango-graph-client");
    }
}
