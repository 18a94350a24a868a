pub mod command;
pub mod descriptor;
pub mod handler;
pub mod options;

pub use command::GraphCommand;
pub use descriptor::GraphDescriptor;
pub use handler::{GraphHandler, URL_GRAPH};
pub use options::{Policy, RemoveOptions, UpdateOptions};

use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::common::document::{Document, DocumentId, DocumentRevision, Edge, FetchOptions};
use crate::common::error::Result;

/// Graph operations exposed by a graph handle.
///
/// Generic document-collection methods are deliberately absent; vertices and
/// edges are only reachable through their graph.
#[async_trait]
pub trait GraphOperations: Send + Sync {
    /// Create a graph and fill in its server-assigned id and revision
    async fn create_graph(&self, descriptor: &mut GraphDescriptor) -> Result<Map<String, Value>>;

    /// Drop a graph together with its collections
    async fn drop_graph(&self, name: &str) -> Result<()>;

    /// Server-side attributes of a graph
    async fn properties(&self, name: &str) -> Result<Map<String, Value>>;

    async fn save_vertex(&self, graph: &str, vertex: &mut Document) -> Result<DocumentId>;

    async fn get_vertex(&self, graph: &str, id: &str, options: &FetchOptions) -> Result<Document>;

    /// Replace a vertex; a revision on the record makes the call conditional
    async fn replace_vertex(
        &self,
        graph: &str,
        id: &str,
        vertex: &mut Document,
        options: &UpdateOptions,
    ) -> Result<()>;

    /// Patch a vertex with the record's attributes
    async fn update_vertex(
        &self,
        graph: &str,
        id: &str,
        vertex: &Document,
        options: &UpdateOptions,
    ) -> Result<()>;

    async fn remove_vertex(
        &self,
        graph: &str,
        id: &str,
        revision: Option<&DocumentRevision>,
        options: &RemoveOptions,
    ) -> Result<()>;

    /// Save an edge between `from` and `to`, optionally labelled
    async fn save_edge(
        &self,
        graph: &str,
        from: &str,
        to: &str,
        label: Option<&str>,
        edge: &mut Edge,
    ) -> Result<DocumentId>;

    async fn get_edge(&self, graph: &str, id: &str, options: &FetchOptions) -> Result<Edge>;

    async fn replace_edge(
        &self,
        graph: &str,
        id: &str,
        label: Option<&str>,
        edge: &mut Edge,
        options: &UpdateOptions,
    ) -> Result<()>;

    async fn update_edge(
        &self,
        graph: &str,
        id: &str,
        label: Option<&str>,
        edge: &Edge,
        options: &UpdateOptions,
    ) -> Result<()>;

    async fn remove_edge(
        &self,
        graph: &str,
        id: &str,
        revision: Option<&DocumentRevision>,
        options: &RemoveOptions,
    ) -> Result<()>;
}
