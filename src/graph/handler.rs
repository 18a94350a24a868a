// GraphHandler - graph operations over the graph REST API

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use crate::client::connection::{Connection, HttpMethod, HttpRequest};
use crate::common::document::{
    Document, DocumentId, DocumentRevision, Edge, FetchOptions, ATTR_FROM, ATTR_ID, ATTR_LABEL, ATTR_REV, ATTR_TO,
};
use crate::common::error::{ArangoError, Result};
use crate::common::utils::{build_path, unwrap_envelope};
use crate::graph::descriptor::GraphDescriptor;
use crate::graph::options::{RemoveOptions, UpdateOptions};
use crate::graph::GraphOperations;

pub const URL_GRAPH: &str = "/_api/graph";

const ENTRY_GRAPH: &str = "graph";
const ENTRY_VERTEX: &str = "vertex";
const ENTRY_EDGE: &str = "edge";

/// Client-side handle for graphs, their vertices and edges
#[derive(Clone)]
pub struct GraphHandler {
    connection: Arc<dyn Connection>,
}

impl GraphHandler {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        GraphHandler { connection }
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value> {
        debug!("{} {}", request.method.as_str(), request.url());
        let response = self.connection.send(request).await?;
        response.into_result()
    }

    async fn fetch(&self, graph: &str, entry: &str, id: &str) -> Result<Value> {
        let path = build_path(URL_GRAPH, &[graph, entry, id]);
        let body = self.execute(HttpRequest::new(HttpMethod::GET, path)).await?;
        unwrap_envelope(body, entry)
    }

    async fn save(&self, graph: &str, entry: &str, attributes: &Map<String, Value>) -> Result<Value> {
        let path = build_path(URL_GRAPH, &[graph, entry]);
        let request = HttpRequest::new(HttpMethod::POST, path).with_json_body(attributes)?;
        let body = self.execute(request).await?;
        unwrap_envelope(body, entry)
    }

    async fn replace(
        &self,
        graph: &str,
        entry: &str,
        id: &str,
        attributes: &Map<String, Value>,
        params: Vec<(String, String)>,
    ) -> Result<Value> {
        let path = build_path(URL_GRAPH, &[graph, entry, id]);
        let request = HttpRequest::new(HttpMethod::PUT, path)
            .with_params(params)
            .with_json_body(attributes)?;
        let body = self.execute(request).await?;
        unwrap_envelope(body, entry)
    }

    async fn update(
        &self,
        graph: &str,
        entry: &str,
        id: &str,
        attributes: &Map<String, Value>,
        params: Vec<(String, String)>,
    ) -> Result<()> {
        let path = build_path(URL_GRAPH, &[graph, entry, id]);
        let request = HttpRequest::new(HttpMethod::PATCH, path)
            .with_params(params)
            .with_json_body(attributes)?;
        self.execute(request).await?;
        Ok(())
    }

    async fn remove(&self, graph: &str, entry: &str, id: &str, params: Vec<(String, String)>) -> Result<()> {
        let path = build_path(URL_GRAPH, &[graph, entry, id]);
        self.execute(HttpRequest::new(HttpMethod::DELETE, path).with_params(params)).await?;
        Ok(())
    }
}

/// Copy the server-assigned identity into the caller's record
fn apply_identity(document: &mut Document, answer: &Value) -> Result<DocumentId> {
    let id = answer
        .get(ATTR_ID)
        .and_then(Value::as_str)
        .ok_or_else(|| ArangoError::protocol_violation("response carries no _id"))?;

    let id = document.set_internal_id(id).inspect_err(|e| {
        warn!("identity mismatch: {}", e);
    })?;
    if let Some(revision) = answer.get(ATTR_REV).and_then(Value::as_str) {
        document.set_revision(Some(DocumentRevision::new(revision)));
    }
    Ok(id)
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ArangoError::protocol_violation(format!(
            "expected {} to be an object, got {}",
            what, other
        ))),
    }
}

#[async_trait]
impl GraphOperations for GraphHandler {
    async fn create_graph(&self, descriptor: &mut GraphDescriptor) -> Result<Map<String, Value>> {
        let request = HttpRequest::new(HttpMethod::POST, URL_GRAPH).with_params(descriptor.creation_params());
        let body = self.execute(request).await?;
        let attributes = into_object(unwrap_envelope(body, ENTRY_GRAPH)?, ENTRY_GRAPH)?;
        descriptor.apply_server_attributes(&attributes)?;

        info!(
            "created graph '{}' (vertices: {}, edges: {})",
            descriptor.key(),
            descriptor.vertices(),
            descriptor.edges()
        );
        Ok(attributes)
    }

    async fn drop_graph(&self, name: &str) -> Result<()> {
        let path = build_path(URL_GRAPH, &[name]);
        self.execute(HttpRequest::new(HttpMethod::DELETE, path)).await?;
        info!("dropped graph '{}'", name);
        Ok(())
    }

    async fn properties(&self, name: &str) -> Result<Map<String, Value>> {
        let path = build_path(URL_GRAPH, &[name]);
        let body = self.execute(HttpRequest::new(HttpMethod::GET, path)).await?;
        into_object(unwrap_envelope(body, ENTRY_GRAPH)?, ENTRY_GRAPH)
    }

    async fn save_vertex(&self, graph: &str, vertex: &mut Document) -> Result<DocumentId> {
        let answer = self.save(graph, ENTRY_VERTEX, &vertex.attributes()).await?;
        apply_identity(vertex, &answer)
    }

    async fn get_vertex(&self, graph: &str, id: &str, options: &FetchOptions) -> Result<Document> {
        let answer = self.fetch(graph, ENTRY_VERTEX, id).await?;
        Document::from_json(answer, options)
    }

    async fn replace_vertex(
        &self,
        graph: &str,
        id: &str,
        vertex: &mut Document,
        options: &UpdateOptions,
    ) -> Result<()> {
        let params = options.replace_params(self.connection.config(), vertex.revision());
        let answer = self
            .replace(graph, ENTRY_VERTEX, id, &vertex.attributes(), params)
            .await?;
        apply_identity(vertex, &answer)?;
        Ok(())
    }

    async fn update_vertex(
        &self,
        graph: &str,
        id: &str,
        vertex: &Document,
        options: &UpdateOptions,
    ) -> Result<()> {
        let params = options.update_params(self.connection.config(), vertex.revision());
        self.update(graph, ENTRY_VERTEX, id, &vertex.attributes(), params).await
    }

    async fn remove_vertex(
        &self,
        graph: &str,
        id: &str,
        revision: Option<&DocumentRevision>,
        options: &RemoveOptions,
    ) -> Result<()> {
        let params = options.params(self.connection.config(), revision);
        self.remove(graph, ENTRY_VERTEX, id, params).await
    }

    async fn save_edge(
        &self,
        graph: &str,
        from: &str,
        to: &str,
        label: Option<&str>,
        edge: &mut Edge,
    ) -> Result<DocumentId> {
        edge.set_from(from);
        edge.set_to(to);
        if let Some(label) = label {
            edge.set_label(label);
        }

        let answer = self.save(graph, ENTRY_EDGE, &edge.attributes()).await?;
        apply_identity(edge.document_mut(), &answer)
    }

    async fn get_edge(&self, graph: &str, id: &str, options: &FetchOptions) -> Result<Edge> {
        let answer = self.fetch(graph, ENTRY_EDGE, id).await?;
        Edge::from_json(answer, options)
    }

    async fn replace_edge(
        &self,
        graph: &str,
        id: &str,
        label: Option<&str>,
        edge: &mut Edge,
        options: &UpdateOptions,
    ) -> Result<()> {
        if let Some(label) = label {
            edge.set_label(label);
        }

        let params = options.replace_params(self.connection.config(), edge.document().revision());
        let answer = self
            .replace(graph, ENTRY_EDGE, id, &edge.attributes(), params)
            .await?;
        apply_identity(edge.document_mut(), &answer)?;
        Ok(())
    }

    async fn update_edge(
        &self,
        graph: &str,
        id: &str,
        label: Option<&str>,
        edge: &Edge,
        options: &UpdateOptions,
    ) -> Result<()> {
        let mut attributes = edge.attributes();
        // endpoints of an existing edge are fixed
        attributes.remove(ATTR_FROM);
        attributes.remove(ATTR_TO);
        if let Some(label) = label {
            attributes.insert(ATTR_LABEL.to_string(), Value::String(label.to_string()));
        }

        let params = options.update_params(self.connection.config(), edge.document().revision());
        self.update(graph, ENTRY_EDGE, id, &attributes, params).await
    }

    async fn remove_edge(
        &self,
        graph: &str,
        id: &str,
        revision: Option<&DocumentRevision>,
        options: &RemoveOptions,
    ) -> Result<()> {
        let params = options.params(self.connection.config(), revision);
        self.remove(graph, ENTRY_EDGE, id, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::ConnectionConfig;
    use crate::client::mock::MockConnection;
    use crate::common::document::DocumentKey;
    use crate::graph::options::Policy;
    use serde_json::json;

    fn handler_with(mock: &Arc<MockConnection>) -> GraphHandler {
        GraphHandler::new(mock.clone())
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_graph_copies_identity() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(201, json!({
            "graph": {"_id": "_graphs/social", "_rev": "11", "_key": "social", "vertices": "people", "edges": "knows"},
            "error": false,
            "code": 201
        }));
        let handler = handler_with(&mock);

        let mut graph = GraphDescriptor::new("social", "people", "knows").unwrap();
        let attributes = handler.create_graph(&mut graph).await.unwrap();

        assert_eq!(graph.id(), Some("_graphs/social"));
        assert_eq!(graph.revision().unwrap().as_str(), "11");
        assert_eq!(attributes.get("vertices"), Some(&json!("people")));

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::POST);
        assert_eq!(request.path, "/_api/graph");
        assert_eq!(request.body, None);
        assert_eq!(request.url(), "/_api/graph?key=social&vertices=people&edges=knows");
    }

    #[tokio::test]
    async fn test_create_graph_duplicate_is_server_error() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(409, json!({"error": true, "code": 409, "errorNum": 1925, "errorMessage": "graph already exists"}));
        let handler = handler_with(&mock);

        let mut graph = GraphDescriptor::new("social", "people", "knows").unwrap();
        let err = handler.create_graph(&mut graph).await.unwrap_err();
        assert!(matches!(err, ArangoError::Server { status: 409, .. }));
        assert!(err.is_conflict());
        assert_eq!(graph.id(), None);
    }

    #[tokio::test]
    async fn test_create_graph_illegal_name_is_server_error() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(400, json!({"error": true, "code": 400, "errorNum": 1208, "errorMessage": "illegal name"}));
        let handler = handler_with(&mock);

        let mut graph = GraphDescriptor::new("social", "9people", "knows").unwrap();
        let err = handler.create_graph(&mut graph).await.unwrap_err();
        match err {
            ArangoError::Server { status, code, .. } => {
                assert_eq!(status, 400);
                assert_eq!(code, crate::common::error::ErrorCode::ArangoIllegalName);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(mock.request_count(), 1);
        assert_eq!(graph.id(), None);
    }

    #[tokio::test]
    async fn test_drop_graph_and_properties() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(200, json!({"result": true, "error": false}))
            .respond(200, json!({"graph": {"_key": "social", "vertices": "people", "edges": "knows"}}))
            .respond(404, json!({"error": true, "errorNum": 1924, "errorMessage": "graph not found"}));
        let handler = handler_with(&mock);

        handler.drop_graph("social").await.unwrap();
        let properties = handler.properties("social").await.unwrap();
        assert_eq!(properties.get("edges"), Some(&json!("knows")));
        assert!(handler.properties("missing").await.unwrap_err().is_not_found());

        let requests = mock.requests();
        assert_eq!(requests[0].method, HttpMethod::DELETE);
        assert_eq!(requests[0].path, "/_api/graph/social");
        assert_eq!(requests[1].method, HttpMethod::GET);
    }

    #[tokio::test]
    async fn test_save_vertex_sends_attributes_and_copies_back() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"vertex": {"_id": "people/alice", "_rev": "100", "_key": "alice"}}));
        let handler = handler_with(&mock);

        let mut vertex = Document::with_key(DocumentKey::new("alice").unwrap());
        vertex.set("age", json!(30));
        let id = handler.save_vertex("social", &mut vertex).await.unwrap();

        assert_eq!(id.to_string(), "people/alice");
        assert_eq!(vertex.revision().unwrap().as_str(), "100");
        let request = mock.last_request().unwrap();
        assert_eq!(request.path, "/_api/graph/social/vertex");
        assert_eq!(request.body, Some(json!({"_key": "alice", "age": 30})));
    }

    #[tokio::test]
    async fn test_save_vertex_identity_mismatch() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"vertex": {"_id": "people/bob", "_rev": "100", "_key": "bob"}}));
        let handler = handler_with(&mock);

        let mut vertex = Document::with_key(DocumentKey::new("alice").unwrap());
        let err = handler.save_vertex("social", &mut vertex).await.unwrap_err();
        assert!(matches!(err, ArangoError::ProtocolViolation(_)));
        assert_eq!(vertex.revision(), None);
        assert_eq!(vertex.id(), None);
    }

    #[tokio::test]
    async fn test_replace_vertex_identity_mismatch() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"vertex": {"_id": "people/alice", "_rev": "100", "_key": "alice"}}))
            .respond(202, json!({"vertex": {"_id": "people/bob", "_rev": "101", "_key": "bob"}}));
        let handler = handler_with(&mock);

        let mut vertex = Document::with_key(DocumentKey::new("alice").unwrap());
        handler.save_vertex("social", &mut vertex).await.unwrap();

        let err = handler
            .replace_vertex("social", "alice", &mut vertex, &UpdateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ArangoError::ProtocolViolation(_)));
        assert_eq!(vertex.revision().unwrap().as_str(), "100");
        assert_eq!(vertex.id().unwrap().to_string(), "people/alice");
    }

    #[tokio::test]
    async fn test_get_vertex_uses_fetch_options() {
        let mock = Arc::new(MockConnection::new());
        let answer = json!({"vertex": {"_id": "people/alice", "_rev": "100", "_key": "alice", "age": 30}});
        mock.respond(200, answer.clone()).respond(200, answer);
        let handler = handler_with(&mock);

        let plain = handler.get_vertex("social", "people/alice", &FetchOptions::default()).await.unwrap();
        assert_eq!(plain.data_only(), &object(json!({"age": 30})));
        assert_eq!(plain.revision().unwrap().as_str(), "100");

        let internal = handler
            .get_vertex("social", "people/alice", &FetchOptions::default().with_internals())
            .await
            .unwrap();
        assert_eq!(internal.get("_id"), Some(&json!("people/alice")));
        assert_eq!(mock.last_request().unwrap().path, "/_api/graph/social/vertex/people%2Falice");
    }

    #[tokio::test]
    async fn test_replace_vertex_attaches_revision_and_policy() {
        let mock = Arc::new(MockConnection::with_config(ConnectionConfig::default().with_wait_for_sync(true)));
        mock.respond(202, json!({"vertex": {"_id": "people/alice", "_rev": "101", "_key": "alice"}}));
        let handler = handler_with(&mock);

        let mut vertex = Document::with_key(DocumentKey::new("alice").unwrap());
        vertex.set_revision(Some(DocumentRevision::new("100")));
        vertex.set("age", json!(31));
        let options = UpdateOptions::default().with_policy(Policy::Error);
        handler.replace_vertex("social", "alice", &mut vertex, &options).await.unwrap();

        assert_eq!(vertex.revision().unwrap().as_str(), "101");
        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::PUT);
        assert_eq!(request.get_query_param("policy"), Some("error"));
        assert_eq!(request.get_query_param("waitForSync"), Some("true"));
        assert_eq!(request.get_query_param("rev"), Some("100"));
        assert_eq!(request.get_query_param("keepNull"), None);
    }

    #[tokio::test]
    async fn test_replace_vertex_stale_revision_conflicts() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(412, json!({
            "error": true, "code": 412, "errorNum": 1200, "errorMessage": "precondition failed", "_rev": "105"
        }));
        let handler = handler_with(&mock);

        let mut vertex = Document::with_key(DocumentKey::new("alice").unwrap());
        vertex.set_revision(Some(DocumentRevision::new("100")));
        let before = vertex.clone();
        let err = handler
            .replace_vertex("social", "alice", &mut vertex, &UpdateOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ArangoError::RevisionConflict(_)));
        assert_eq!(vertex, before);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_update_vertex_sends_keep_null() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"vertex": {"_id": "people/alice", "_rev": "102"}, "error": false}));
        let handler = handler_with(&mock);

        let mut patch = Document::new();
        patch.set("nickname", Value::Null);
        let options = UpdateOptions::default().with_keep_null(false);
        handler.update_vertex("social", "alice", &patch, &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::PATCH);
        assert_eq!(request.get_query_param("keepNull"), Some("false"));
        assert_eq!(request.get_query_param("rev"), None);
        assert_eq!(request.body, Some(json!({"nickname": null})));
    }

    #[tokio::test]
    async fn test_update_with_error_body_fails() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(200, json!({"error": true, "errorNum": 1905, "errorMessage": "could not change vertex"}));
        let handler = handler_with(&mock);

        let result = handler
            .update_vertex("social", "alice", &Document::new(), &UpdateOptions::default())
            .await;
        assert!(matches!(result, Err(ArangoError::Server { .. })));
    }

    #[tokio::test]
    async fn test_remove_vertex_params() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"deleted": true, "error": false}))
            .respond(404, json!({"error": true, "errorNum": 1202, "errorMessage": "document not found"}));
        let handler = handler_with(&mock);

        let revision = DocumentRevision::new("9");
        let options = RemoveOptions::default().with_policy(Policy::Last).with_wait_for_sync(true);
        handler.remove_vertex("social", "alice", Some(&revision), &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::DELETE);
        assert_eq!(request.url(), "/_api/graph/social/vertex/alice?policy=last&waitForSync=true&rev=9");

        let err = handler
            .remove_vertex("social", "alice", None, &RemoveOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_edge_forces_endpoints_and_label() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"edge": {"_id": "knows/e1", "_rev": "5", "_key": "e1"}}));
        let handler = handler_with(&mock);

        let mut edge = Edge::with_key(DocumentKey::new("e1").unwrap());
        edge.set_from("somewhere/else");
        edge.document_mut().set("since", json!(2020));
        handler
            .save_edge("social", "people/a", "people/b", Some("friend"), &mut edge)
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.path, "/_api/graph/social/edge");
        assert_eq!(request.body, Some(json!({
            "_key": "e1", "_from": "people/a", "_to": "people/b", "$label": "friend", "since": 2020
        })));
        assert_eq!(edge.document().id().unwrap().to_string(), "knows/e1");
    }

    #[tokio::test]
    async fn test_save_edge_identity_mismatch() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"edge": {"_id": "knows/e2", "_rev": "5", "_key": "e2"}}));
        let handler = handler_with(&mock);

        let mut edge = Edge::with_key(DocumentKey::new("e1").unwrap());
        let err = handler
            .save_edge("social", "people/a", "people/b", None, &mut edge)
            .await
            .unwrap_err();
        assert!(matches!(err, ArangoError::ProtocolViolation(_)));
        assert_eq!(edge.document().revision(), None);
        assert_eq!(edge.document().id(), None);
    }

    #[tokio::test]
    async fn test_replace_edge_identity_mismatch() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"edge": {"_id": "knows/e1", "_rev": "5", "_key": "e1"}}))
            .respond(202, json!({"edge": {"_id": "knows/e9", "_rev": "6", "_key": "e9"}}));
        let handler = handler_with(&mock);

        let mut edge = Edge::with_key(DocumentKey::new("e1").unwrap());
        handler
            .save_edge("social", "people/a", "people/b", None, &mut edge)
            .await
            .unwrap();

        let err = handler
            .replace_edge("social", "e1", None, &mut edge, &UpdateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ArangoError::ProtocolViolation(_)));
        assert_eq!(edge.document().revision().unwrap().as_str(), "5");
        assert_eq!(edge.document().id().unwrap().to_string(), "knows/e1");
    }

    #[tokio::test]
    async fn test_get_edge() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(200, json!({"edge": {
            "_id": "knows/e1", "_rev": "5", "_key": "e1", "_from": "people/a", "_to": "people/b", "$label": "friend"
        }}));
        let handler = handler_with(&mock);

        let edge = handler.get_edge("social", "knows/e1", &FetchOptions::default()).await.unwrap();
        assert_eq!(edge.from(), Some("people/a"));
        assert_eq!(edge.to(), Some("people/b"));
        assert_eq!(edge.label(), Some("friend"));
    }

    #[tokio::test]
    async fn test_replace_and_update_edge() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"edge": {"_id": "knows/e1", "_rev": "6", "_key": "e1"}}))
            .respond(202, json!({"error": false}));
        let handler = handler_with(&mock);

        let mut edge = Edge::with_key(DocumentKey::new("e1").unwrap());
        edge.set_from("people/a");
        edge.set_to("people/b");
        handler
            .replace_edge("social", "e1", Some("colleague"), &mut edge, &UpdateOptions::default())
            .await
            .unwrap();
        assert_eq!(edge.label(), Some("colleague"));
        assert_eq!(edge.document().revision().unwrap().as_str(), "6");

        handler
            .update_edge("social", "e1", Some("boss"), &edge, &UpdateOptions::from_legacy("last").unwrap())
            .await
            .unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::PATCH);
        assert_eq!(request.get_query_param("policy"), Some("last"));
        assert_eq!(request.get_query_param("rev"), Some("6"));
        let body = request.body.unwrap();
        assert_eq!(body["$label"], json!("boss"));
        assert!(body.get("_from").is_none());
        // the caller's record keeps its label
        assert_eq!(edge.label(), Some("colleague"));
    }

    #[tokio::test]
    async fn test_remove_edge() {
        let mock = Arc::new(MockConnection::new());
        mock.respond(202, json!({"deleted": true}));
        let handler = handler_with(&mock);

        handler
            .remove_edge("social", "knows/e1", None, &RemoveOptions::default())
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url(),
            "/_api/graph/social/edge/knows%2Fe1?waitForSync=false"
        );
    }
}
