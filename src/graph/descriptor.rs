use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::common::document::{DocumentRevision, ATTR_ID, ATTR_KEY, ATTR_REV};
use crate::common::error::{ArangoError, Result};
use crate::arango_ensure;

/// A named pair of vertex and edge collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    #[serde(rename = "_key")]
    key: String,
    vertices: String,
    edges: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    revision: Option<DocumentRevision>,
}

impl GraphDescriptor {
    pub fn new(key: impl Into<String>, vertices: impl Into<String>, edges: impl Into<String>) -> Result<Self> {
        let descriptor = GraphDescriptor {
            key: key.into(),
            vertices: vertices.into(),
            edges: edges.into(),
            id: None,
            revision: None,
        };
        // name rules are the server's business
        arango_ensure!(!descriptor.key.is_empty(), "graph name cannot be empty");
        arango_ensure!(!descriptor.vertices.is_empty(), "vertex collection name cannot be empty");
        arango_ensure!(!descriptor.edges.is_empty(), "edge collection name cannot be empty");
        Ok(descriptor)
    }

    /// Build a descriptor from a server `graph` object
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ArangoError::protocol_violation(format!("malformed graph description: {}", e)))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn vertices(&self) -> &str {
        &self.vertices
    }

    pub fn edges(&self) -> &str {
        &self.edges
    }

    /// Server-assigned id, known after creation
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn revision(&self) -> Option<&DocumentRevision> {
        self.revision.as_ref()
    }

    /// Query parameters of the creation request
    pub fn creation_params(&self) -> Vec<(String, String)> {
        vec![
            ("key".to_string(), self.key.clone()),
            ("vertices".to_string(), self.vertices.clone()),
            ("edges".to_string(), self.edges.clone()),
        ]
    }

    /// Take over `_id` and `_rev` from the server answer
    pub(crate) fn apply_server_attributes(&mut self, attributes: &Map<String, Value>) -> Result<()> {
        if let Some(key) = attributes.get(ATTR_KEY).and_then(Value::as_str) {
            if key != self.key {
                return Err(ArangoError::protocol_violation(format!(
                    "server created graph '{}' when '{}' was requested",
                    key, self.key
                )));
            }
        }

        let id = attributes
            .get(ATTR_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| ArangoError::protocol_violation("graph response carries no _id"))?;
        self.id = Some(id.to_string());
        self.revision = attributes
            .get(ATTR_REV)
            .and_then(Value::as_str)
            .map(DocumentRevision::new);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_empty_names_are_rejected() {
        assert!(GraphDescriptor::new("social", "people", "knows").is_ok());
        assert!(matches!(GraphDescriptor::new("", "people", "knows"), Err(ArangoError::Validation(_))));
        assert!(GraphDescriptor::new("social", "", "knows").is_err());
        assert!(GraphDescriptor::new("social", "people", "").is_err());
        // left for the server to judge
        assert!(GraphDescriptor::new("social", "9people", "kn ows").is_ok());
    }

    #[test]
    fn test_apply_server_attributes() {
        let mut graph = GraphDescriptor::new("social", "people", "knows").unwrap();
        let answer = json!({"_id": "_graphs/social", "_rev": "1234", "_key": "social"});
        graph.apply_server_attributes(answer.as_object().unwrap()).unwrap();

        assert_eq!(graph.id(), Some("_graphs/social"));
        assert_eq!(graph.revision().unwrap().as_str(), "1234");
    }

    #[test]
    fn test_key_mismatch_is_protocol_violation() {
        let mut graph = GraphDescriptor::new("social", "people", "knows").unwrap();
        let answer = json!({"_id": "_graphs/other", "_key": "other"});
        assert!(matches!(
            graph.apply_server_attributes(answer.as_object().unwrap()),
            Err(ArangoError::ProtocolViolation(_))
        ));
        assert_eq!(graph.id(), None);
    }

    #[test]
    fn test_from_json() {
        let graph = GraphDescriptor::from_json(json!({
            "_id": "_graphs/g", "_rev": "1", "_key": "g", "vertices": "v", "edges": "e"
        })).unwrap();
        assert_eq!(graph.vertices(), "v");
        assert_eq!(graph.edges(), "e");
        assert!(GraphDescriptor::from_json(json!({"_key": "g"})).is_err());
    }
}
