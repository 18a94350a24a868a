use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use crate::common::error::{ArangoError, Result};

pub const ATTR_ID: &str = "_id";
pub const ATTR_KEY: &str = "_key";
pub const ATTR_REV: &str = "_rev";
pub const ATTR_FROM: &str = "_from";
pub const ATTR_TO: &str = "_to";
pub const ATTR_LABEL: &str = "$label";

/// Document key type - must be a valid string identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Create a new document key
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        Self::validate_key(&key)?;
        Ok(DocumentKey(key))
    }

    /// Get the key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate document key format
    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(ArangoError::bad_parameter("document key cannot be empty"));
        }

        if key.len() > 254 {
            return Err(ArangoError::bad_parameter("document key too long (max 254 characters)"));
        }

        for c in key.chars() {
            if !c.is_ascii_alphanumeric() && !"_-:.@()+,=;$!*'%".contains(c) {
                return Err(ArangoError::bad_parameter(
                    format!("invalid character '{}' in document key", c)
                ));
            }
        }

        Ok(())
    }
}

impl FromStr for DocumentKey {
    type Err = ArangoError;

    fn from_str(s: &str) -> Result<Self> {
        DocumentKey::new(s)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocumentKey> for String {
    fn from(key: DocumentKey) -> String {
        key.0
    }
}

/// Document ID - combination of collection name and document key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId {
    pub collection: String,
    pub key: DocumentKey,
}

impl DocumentId {
    pub fn new(collection: impl Into<String>, key: DocumentKey) -> Self {
        DocumentId {
            collection: collection.into(),
            key,
        }
    }

    /// Parse document ID from string format "collection/key"
    pub fn parse(id: &str) -> Result<Self> {
        let (collection, key) = id.split_once('/').ok_or_else(|| {
            ArangoError::bad_parameter(format!("document ID '{}' must be in format 'collection/key'", id))
        })?;
        if collection.is_empty() || key.contains('/') {
            return Err(ArangoError::bad_parameter(
                format!("document ID '{}' must be in format 'collection/key'", id)
            ));
        }

        Ok(DocumentId {
            collection: collection.to_string(),
            key: DocumentKey::new(key)?,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

impl FromStr for DocumentId {
    type Err = ArangoError;

    fn from_str(s: &str) -> Result<Self> {
        DocumentId::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Server-assigned document revision, used for optimistic locking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct DocumentRevision(String);

impl DocumentRevision {
    pub fn new(rev: impl Into<String>) -> Self {
        DocumentRevision(rev.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for turning a server response into a typed record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Keep `_id`, `_key`, `_rev` (and `_from`, `_to`) in the attribute map
    pub include_internals: bool,
    /// Serialize hidden attributes anyway
    pub ignore_hidden_attributes: bool,
    /// Attribute names left out when the record is serialized
    pub hidden_attributes: Vec<String>,
}

impl FetchOptions {
    pub fn with_internals(mut self) -> Self {
        self.include_internals = true;
        self
    }

    pub fn with_hidden(mut self, attributes: &[&str]) -> Self {
        self.hidden_attributes = attributes.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// A vertex (or any plain document) held by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    id: Option<DocumentId>,
    key: Option<DocumentKey>,
    revision: Option<DocumentRevision>,
    data: Map<String, Value>,
    hidden_attributes: Vec<String>,
    ignore_hidden_attributes: bool,
}

impl Document {
    /// Create an empty document without identity
    pub fn new() -> Self {
        Document::default()
    }

    /// Create a document whose key is chosen by the caller
    pub fn with_key(key: DocumentKey) -> Self {
        Document {
            key: Some(key),
            ..Document::default()
        }
    }

    /// Create a document from caller data, lifting `_key` and `_rev` out of the map
    pub fn from_map(data: Map<String, Value>) -> Result<Self> {
        Self::from_map_with(data, &FetchOptions::default())
    }

    /// Build a document from a server answer, honouring the fetch options
    pub fn from_json(value: Value, options: &FetchOptions) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map_with(map, options),
            _ => Err(ArangoError::protocol_violation("document must be a JSON object")),
        }
    }

    fn from_map_with(mut data: Map<String, Value>, options: &FetchOptions) -> Result<Self> {
        let id = match system_str(&data, ATTR_ID)? {
            Some(id) => Some(DocumentId::parse(id)?),
            None => None,
        };
        let key = match system_str(&data, ATTR_KEY)? {
            Some(key) => Some(DocumentKey::new(key)?),
            None => id.as_ref().map(|id| id.key().clone()),
        };
        let revision = system_str(&data, ATTR_REV)?.map(DocumentRevision::new);

        if !options.include_internals {
            data.remove(ATTR_ID);
            data.remove(ATTR_KEY);
            data.remove(ATTR_REV);
        }

        Ok(Document {
            id,
            key,
            revision,
            data,
            hidden_attributes: options.hidden_attributes.clone(),
            ignore_hidden_attributes: options.ignore_hidden_attributes,
        })
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn key(&self) -> Option<&DocumentKey> {
        self.key.as_ref()
    }

    pub fn revision(&self) -> Option<&DocumentRevision> {
        self.revision.as_ref()
    }

    pub fn set_revision(&mut self, revision: Option<DocumentRevision>) {
        self.revision = revision;
    }

    pub fn collection(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.collection())
    }

    /// Record the server-assigned `_id`.
    ///
    /// The trailing segment must equal a key the caller already set; a
    /// document without a key adopts the one from the id.
    pub fn set_internal_id(&mut self, id: &str) -> Result<DocumentId> {
        let parsed = DocumentId::parse(id)
            .map_err(|e| ArangoError::protocol_violation(format!("server returned malformed id: {}", e)))?;

        if let Some(key) = &self.key {
            if key != parsed.key() {
                return Err(ArangoError::protocol_violation(format!(
                    "server returned id '{}' for document with key '{}'",
                    parsed, key
                )));
            }
        } else {
            self.key = Some(parsed.key().clone());
        }

        self.id = Some(parsed.clone());
        Ok(parsed)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.data.insert(field.into(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.data.remove(field)
    }

    pub fn fields(&self) -> Vec<&String> {
        self.data.keys().collect()
    }

    pub fn hidden_attributes(&self) -> &[String] {
        &self.hidden_attributes
    }

    pub fn set_hidden_attributes(&mut self, attributes: Vec<String>) {
        self.hidden_attributes = attributes;
    }

    /// Attribute map sent to the server: user data plus `_key` when known
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attributes: Map<String, Value> = self.data
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), ATTR_ID | ATTR_REV))
            .filter(|(name, _)| self.ignore_hidden_attributes || !self.hidden_attributes.contains(*name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        if let Some(key) = &self.key {
            attributes.insert(ATTR_KEY.to_string(), Value::String(key.to_string()));
        }
        attributes
    }

    /// Document data without identity fields
    pub fn data_only(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let mut value = self.attributes();
        if let Some(id) = &self.id {
            value.insert(ATTR_ID.to_string(), Value::String(id.to_string()));
        }
        if let Some(revision) = &self.revision {
            value.insert(ATTR_REV.to_string(), Value::String(revision.to_string()));
        }
        Value::Object(value)
    }
}

fn system_str<'a>(data: &'a Map<String, Value>, field: &str) -> Result<Option<&'a str>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ArangoError::bad_parameter(
            format!("{} must be a string, got {}", field, other)
        )),
    }
}

/// Edge document - a document connecting two vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edge {
    document: Document,
    from: Option<String>,
    to: Option<String>,
}

impl Edge {
    pub fn new() -> Self {
        Edge::default()
    }

    pub fn with_key(key: DocumentKey) -> Self {
        Edge {
            document: Document::with_key(key),
            ..Edge::default()
        }
    }

    /// Wrap caller data, lifting `_from`/`_to` out of the map
    pub fn from_map(data: Map<String, Value>) -> Result<Self> {
        Self::from_map_with(data, &FetchOptions::default())
    }

    pub fn from_json(value: Value, options: &FetchOptions) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map_with(map, options),
            _ => Err(ArangoError::protocol_violation("edge must be a JSON object")),
        }
    }

    fn from_map_with(mut data: Map<String, Value>, options: &FetchOptions) -> Result<Self> {
        let from = system_str(&data, ATTR_FROM)?.map(str::to_string);
        let to = system_str(&data, ATTR_TO)?.map(str::to_string);
        if !options.include_internals {
            data.remove(ATTR_FROM);
            data.remove(ATTR_TO);
        }

        Ok(Edge {
            document: Document::from_map_with(data, options)?,
            from,
            to,
        })
    }

    /// Source vertex reference, verbatim
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Target vertex reference, verbatim
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn set_from(&mut self, from: impl Into<String>) {
        self.from = Some(from.into());
    }

    pub fn set_to(&mut self, to: impl Into<String>) {
        self.to = Some(to.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.document.get(ATTR_LABEL).and_then(Value::as_str)
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.document.set(ATTR_LABEL, Value::String(label.into()));
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Attribute map sent to the server, endpoints included
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attributes = self.document.attributes();
        if let Some(from) = &self.from {
            attributes.insert(ATTR_FROM.to_string(), Value::String(from.clone()));
        }
        if let Some(to) = &self.to {
            attributes.insert(ATTR_TO.to_string(), Value::String(to.clone()));
        }
        attributes
    }

    pub fn to_json(&self) -> Value {
        let mut value = match self.document.to_json() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        value.extend(self.attributes());
        Value::Object(value)
    }
}
