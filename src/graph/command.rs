// Textual graph commands, as typed into the shell

use serde_json::{Map, Value};
use crate::common::document::{Document, DocumentRevision, Edge, FetchOptions};
use crate::common::error::{ArangoError, Result};
use crate::graph::descriptor::GraphDescriptor;
use crate::graph::options::{RemoveOptions, UpdateOptions, PARAM_REVISION};
use crate::graph::GraphOperations;

/// Document-collection operations a graph handle does not offer, with the
/// graph operations to use instead
const DOCUMENT_OPERATIONS: &[(&str, &str)] = &[
    ("add", "saveVertex or saveEdge"),
    ("save", "saveVertex or saveEdge"),
    ("get", "getVertex or getEdge"),
    ("getById", "getVertex or getEdge"),
    ("getAllIds", "getVertex or getEdge"),
    ("getByExample", "getVertex or getEdge"),
    ("update", "updateVertex or updateEdge"),
    ("updateById", "updateVertex or updateEdge"),
    ("replace", "replaceVertex or replaceEdge"),
    ("replaceById", "replaceVertex or replaceEdge"),
    ("delete", "removeVertex or removeEdge"),
    ("deleteById", "removeVertex or removeEdge"),
    ("remove", "removeVertex or removeEdge"),
    ("removeById", "removeVertex or removeEdge"),
];

/// One parsed graph operation
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCommand {
    CreateGraph(GraphDescriptor),
    DropGraph { graph: String },
    Properties { graph: String },
    SaveVertex { graph: String, vertex: Document },
    GetVertex { graph: String, id: String, options: FetchOptions },
    ReplaceVertex { graph: String, id: String, vertex: Document, options: UpdateOptions },
    UpdateVertex { graph: String, id: String, vertex: Document, options: UpdateOptions },
    RemoveVertex { graph: String, id: String, revision: Option<DocumentRevision>, options: RemoveOptions },
    SaveEdge { graph: String, from: String, to: String, label: Option<String>, edge: Edge },
    GetEdge { graph: String, id: String, options: FetchOptions },
    ReplaceEdge { graph: String, id: String, label: Option<String>, edge: Edge, options: UpdateOptions },
    UpdateEdge { graph: String, id: String, label: Option<String>, edge: Edge, options: UpdateOptions },
    RemoveEdge { graph: String, id: String, revision: Option<DocumentRevision>, options: RemoveOptions },
}

impl GraphCommand {
    /// Parse a line such as `saveVertex social {"_key": "alice"}`.
    ///
    /// Words come first, then up to two JSON values: the record and the
    /// options. Options may be a map, a policy string or a boolean.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = split_word(line);
        if name.is_empty() {
            return Err(ArangoError::bad_parameter("empty command"));
        }
        if let Some((operation, replacement)) = DOCUMENT_OPERATIONS.iter().find(|(op, _)| *op == name) {
            return Err(ArangoError::unsupported_operation(operation, replacement));
        }

        match name {
            "createGraph" => {
                let (words, tail) = take_words(rest, 3, name)?;
                expect_values(tail, 0, 0, name)?;
                Ok(GraphCommand::CreateGraph(GraphDescriptor::new(words[0], words[1], words[2])?))
            }
            "dropGraph" | "properties" => {
                let (words, tail) = take_words(rest, 1, name)?;
                expect_values(tail, 0, 0, name)?;
                let graph = words[0].to_string();
                Ok(if name == "dropGraph" {
                    GraphCommand::DropGraph { graph }
                } else {
                    GraphCommand::Properties { graph }
                })
            }
            "saveVertex" => {
                let (words, tail) = take_words(rest, 1, name)?;
                let values = expect_values(tail, 1, 1, name)?;
                Ok(GraphCommand::SaveVertex {
                    graph: words[0].to_string(),
                    vertex: Document::from_map(record(&values[0])?)?,
                })
            }
            "getVertex" | "getEdge" => {
                let (words, tail) = take_words(rest, 2, name)?;
                let values = expect_values(tail, 0, 1, name)?;
                let options = match values.first() {
                    Some(value) => fetch_options(value)?,
                    None => FetchOptions::default(),
                };
                let (graph, id) = (words[0].to_string(), words[1].to_string());
                Ok(if name == "getVertex" {
                    GraphCommand::GetVertex { graph, id, options }
                } else {
                    GraphCommand::GetEdge { graph, id, options }
                })
            }
            "replaceVertex" | "updateVertex" => {
                let (words, tail) = take_words(rest, 2, name)?;
                let values = expect_values(tail, 1, 2, name)?;
                let vertex = Document::from_map(record(&values[0])?)?;
                let options = update_options(values.get(1))?;
                let (graph, id) = (words[0].to_string(), words[1].to_string());
                Ok(if name == "replaceVertex" {
                    GraphCommand::ReplaceVertex { graph, id, vertex, options }
                } else {
                    GraphCommand::UpdateVertex { graph, id, vertex, options }
                })
            }
            "removeVertex" | "removeEdge" => {
                let (words, tail) = take_words(rest, 2, name)?;
                let values = expect_values(tail, 0, 1, name)?;
                let (revision, options) = match values.first() {
                    Some(value) => (revision_of(value)?, RemoveOptions::from_json(value)?),
                    None => (None, RemoveOptions::default()),
                };
                let (graph, id) = (words[0].to_string(), words[1].to_string());
                Ok(if name == "removeVertex" {
                    GraphCommand::RemoveVertex { graph, id, revision, options }
                } else {
                    GraphCommand::RemoveEdge { graph, id, revision, options }
                })
            }
            "saveEdge" => {
                let (words, tail) = take_words(rest, 3, name)?;
                let (label, tail) = optional_label(tail);
                let values = expect_values(tail, 0, 1, name)?;
                let edge = match values.first() {
                    Some(value) => Edge::from_map(record(value)?)?,
                    None => Edge::new(),
                };
                Ok(GraphCommand::SaveEdge {
                    graph: words[0].to_string(),
                    from: words[1].to_string(),
                    to: words[2].to_string(),
                    label,
                    edge,
                })
            }
            "replaceEdge" | "updateEdge" => {
                let (words, tail) = take_words(rest, 2, name)?;
                let (label, tail) = optional_label(tail);
                let values = expect_values(tail, 1, 2, name)?;
                let edge = Edge::from_map(record(&values[0])?)?;
                let options = update_options(values.get(1))?;
                let (graph, id) = (words[0].to_string(), words[1].to_string());
                Ok(if name == "replaceEdge" {
                    GraphCommand::ReplaceEdge { graph, id, label, edge, options }
                } else {
                    GraphCommand::UpdateEdge { graph, id, label, edge, options }
                })
            }
            other => Err(ArangoError::bad_parameter(format!("unknown command '{}'", other))),
        }
    }

    /// Run the command and render its outcome as JSON
    pub async fn execute(self, graphs: &dyn GraphOperations) -> Result<Value> {
        match self {
            GraphCommand::CreateGraph(mut descriptor) => {
                Ok(Value::Object(graphs.create_graph(&mut descriptor).await?))
            }
            GraphCommand::DropGraph { graph } => {
                graphs.drop_graph(&graph).await?;
                Ok(Value::Bool(true))
            }
            GraphCommand::Properties { graph } => Ok(Value::Object(graphs.properties(&graph).await?)),
            GraphCommand::SaveVertex { graph, mut vertex } => {
                graphs.save_vertex(&graph, &mut vertex).await?;
                Ok(vertex.to_json())
            }
            GraphCommand::GetVertex { graph, id, options } => {
                Ok(graphs.get_vertex(&graph, &id, &options).await?.to_json())
            }
            GraphCommand::ReplaceVertex { graph, id, mut vertex, options } => {
                graphs.replace_vertex(&graph, &id, &mut vertex, &options).await?;
                Ok(vertex.to_json())
            }
            GraphCommand::UpdateVertex { graph, id, vertex, options } => {
                graphs.update_vertex(&graph, &id, &vertex, &options).await?;
                Ok(Value::Bool(true))
            }
            GraphCommand::RemoveVertex { graph, id, revision, options } => {
                graphs.remove_vertex(&graph, &id, revision.as_ref(), &options).await?;
                Ok(Value::Bool(true))
            }
            GraphCommand::SaveEdge { graph, from, to, label, mut edge } => {
                graphs.save_edge(&graph, &from, &to, label.as_deref(), &mut edge).await?;
                Ok(edge.to_json())
            }
            GraphCommand::GetEdge { graph, id, options } => {
                Ok(graphs.get_edge(&graph, &id, &options).await?.to_json())
            }
            GraphCommand::ReplaceEdge { graph, id, label, mut edge, options } => {
                graphs.replace_edge(&graph, &id, label.as_deref(), &mut edge, &options).await?;
                Ok(edge.to_json())
            }
            GraphCommand::UpdateEdge { graph, id, label, edge, options } => {
                graphs.update_edge(&graph, &id, label.as_deref(), &edge, &options).await?;
                Ok(Value::Bool(true))
            }
            GraphCommand::RemoveEdge { graph, id, revision, options } => {
                graphs.remove_edge(&graph, &id, revision.as_ref(), &options).await?;
                Ok(Value::Bool(true))
            }
        }
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn take_words<'a>(input: &'a str, count: usize, command: &str) -> Result<(Vec<&'a str>, &'a str)> {
    let mut words = Vec::with_capacity(count);
    let mut rest = input;
    for _ in 0..count {
        let (word, tail) = split_word(rest);
        if word.is_empty() || word.starts_with('{') {
            return Err(ArangoError::bad_parameter(format!(
                "{} expects {} argument(s) before any JSON",
                command, count
            )));
        }
        words.push(word);
        rest = tail;
    }
    Ok((words, rest))
}

fn optional_label(input: &str) -> (Option<String>, &str) {
    let (word, tail) = split_word(input);
    if word.is_empty() || word.starts_with('{') {
        (None, input)
    } else {
        (Some(word.to_string()), tail)
    }
}

fn expect_values(input: &str, min: usize, max: usize, command: &str) -> Result<Vec<Value>> {
    let values = serde_json::Deserializer::from_str(input)
        .into_iter::<Value>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ArangoError::bad_parameter(format!("invalid JSON for {}: {}", command, e)))?;

    if values.len() < min || values.len() > max {
        return Err(ArangoError::bad_parameter(format!(
            "{} expects between {} and {} JSON value(s), got {}",
            command, min, max, values.len()
        )));
    }
    Ok(values)
}

fn record(value: &Value) -> Result<Map<String, Value>> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| ArangoError::bad_parameter("record must be a JSON object"))
}

fn update_options(value: Option<&Value>) -> Result<UpdateOptions> {
    value.map_or(Ok(UpdateOptions::default()), UpdateOptions::from_json)
}

fn revision_of(value: &Value) -> Result<Option<DocumentRevision>> {
    match value.get(PARAM_REVISION) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(rev)) => Ok(Some(DocumentRevision::new(rev.as_str()))),
        Some(other) => Err(ArangoError::invalid_option(format!("rev must be a string, got {}", other))),
    }
}

fn fetch_options(value: &Value) -> Result<FetchOptions> {
    let flag = |name: &str| match value.get(name) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ArangoError::invalid_option(format!("{} must be a boolean, got {}", name, other))),
    };

    let hidden_attributes = match value.get("hiddenAttributes") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ArangoError::invalid_option("hiddenAttributes must be a list of strings")
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(ArangoError::invalid_option("hiddenAttributes must be a list of strings")),
    };

    Ok(FetchOptions {
        include_internals: flag("includeInternals")?,
        ignore_hidden_attributes: flag("ignoreHiddenAttributes")?,
        hidden_attributes,
    })
}
