use serde_json::Value;
use crate::arango_ensure;
use crate::common::error::{ArangoError, Result};

/// Validate collection or graph name according to ArangoDB rules
pub fn validate_collection_name(name: &str) -> Result<()> {
    arango_ensure!(!name.is_empty(), "collection name cannot be empty");
    arango_ensure!(name.len() <= 256, "collection name too long (max 256 characters)");

    // Must start with letter or underscore
    let first_char = name.chars().next().unwrap_or('-');
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(ArangoError::bad_parameter(
            format!("collection name '{}' must start with a letter or underscore", name)
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(ArangoError::bad_parameter(
                format!("invalid character '{}' in collection name", c)
            ));
        }
    }

    Ok(())
}

/// Percent-encode a single path segment, `/` included
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Join path segments below a base path, encoding each segment
pub fn build_path(base: &str, segments: &[&str]) -> String {
    let mut path = base.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&url_encode(segment));
    }
    path
}

/// Append query parameters, form-encoded, in the given order
pub fn append_params(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

/// Take a named member out of a response envelope such as `{"vertex": {...}}`
pub fn unwrap_envelope(body: Value, member: &str) -> Result<Value> {
    match body {
        Value::Object(mut map) => map.remove(member).ok_or_else(|| {
            ArangoError::protocol_violation(format!("response has no '{}' member", member))
        }),
        other => Err(ArangoError::protocol_violation(format!(
            "expected a JSON object with '{}', got {}",
            member, other
        ))),
    }
}

pub fn pretty_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(ArangoError::from)
}
