// Option resolution for replace, update and remove requests

use std::fmt;
use std::str::FromStr;
use serde_json::Value;
use crate::client::config::ConnectionConfig;
use crate::common::document::DocumentRevision;
use crate::common::error::{ArangoError, Result};

pub const PARAM_POLICY: &str = "policy";
pub const PARAM_WAIT_FOR_SYNC: &str = "waitForSync";
pub const PARAM_KEEP_NULL: &str = "keepNull";
pub const PARAM_REVISION: &str = "rev";

/// Conflict resolution mode for concurrent modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Fail when the stored revision differs
    Error,
    /// Last write wins
    Last,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Error => "error",
            Policy::Last => "last",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ArangoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "error" => Ok(Policy::Error),
            "last" => Ok(Policy::Last),
            other => Err(ArangoError::invalid_option(format!(
                "invalid policy '{}', expected 'error' or 'last'",
                other
            ))),
        }
    }
}

/// Options for replace and update operations
///
/// Unset fields fall back to the connection defaults (`waitForSync`) or to
/// the server default (`policy`). `keep_null` defaults to `true` and is only
/// sent on partial updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub policy: Option<Policy>,
    pub wait_for_sync: Option<bool>,
    pub keep_null: Option<bool>,
}

impl UpdateOptions {
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = Some(wait_for_sync);
        self
    }

    pub fn with_keep_null(mut self, keep_null: bool) -> Self {
        self.keep_null = Some(keep_null);
        self
    }

    /// Accept the old plain policy argument
    pub fn from_legacy(policy: &str) -> Result<Self> {
        Ok(UpdateOptions {
            policy: Some(policy.parse()?),
            ..UpdateOptions::default()
        })
    }

    /// Parse options given as JSON: `null`, a policy string, a boolean
    /// (`true` = last, `false` = error) or an object. Unknown object keys are
    /// ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(UpdateOptions {
                policy: policy_from_json(map.get(PARAM_POLICY))?,
                wait_for_sync: bool_from_json(map.get(PARAM_WAIT_FOR_SYNC), PARAM_WAIT_FOR_SYNC)?,
                keep_null: bool_from_json(map.get(PARAM_KEEP_NULL), PARAM_KEEP_NULL)?,
            }),
            other => Ok(UpdateOptions {
                policy: policy_from_json(Some(other))?,
                ..UpdateOptions::default()
            }),
        }
    }

    /// Query parameters for a full replacement
    pub fn replace_params(&self, defaults: &ConnectionConfig, revision: Option<&DocumentRevision>) -> Vec<(String, String)> {
        let mut params = base_params(self.policy, self.wait_for_sync, defaults);
        push_revision(&mut params, revision);
        params
    }

    /// Query parameters for a partial update
    pub fn update_params(&self, defaults: &ConnectionConfig, revision: Option<&DocumentRevision>) -> Vec<(String, String)> {
        let mut params = base_params(self.policy, self.wait_for_sync, defaults);
        params.push((PARAM_KEEP_NULL.to_string(), self.keep_null.unwrap_or(true).to_string()));
        push_revision(&mut params, revision);
        params
    }
}

/// Options for remove operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    pub policy: Option<Policy>,
    pub wait_for_sync: Option<bool>,
}

impl RemoveOptions {
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = Some(wait_for_sync);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let options = UpdateOptions::from_json(value)?;
        Ok(RemoveOptions {
            policy: options.policy,
            wait_for_sync: options.wait_for_sync,
        })
    }

    pub fn params(&self, defaults: &ConnectionConfig, revision: Option<&DocumentRevision>) -> Vec<(String, String)> {
        let mut params = base_params(self.policy, self.wait_for_sync, defaults);
        push_revision(&mut params, revision);
        params
    }
}

fn base_params(policy: Option<Policy>, wait_for_sync: Option<bool>, defaults: &ConnectionConfig) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(4);
    if let Some(policy) = policy {
        params.push((PARAM_POLICY.to_string(), policy.to_string()));
    }
    params.push((
        PARAM_WAIT_FOR_SYNC.to_string(),
        wait_for_sync.unwrap_or(defaults.wait_for_sync).to_string(),
    ));
    params
}

fn push_revision(params: &mut Vec<(String, String)>, revision: Option<&DocumentRevision>) {
    if let Some(revision) = revision.filter(|r| !r.as_str().is_empty()) {
        params.push((PARAM_REVISION.to_string(), revision.to_string()));
    }
}

fn policy_from_json(value: Option<&Value>) -> Result<Option<Policy>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some(Policy::Last)),
        Some(Value::Bool(false)) => Ok(Some(Policy::Error)),
        Some(Value::String(s)) => s.parse().map(Some),
        Some(other) => Err(ArangoError::invalid_option(format!("invalid policy {}", other))),
    }
}

fn bool_from_json(value: Option<&Value>, name: &str) -> Result<Option<bool>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(ArangoError::invalid_option(format!(
            "{} must be a boolean, got {}",
            name, other
        ))),
    }
}
