//! Shared request/response envelopes exchanged between a host and the inventory service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named arguments as decoded by the host: string keys, values are strings, booleans or null.
pub type Arguments = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Correlation id echoed back on the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
}

impl MethodCall {
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: None,
            method: method.into(),
            arguments: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MethodOutcome {
    Success { value: Value },
    Error(ErrorResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub result: MethodOutcome,
}

impl MethodReply {
    #[must_use]
    pub fn success(id: Option<u64>, value: Value) -> Self {
        Self {
            id,
            result: MethodOutcome::Success { value },
        }
    }

    #[must_use]
    pub fn error(id: Option<u64>, error: ErrorResponse) -> Self {
        Self {
            id,
            result: MethodOutcome::Error(error),
        }
    }

    /// Returns the success value, if any.
    pub fn value(&self) -> Option<&Value> {
        match &self.result {
            MethodOutcome::Success { value } => Some(value),
            MethodOutcome::Error(_) => None,
        }
    }

    /// Returns the failure payload, if any.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match &self.result {
            MethodOutcome::Success { .. } => None,
            MethodOutcome::Error(error) => Some(error),
        }
    }
}
