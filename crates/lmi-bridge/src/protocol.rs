//! Bridge wire protocol types (newline-delimited JSON).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// `"system"`, `"user"`, `"assistant"` or `"tool"`.
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A request line, discriminated by its `type` field.
///
/// Any `type` value outside this union fails deserialization, which the
/// server reports the same way as malformed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeRequest {
    /// Invoke a model.
    ChatCompletion {
        provider: String,
        model: String,
        #[serde(default)]
        messages: Vec<Message>,
        #[serde(default)]
        options: Map<String, Value>,
    },
    /// List the models one provider offers.
    ListModels { provider: String },
    /// List every provider the invocation capability knows about.
    ListProviders,
}

/// A response line. Exactly one per request, paired by stream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub success: bool,

    /// Payload for successful requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Failure message for unsuccessful requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Diagnostic detail for server-level (non-provider) failures, e.g. the
    /// parser's account of a malformed line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl BridgeResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            stack: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            stack: None,
        }
    }

    pub fn failure_with_stack(error: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            stack: Some(stack.into()),
        }
    }
}
