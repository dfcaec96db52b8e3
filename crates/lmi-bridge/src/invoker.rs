//! The provider-invocation capability seam.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::protocol::Message;

/// A recovered provider-invocation failure (bad credentials, unknown model,
/// network error, rate limiting). Reported to the caller as a
/// `{"success":false}` response; never fatal to the server.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct InvokeError(pub String);

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for InvokeError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for InvokeError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// The opaque capability the bridge dispatches into.
///
/// Implementations own whatever connection state they need; the server holds
/// one instance for its whole life and awaits each call to completion before
/// reading the next request.
#[async_trait]
pub trait ProviderInvoker: Send + Sync {
    /// Invoke a model and return the raw completion payload.
    async fn chat_completion(
        &self,
        provider: &str,
        model: &str,
        messages: &[Message],
        options: &Map<String, Value>,
    ) -> Result<Value, InvokeError>;

    /// List the models a provider offers.
    async fn list_models(&self, provider: &str) -> Result<Value, InvokeError>;

    /// List every provider this capability can reach.
    async fn list_providers(&self) -> Result<Value, InvokeError>;
}
