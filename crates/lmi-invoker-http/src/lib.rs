//! OpenAI-compatible HTTP implementation of the provider-invocation
//! capability.
//!
//! Resolves each provider's base URL and credential env var through the
//! registry catalog and speaks the `/chat/completions` + `/models` surface
//! every cataloged backend exposes. Payloads are passed through as raw JSON;
//! interpreting them is the host's business.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

use lmi_bridge::{InvokeError, Message, ProviderInvoker};
use lmi_registry::{ProviderCatalog, ProviderConfig, Registry};

/// A [`ProviderInvoker`] backed by plain HTTP.
pub struct HttpInvoker {
    client: reqwest::Client,
    catalog: ProviderCatalog,
    registry: Registry,
}

impl HttpInvoker {
    /// Build an invoker over the given catalog.
    pub fn new(catalog: ProviderCatalog) -> Self {
        let registry = Registry::derive(&catalog);
        Self {
            client: reqwest::Client::new(),
            catalog,
            registry,
        }
    }

    /// Build an invoker over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(ProviderCatalog::builtin())
    }

    /// Resolve a provider argument to its config. Accepts both bare catalog
    /// keys (`"openai"`) and namespaced ids (`"lmi_openai"`), since hosts
    /// pass the selector through verbatim.
    fn config_for(&self, provider: &str) -> Result<&ProviderConfig, InvokeError> {
        self.registry
            .resolve(provider)
            .or_else(|| self.registry.get(&format!("lmi_{provider}")))
            .ok_or_else(|| InvokeError::from("provider not found"))
    }

    /// Base URL and optional bearer token for a provider.
    fn endpoint(&self, config: &ProviderConfig) -> Result<(String, Option<String>), InvokeError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| {
                InvokeError(format!("provider '{}' has no base URL configured", config.key()))
            })?;

        let token = match &config.credential_env_var {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                InvokeError(format!("environment variable {var} is not set"))
            })?),
            None => None,
        };

        Ok((base_url.trim_end_matches('/').to_string(), token))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, InvokeError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| InvokeError(err.to_string()))?;

        if !status.is_success() {
            return Err(InvokeError(format!("http {status}: {body}")));
        }

        serde_json::from_str(&body).map_err(|err| InvokeError(err.to_string()))
    }
}

#[async_trait]
impl ProviderInvoker for HttpInvoker {
    async fn chat_completion(
        &self,
        provider: &str,
        model: &str,
        messages: &[Message],
        options: &Map<String, Value>,
    ) -> Result<Value, InvokeError> {
        let config = self.config_for(provider)?;
        let (base_url, token) = self.endpoint(config)?;

        let mut body = json!({
            "model": model,
            "messages": messages,
        });
        for (key, value) in options {
            body[key] = value.clone();
        }

        debug!(provider = config.key(), %model, "sending chat completion");

        let mut request = self.client.post(format!("{base_url}/chat/completions")).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| InvokeError(err.to_string()))?;
        Self::read_json(response).await
    }

    async fn list_models(&self, provider: &str) -> Result<Value, InvokeError> {
        let config = self.config_for(provider)?;
        let (base_url, token) = self.endpoint(config)?;

        let mut request = self.client.get(format!("{base_url}/models"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| InvokeError(err.to_string()))?;
        Self::read_json(response).await
    }

    async fn list_providers(&self) -> Result<Value, InvokeError> {
        let keys: Vec<&str> = self.catalog.iter().map(|(key, _)| key).collect();
        Ok(json!(keys))
    }
}
