//! The static provider catalog: short keys mapped to raw provider metadata.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Raw metadata for one backend, as authored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human-friendly display name, e.g. `"OpenAI"`.
    pub name: String,

    /// Optional base API URL. When absent, the invocation capability uses its
    /// built-in default for this provider.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key. Absent for backends that
    /// need no credential (e.g. local inference servers).
    #[serde(default)]
    pub env_key: Option<String>,

    /// Whether the provider additionally requires the orchestrating host's
    /// own authentication layer.
    #[serde(default)]
    pub requires_host_auth: bool,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: None,
            env_key: None,
            requires_host_auth: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_env_key(mut self, env_key: impl Into<String>) -> Self {
        self.env_key = Some(env_key.into());
        self
    }
}

/// An ordered set of catalog entries keyed by short provider keys.
///
/// Iteration order is authoring order, and everything derived from the
/// catalog (registry contents, rendered config blocks) preserves it.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    entries: Vec<(String, CatalogEntry)>,
}

impl ProviderCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from explicit `(key, entry)` pairs, rejecting
    /// duplicate keys and entries with an empty display name.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, CatalogEntry)>,
    ) -> Result<Self, Error> {
        let mut catalog = Self::new();
        for (key, entry) in entries {
            catalog.insert(key, entry)?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of `[key, entry]` pairs, for hosts
    /// that ship their own provider list.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<(String, CatalogEntry)> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    fn insert(&mut self, key: String, entry: CatalogEntry) -> Result<(), Error> {
        if entry.name.is_empty() {
            return Err(Error::EmptyDisplayName { key });
        }
        if self.get(&key).is_some() {
            return Err(Error::DuplicateKey { key });
        }
        self.entries.push((key, entry));
        Ok(())
    }

    /// Look up an entry by its short key.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Iterate entries in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in catalog of bridge-routed backends.
    pub fn builtin() -> Self {
        let entries = [
            (
                "openai",
                CatalogEntry::new("OpenAI")
                    .with_base_url("https://api.openai.com/v1")
                    .with_env_key("OPENAI_API_KEY"),
            ),
            (
                "anthropic",
                CatalogEntry::new("Anthropic")
                    .with_base_url("https://api.anthropic.com/v1")
                    .with_env_key("ANTHROPIC_API_KEY"),
            ),
            (
                "deepseek",
                CatalogEntry::new("DeepSeek")
                    .with_base_url("https://api.deepseek.com/v1")
                    .with_env_key("DEEPSEEK_API_KEY"),
            ),
            (
                "baidu",
                CatalogEntry::new("Baidu ERNIE")
                    .with_base_url("https://qianfan.baidubce.com/v2")
                    .with_env_key("QIANFAN_API_KEY"),
            ),
            (
                "groq",
                CatalogEntry::new("Groq")
                    .with_base_url("https://api.groq.com/openai/v1")
                    .with_env_key("GROQ_API_KEY"),
            ),
            (
                "mistral",
                CatalogEntry::new("Mistral")
                    .with_base_url("https://api.mistral.ai/v1")
                    .with_env_key("MISTRAL_API_KEY"),
            ),
            (
                "together",
                CatalogEntry::new("Together AI")
                    .with_base_url("https://api.together.xyz/v1")
                    .with_env_key("TOGETHER_API_KEY"),
            ),
            (
                "xai",
                CatalogEntry::new("xAI")
                    .with_base_url("https://api.x.ai/v1")
                    .with_env_key("XAI_API_KEY"),
            ),
            // Local inference, no credential required.
            (
                "ollama",
                CatalogEntry::new("Ollama").with_base_url("http://localhost:11434/v1"),
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(key, entry)| (key.to_string(), entry))
                .collect(),
        }
    }
}
