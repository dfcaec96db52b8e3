//! The core registry: derives canonical configs and resolves namespaced ids.

use crate::catalog::ProviderCatalog;
use crate::config::{NAMESPACE_PREFIX, ProviderConfig, WIRE_PROTOCOL};
use crate::hints::lookup_hint;

/// Check whether a provider id is bridge-namespaced.
///
/// Hosts use this to route: `lmi_`-prefixed ids go through the bridge
/// client, everything else is dispatched natively.
pub fn is_namespaced(id: &str) -> bool {
    id.starts_with(NAMESPACE_PREFIX)
}

/// The derived provider set, one [`ProviderConfig`] per catalog entry, in
/// catalog order.
///
/// Derivation is a pure function of the catalog (plus the static hint
/// table): no entry is dropped or merged, and deriving twice from the same
/// catalog yields identical registries.
///
/// # Example
///
/// ```
/// use lmi_registry::{ProviderCatalog, Registry, is_namespaced};
///
/// let registry = Registry::derive(&ProviderCatalog::builtin());
///
/// assert!(is_namespaced("lmi_openai"));
/// let config = registry.resolve("lmi_openai").unwrap();
/// assert_eq!(config.display_name, "OpenAI");
/// assert!(registry.resolve("openai").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    configs: Vec<ProviderConfig>,
}

impl Registry {
    /// Derive a registry from a catalog. Total: every entry produces exactly
    /// one config.
    pub fn derive(catalog: &ProviderCatalog) -> Self {
        let configs = catalog
            .iter()
            .map(|(key, entry)| ProviderConfig {
                id: format!("{NAMESPACE_PREFIX}{key}"),
                display_name: entry.name.clone(),
                base_url: entry.base_url.clone(),
                credential_env_var: entry.env_key.clone(),
                credential_hint: lookup_hint(key, &entry.name),
                wire_protocol: WIRE_PROTOCOL.to_string(),
                requires_host_auth: entry.requires_host_auth,
            })
            .collect();
        Self { configs }
    }

    /// Look up a config by its full namespaced id.
    pub fn get(&self, id: &str) -> Option<&ProviderConfig> {
        self.configs.iter().find(|config| config.id == id)
    }

    /// Resolve a provider id back to its config.
    ///
    /// Returns `None` (not an error) for ids without the namespace prefix or
    /// whose suffix is not in the catalog; callers use this to tell bridge
    /// providers from natively-handled ones.
    pub fn resolve(&self, id: &str) -> Option<&ProviderConfig> {
        if !is_namespaced(id) {
            return None;
        }
        self.get(id)
    }

    /// Iterate configs in catalog order.
    pub fn configs(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.configs.iter()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
