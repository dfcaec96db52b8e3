//! The canonical provider configuration record.

use serde::{Deserialize, Serialize};

/// Namespace prefix marking bridge-routed provider identifiers. The host
/// routes any id carrying this prefix through the bridge client; everything
/// else is handled natively, so it must never collide with a native id.
pub const NAMESPACE_PREFIX: &str = "lmi_";

/// Wire protocol tag for every provider produced by this registry.
pub const WIRE_PROTOCOL: &str = "lmi_bridge";

/// Canonical configuration for one bridge-routed provider.
///
/// Derived from a catalog entry by [`Registry::derive`](crate::Registry::derive)
/// and immutable afterwards. Re-deriving from the same catalog produces an
/// identical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Globally-unique external selector: `"lmi_"` + catalog key.
    pub id: String,

    /// Human-friendly display name.
    pub display_name: String,

    /// Base API URL; `None` means the invocation capability's default.
    pub base_url: Option<String>,

    /// Env var holding the credential; `None` means none required.
    pub credential_env_var: Option<String>,

    /// Human-readable credential-acquisition instructions. Never empty.
    pub credential_hint: String,

    /// Always [`WIRE_PROTOCOL`] for registry-derived configs.
    pub wire_protocol: String,

    /// Whether the host's own authentication layer is also required.
    pub requires_host_auth: bool,
}

impl ProviderConfig {
    /// The catalog key this config was derived from (the id without its
    /// namespace prefix).
    pub fn key(&self) -> &str {
        self.id.strip_prefix(NAMESPACE_PREFIX).unwrap_or(&self.id)
    }
}
