//! # lmi-registry
//!
//! A provider registry for bridge-routed model backends.
//!
//! The registry turns a static [`ProviderCatalog`] (short provider keys with
//! raw metadata: display name, base URL, credential env var) into canonical
//! [`ProviderConfig`] records under the `lmi_` namespace, ready to be merged
//! into a host's configuration file and later resolved back when the host
//! routes a request through the bridge.
//!
//! This crate lets you:
//!
//! - **Derive canonical provider configs** from a catalog, with
//!   credential-acquisition hints filled in from a built-in table.
//! - **Emit a configuration document** with one `[model_providers.lmi_<key>]`
//!   block per provider, and merge it into an existing document without
//!   duplicating blocks.
//! - **Resolve namespaced identifiers** (`lmi_openai` → the `openai` catalog
//!   entry) so a host can tell bridge-routed providers from native ones.
//!
//! # Quick start
//!
//! ```
//! use lmi_registry::{ProviderCatalog, Registry};
//!
//! let registry = Registry::derive(&ProviderCatalog::builtin());
//!
//! let openai = registry.get("lmi_openai").unwrap();
//! assert_eq!(openai.wire_protocol, "lmi_bridge");
//!
//! let document = lmi_registry::emit::render(&registry);
//! assert!(document.contains("[model_providers.lmi_openai]"));
//! ```

pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod hints;
pub mod registry;

pub use catalog::{CatalogEntry, ProviderCatalog};
pub use config::{NAMESPACE_PREFIX, ProviderConfig, WIRE_PROTOCOL};
pub use emit::{MergeOutcome, merge, render};
pub use error::Error;
pub use hints::lookup_hint;
pub use registry::{Registry, is_namespaced};
