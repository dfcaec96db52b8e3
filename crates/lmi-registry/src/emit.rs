//! Emits the provider configuration document and merges it into an existing
//! host config.

use std::fmt::Write as _;

use crate::config::ProviderConfig;
use crate::registry::Registry;

/// Substring marking an already-inserted bridge block set. [`merge`] checks
/// for this marker, not for structural equality: a document hand-edited to
/// remove every marker gets the blocks re-inserted on the next merge.
pub const MERGE_MARKER: &str = "[model_providers.lmi_";

/// Result of [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The rendered block set was appended; the new document is carried here.
    Inserted(String),
    /// The document already contains a bridge block; input left unchanged.
    AlreadyPresent,
}

/// Render one `[model_providers.lmi_<key>]` block per provider, in the
/// registry's (catalog) order. Deterministic: same registry, same bytes.
pub fn render(registry: &Registry) -> String {
    let mut document = String::new();
    for config in registry.configs() {
        if !document.is_empty() {
            document.push('\n');
        }
        render_block(&mut document, config);
    }
    document
}

fn render_block(out: &mut String, config: &ProviderConfig) {
    let _ = writeln!(out, "[model_providers.{}]", config.id);
    let _ = writeln!(out, "name = \"{}\"", escape(&config.display_name));
    if let Some(base_url) = &config.base_url {
        let _ = writeln!(out, "base_url = \"{}\"", escape(base_url));
    }
    if let Some(env_key) = &config.credential_env_var {
        let _ = writeln!(out, "env_key = \"{}\"", escape(env_key));
    }
    if !config.credential_hint.is_empty() {
        let _ = writeln!(
            out,
            "env_key_instructions = \"{}\"",
            escape(&config.credential_hint)
        );
    }
    let _ = writeln!(out, "wire_api = \"{}\"", escape(&config.wire_protocol));
    let _ = writeln!(out, "requires_openai_auth = {}", config.requires_host_auth);
}

/// Escape a string for a basic TOML double-quoted value.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Append the rendered block set to `existing`, unless the document already
/// carries a bridge block (substring check on [`MERGE_MARKER`]).
pub fn merge(existing: &str, registry: &Registry) -> MergeOutcome {
    if existing.contains(MERGE_MARKER) {
        return MergeOutcome::AlreadyPresent;
    }

    let rendered = render(registry);
    if rendered.is_empty() {
        return MergeOutcome::AlreadyPresent;
    }

    let mut document = existing.to_string();
    if !document.is_empty() && !document.ends_with('\n') {
        document.push('\n');
    }
    if !document.is_empty() {
        document.push('\n');
    }
    document.push_str(&rendered);
    MergeOutcome::Inserted(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProviderCatalog;

    fn builtin_registry() -> Registry {
        Registry::derive(&ProviderCatalog::builtin())
    }

    #[test]
    fn render_is_deterministic() {
        let registry = builtin_registry();
        assert_eq!(render(&registry), render(&registry));
    }

    #[test]
    fn render_emits_one_block_per_provider_in_catalog_order() {
        let registry = builtin_registry();
        let document = render(&registry);

        let mut last = 0;
        for config in registry.configs() {
            let header = format!("[model_providers.{}]", config.id);
            let position = document[last..]
                .find(&header)
                .unwrap_or_else(|| panic!("missing block for {}", config.id));
            last += position + header.len();
        }
        assert_eq!(
            document.matches("[model_providers.").count(),
            registry.len()
        );
    }

    #[test]
    fn render_omits_absent_fields() {
        let registry = builtin_registry();
        let document = render(&registry);

        // Ollama has no env key, so its block carries no env_key line.
        let ollama_block = document
            .split("[model_providers.")
            .find(|block| block.starts_with("lmi_ollama]"))
            .unwrap();
        assert!(!ollama_block.contains("env_key ="));
        assert!(ollama_block.contains("base_url = \"http://localhost:11434/v1\""));
    }

    #[test]
    fn rendered_document_is_valid_toml() {
        let document = render(&builtin_registry());
        let parsed: toml::Value = document.parse().unwrap();
        let providers = parsed
            .get("model_providers")
            .and_then(|v| v.as_table())
            .unwrap();
        assert_eq!(providers.len(), ProviderCatalog::builtin().len());

        let openai = providers.get("lmi_openai").and_then(|v| v.as_table()).unwrap();
        assert_eq!(
            openai.get("wire_api").and_then(|v| v.as_str()),
            Some("lmi_bridge")
        );
        assert_eq!(
            openai.get("requires_openai_auth").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[test]
    fn merge_appends_once_and_is_idempotent() {
        let registry = builtin_registry();
        let existing = "[model_providers.builtin]\nname = \"Native\"\n";

        let merged = match merge(existing, &registry) {
            MergeOutcome::Inserted(document) => document,
            MergeOutcome::AlreadyPresent => panic!("first merge should insert"),
        };
        assert!(merged.starts_with(existing));
        assert!(merged.contains("[model_providers.lmi_openai]"));

        // Second merge sees the marker and leaves the document alone.
        assert_eq!(merge(&merged, &registry), MergeOutcome::AlreadyPresent);
    }

    #[test]
    fn merge_into_empty_document() {
        let registry = builtin_registry();
        match merge("", &registry) {
            MergeOutcome::Inserted(document) => assert_eq!(document, render(&registry)),
            MergeOutcome::AlreadyPresent => panic!("empty document should insert"),
        }
    }

    #[test]
    fn merge_detects_any_bridge_block_not_just_full_equality() {
        let registry = builtin_registry();
        // A document with a single hand-kept bridge block still counts.
        let existing = "[model_providers.lmi_custom]\nname = \"Custom\"\n";
        assert_eq!(merge(existing, &registry), MergeOutcome::AlreadyPresent);
    }
}
