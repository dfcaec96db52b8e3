//! Credential-acquisition hints, keyed by catalog key.

use std::collections::HashMap;
use std::sync::LazyLock;

/// API-key signup pages for the providers we know about. Immutable, built
/// once; keys absent here fall through to the generic hint.
static HINT_URLS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("openai", "https://platform.openai.com/api-keys"),
        ("anthropic", "https://console.anthropic.com/settings/keys"),
        ("deepseek", "https://platform.deepseek.com/api_keys"),
        ("baidu", "https://console.bce.baidu.com/iam/#/iam/apikey/list"),
        ("groq", "https://console.groq.com/keys"),
        ("mistral", "https://console.mistral.ai/api-keys"),
        ("together", "https://api.together.xyz/settings/api-keys"),
        ("xai", "https://console.x.ai"),
    ])
});

/// Instructions for acquiring a credential for the given catalog key.
///
/// Total: keys without a cataloged URL get a generic hint built from the
/// display name, so the result is never empty.
pub fn lookup_hint(key: &str, display_name: &str) -> String {
    match HINT_URLS.get(key) {
        Some(url) => format!("Get your API key from {url}"),
        None => format!("Get your API key from the {display_name} website"),
    }
}
