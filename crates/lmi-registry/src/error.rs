/// Errors produced by catalog construction and registry resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two catalog entries were authored under the same key.
    #[error("duplicate catalog key: {key}")]
    DuplicateKey { key: String },

    /// A catalog entry is missing its display name.
    #[error("catalog entry '{key}' has an empty display name")]
    EmptyDisplayName { key: String },

    /// Failed to parse an externally-supplied catalog document.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
