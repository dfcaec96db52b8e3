/// Errors that can terminate a bridge endpoint (server loop or client).
///
/// Recovered conditions (malformed requests, provider failures) never show
/// up here; those travel as `{"success":false}` responses on the wire.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("process error: {0}")]
    Process(String),

    /// The peer went away: the subprocess exited or its pipes were dropped
    /// before a matching response arrived. The caller must treat the most
    /// recently sent request as failed.
    #[error("bridge connection closed")]
    Closed,
}
