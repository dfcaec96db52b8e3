//! The bridge server: a single-threaded line-oriented request/response loop.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::Error;
use crate::invoker::ProviderInvoker;
use crate::protocol::{BridgeRequest, BridgeResponse};

/// Run the request/response loop until the input stream reaches EOF.
///
/// One line in, exactly one line out, in the same order: each request is
/// dispatched and its response written and flushed before the next line is
/// read, so response order trivially equals request order. Head-of-line
/// blocking on slow provider calls is accepted; the host issues calls
/// serially per conversation turn anyway.
///
/// Malformed JSON and unknown `type` values yield a `{"success":false}`
/// response (with the parser's detail in `stack`) and the loop continues.
/// Provider failures are recovered at the dispatch boundary the same way.
/// Only stream failures end the loop with an error; EOF ends it cleanly
/// after a final flush.
pub async fn serve<R, W>(
    invoker: Arc<dyn ProviderInvoker>,
    input: R,
    mut output: W,
) -> Result<(), Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await? {
        let response = match serde_json::from_str::<BridgeRequest>(&line) {
            Ok(request) => dispatch(invoker.as_ref(), request).await,
            Err(err) => {
                warn!(error = %err, "rejecting malformed request line");
                BridgeResponse::failure_with_stack("parse error", err.to_string())
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
    }

    debug!("input stream closed, bridge server exiting");
    output.flush().await?;
    Ok(())
}

/// Route one request to the invocation capability and wrap the outcome.
async fn dispatch(invoker: &dyn ProviderInvoker, request: BridgeRequest) -> BridgeResponse {
    let result = match request {
        BridgeRequest::ChatCompletion {
            provider,
            model,
            messages,
            options,
        } => {
            debug!(%provider, %model, "dispatching chat completion");
            invoker
                .chat_completion(&provider, &model, &messages, &options)
                .await
        }
        BridgeRequest::ListModels { provider } => {
            debug!(%provider, "dispatching model listing");
            invoker.list_models(&provider).await
        }
        BridgeRequest::ListProviders => invoker.list_providers().await,
    };

    match result {
        Ok(data) => BridgeResponse::ok(data),
        Err(err) => BridgeResponse::failure(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::InvokeError;
    use crate::protocol::Message;
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::time::Duration;

    /// Invoker stub: echoes call arguments back, fails for unknown
    /// providers, and sleeps per-request when the options ask it to.
    struct StubInvoker;

    #[async_trait]
    impl ProviderInvoker for StubInvoker {
        async fn chat_completion(
            &self,
            provider: &str,
            model: &str,
            messages: &[Message],
            options: &Map<String, Value>,
        ) -> Result<Value, InvokeError> {
            if provider == "unknown" {
                return Err(InvokeError::from("provider not found"));
            }
            if let Some(ms) = options.get("latency_ms").and_then(Value::as_u64) {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
            Ok(json!({
                "provider": provider,
                "model": model,
                "message_count": messages.len(),
            }))
        }

        async fn list_models(&self, provider: &str) -> Result<Value, InvokeError> {
            if provider == "unknown" {
                return Err(InvokeError::from("provider not found"));
            }
            Ok(json!([format!("{provider}-mini"), format!("{provider}-pro")]))
        }

        async fn list_providers(&self) -> Result<Value, InvokeError> {
            Ok(json!(["openai", "anthropic"]))
        }
    }

    /// Drive the server over in-memory pipes: write `lines` to its input,
    /// close it, and collect one parsed response per line written.
    async fn run_session(lines: &[&str]) -> Vec<BridgeResponse> {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let (client_read, mut client_write) = tokio::io::split(client_io);

        let server = tokio::spawn(serve(Arc::new(StubInvoker), server_read, server_write));

        for line in lines {
            client_write.write_all(line.as_bytes()).await.unwrap();
            client_write.write_all(b"\n").await.unwrap();
        }
        client_write.shutdown().await.unwrap();

        let mut responses = Vec::new();
        let mut reader = BufReader::new(client_read).lines();
        while let Some(line) = reader.next_line().await.unwrap() {
            responses.push(serde_json::from_str(&line).unwrap());
        }

        server.await.unwrap().unwrap();
        responses
    }

    #[tokio::test]
    async fn list_providers_passes_capability_payload_through() {
        let responses = run_session(&[r#"{"type":"list_providers"}"#]).await;
        assert_eq!(responses.len(), 1);
        assert!(responses[0].success);
        assert_eq!(responses[0].data, Some(json!(["openai", "anthropic"])));
    }

    #[tokio::test]
    async fn malformed_line_yields_one_failure_and_server_continues() {
        let responses = run_session(&[
            "this is not json",
            r#"{"type":"list_providers"}"#,
        ])
        .await;

        assert_eq!(responses.len(), 2);
        assert!(!responses[0].success);
        assert_eq!(responses[0].error.as_deref(), Some("parse error"));
        assert!(responses[0].stack.is_some());
        assert!(responses[1].success);
    }

    #[tokio::test]
    async fn unknown_request_type_is_treated_like_a_parse_error() {
        let responses = run_session(&[
            r#"{"type":"shutdown"}"#,
            r#"{"type":"list_models","provider":"openai"}"#,
        ])
        .await;

        assert_eq!(responses.len(), 2);
        assert!(!responses[0].success);
        assert_eq!(responses[0].error.as_deref(), Some("parse error"));
        assert!(responses[1].success);
        assert_eq!(responses[1].data, Some(json!(["openai-mini", "openai-pro"])));
    }

    #[tokio::test]
    async fn provider_failure_is_recovered_and_next_request_succeeds() {
        let responses = run_session(&[
            r#"{"type":"chat_completion","provider":"unknown","model":"x","messages":[]}"#,
            r#"{"type":"list_providers"}"#,
        ])
        .await;

        assert_eq!(responses.len(), 2);
        assert!(!responses[0].success);
        assert_eq!(responses[0].error.as_deref(), Some("provider not found"));
        assert!(responses[0].stack.is_none());
        assert!(responses[1].success);
    }

    #[tokio::test]
    async fn responses_come_back_in_request_order_despite_varied_latency() {
        // First request is the slowest; order must still hold because the
        // loop awaits each dispatch before reading the next line.
        let lines: Vec<String> = [40u64, 5, 20, 0]
            .iter()
            .enumerate()
            .map(|(i, ms)| {
                format!(
                    r#"{{"type":"chat_completion","provider":"openai","model":"m{i}","messages":[],"options":{{"latency_ms":{ms}}}}}"#
                )
            })
            .collect();
        let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let responses = run_session(&line_refs).await;
        assert_eq!(responses.len(), 4);
        for (i, response) in responses.iter().enumerate() {
            assert!(response.success);
            let data = response.data.as_ref().unwrap();
            assert_eq!(data["model"], format!("m{i}"));
        }
    }

    #[tokio::test]
    async fn empty_line_counts_as_a_malformed_request() {
        let responses = run_session(&["", r#"{"type":"list_providers"}"#]).await;
        assert_eq!(responses.len(), 2);
        assert!(!responses[0].success);
        assert!(responses[1].success);
    }

    #[tokio::test]
    async fn eof_with_no_requests_exits_cleanly() {
        let responses = run_session(&[]).await;
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn chat_completion_forwards_all_arguments() {
        let responses = run_session(&[
            r#"{"type":"chat_completion","provider":"openai","model":"gpt-4o","messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#,
        ])
        .await;

        let data = responses[0].data.as_ref().unwrap();
        assert_eq!(data["provider"], "openai");
        assert_eq!(data["model"], "gpt-4o");
        assert_eq!(data["message_count"], 2);
    }
}
