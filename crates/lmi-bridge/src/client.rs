//! Host-side bridge client: spawns the server subprocess and exchanges one
//! response line per request line.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Error;
use crate::protocol::{BridgeRequest, BridgeResponse};

/// A handle to a running bridge server subprocess.
///
/// Requests are paired with responses by stream order, so `send` holds both
/// pipe locks for the full round trip; concurrent callers are serialized.
pub struct BridgeClient {
    child: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    stdout: Mutex<Option<BufReader<ChildStdout>>>,
}

impl BridgeClient {
    /// Spawn the bridge server process with piped stdin/stdout. Stderr is
    /// inherited so server diagnostics reach the host's stderr directly.
    pub async fn spawn(command: &str, args: &[&str]) -> Result<Self, Error> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Process("failed to capture bridge stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Process("failed to capture bridge stdout".to_string()))?;

        debug!(%command, "bridge server spawned");

        Ok(Self {
            child: Mutex::new(Some(child)),
            stdin: Mutex::new(Some(stdin)),
            stdout: Mutex::new(Some(BufReader::new(stdout))),
        })
    }

    /// Send one request and read its response line.
    ///
    /// Returns [`Error::Closed`] when the process exits before answering;
    /// the caller must treat the request as failed.
    pub async fn send(&self, request: &BridgeRequest) -> Result<BridgeResponse, Error> {
        let mut stdin_guard = self.stdin.lock().await;
        let stdin = stdin_guard.as_mut().ok_or(Error::Closed)?;
        let mut stdout_guard = self.stdout.lock().await;
        let stdout = stdout_guard.as_mut().ok_or(Error::Closed)?;

        let mut encoded = serde_json::to_vec(request)?;
        encoded.push(b'\n');
        stdin.write_all(&encoded).await?;
        stdin.flush().await?;

        let mut line = String::new();
        if stdout.read_line(&mut line).await? == 0 {
            return Err(Error::Closed);
        }

        Ok(serde_json::from_str(&line)?)
    }

    /// Drop the pipes and kill the server process.
    pub async fn close(&self) -> Result<(), Error> {
        *self.stdin.lock().await = None;
        *self.stdout.lock().await = None;

        if let Some(mut child) = self.child.lock().await.take() {
            child.kill().await?;
        }
        Ok(())
    }
}
