//! Submission boundary.
//!
//! The scheduler only sees `Submit`: an opaque, potentially slow, potentially
//! failing call that takes a rendered manifest and returns the cluster
//! client's combined output verbatim.

use std::process::Stdio;

use tokio::{io::AsyncWriteExt, process::Command};

/// Transport for rendered manifests.
pub trait Submit: Send + Sync + 'static {
    /// Hand a manifest to the cluster client. Non-error return is the
    /// client's combined stdout/stderr; the caller does not interpret it
    /// beyond logging.
    fn submit(&self, manifest: &str) -> impl Future<Output = Result<String, SubmitError>> + Send;
}

/// Submits manifests by piping them to `kubectl create -f -`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KubectlSubmitter;

impl Submit for KubectlSubmitter {
    async fn submit(&self, manifest: &str) -> Result<String, SubmitError> {
        let mut child = Command::new("kubectl")
            .args(["create", "-f", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(SubmitError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SubmitError::Spawn(std::io::Error::other("no stdin pipe")))?;
        stdin
            .write_all(manifest.as_bytes())
            .await
            .map_err(SubmitError::Spawn)?;
        drop(stdin);

        let output = child.wait_with_output().await.map_err(SubmitError::Spawn)?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(SubmitError::Client { output: combined })
        }
    }
}

/// Errors that can occur during a submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("failed to invoke cluster client: {0}")]
    Spawn(std::io::Error),
    #[error("cluster client rejected manifest: {output}")]
    Client { output: String },
}
