//! Client for the simulator's single command endpoint (`POST /execute`).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{AppError, Result};
use crate::event::Event;
use crate::explorer::model::Snapshot;

/// Command whose output is the JSON disk forest.
pub const GETFS_COMMAND: &str = "getfs";

#[derive(Debug, Serialize)]
pub struct CommandRequest<'a> {
    pub command: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CommandResponse {
    pub output: String,
}

/// Work the event loop hands off to a background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchSnapshot,
    Execute(String),
}

/// HTTP client bound to one simulator server.
#[derive(Debug, Clone)]
pub struct RemoteExecutor {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteExecutor {
    /// Build a client for `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "server URL must start with http:// or https://, got `{}`",
                base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: format!("{}/execute", base),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one command and return the server's `output` text.
    pub async fn execute(&self, command: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&CommandRequest { command })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "{} answered {}",
                self.endpoint, status
            )));
        }
        let body: CommandResponse = response.json().await?;
        Ok(body.output)
    }

    /// Run `getfs` and parse its output.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let output = self.execute(GETFS_COMMAND).await?;
        Snapshot::from_json(&output)
    }

    /// Run `request` on a background task and report back through `tx`.
    pub fn dispatch(&self, request: Request, tx: &mpsc::UnboundedSender<Event>) {
        let executor = self.clone();
        let tx = tx.clone();
        match request {
            Request::FetchSnapshot => {
                tracing::info!(endpoint = %self.endpoint, "fetching snapshot");
                tokio::spawn(async move {
                    let result = executor.fetch_snapshot().await;
                    let _ = tx.send(Event::SnapshotLoaded(result));
                });
            }
            Request::Execute(command) => {
                tracing::info!(%command, "executing command");
                tokio::spawn(async move {
                    let result = executor.execute(&command).await;
                    let _ = tx.send(Event::CommandFinished { command, result });
                });
            }
        }
    }
}
