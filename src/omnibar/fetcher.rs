//! Async suggestion-fetch worker.
//!
//! One tokio task owns the [`SuggestClient`] so the Reddit throttle
//! window survives across requests. The main loop sends
//! [`FetchRequest`]s (and settings changes) over an unbounded command
//! channel and drains generation-tagged [`FetchResponse`]s every frame.
//! Requests are processed in order, one at a time; staleness is the
//! controller's problem, not the worker's.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wisp_suggest::{SearchEngine, SuggestClient, SuggestConfig, SuggestError};

/// Bound on buffered completions; the main loop drains every frame.
const RESPONSE_BUFFER: usize = 16;

/// One fetch the controller asked for.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Engine whose endpoint is queried.
    pub engine: SearchEngine,
    /// Query text at the time of the request.
    pub query: String,
    /// Generation stamped onto the response.
    pub generation: u64,
}

/// How one fetch ended, as the controller applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetch completed; the popup is re-populated from this list.
    Suggestions(Vec<String>),
    /// Skipped by the per-engine request spacing; list stays as-is.
    Throttled,
    /// HTTP or parse failure, already logged; list stays as-is.
    Failed,
}

/// A completed fetch tagged with its request generation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Generation of the request this response answers.
    pub generation: u64,
    /// What came back.
    pub outcome: FetchOutcome,
}

enum Command {
    Fetch(FetchRequest),
    Reconfigure(SuggestConfig),
}

/// Handle to the fetch worker task. Dropping it closes the command
/// channel and the worker winds down on its own.
pub struct Fetcher {
    commands: mpsc::UnboundedSender<Command>,
    responses: mpsc::Receiver<FetchResponse>,
    _task: JoinHandle<()>,
}

impl Fetcher {
    /// Spawns the fetch worker. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when `config` fails validation or the HTTP
    /// client cannot be built.
    pub fn spawn(config: SuggestConfig) -> Result<Self, SuggestError> {
        let client = SuggestClient::new(config)?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel(RESPONSE_BUFFER);
        let task = tokio::spawn(worker(client, command_rx, response_tx));
        Ok(Self {
            commands: command_tx,
            responses: response_rx,
            _task: task,
        })
    }

    /// Queues a fetch.
    pub fn request(&self, request: FetchRequest) {
        if self.commands.send(Command::Fetch(request)).is_err() {
            tracing::warn!("fetch worker gone, dropping request");
        }
    }

    /// Applies new fetch settings from the next request onward.
    pub fn reconfigure(&self, config: SuggestConfig) {
        if self.commands.send(Command::Reconfigure(config)).is_err() {
            tracing::warn!("fetch worker gone, dropping settings change");
        }
    }

    /// Returns a completed fetch, if one is waiting.
    pub fn try_recv(&mut self) -> Option<FetchResponse> {
        self.responses.try_recv().ok()
    }

    /// Waits for the next completed fetch. `None` once the worker has
    /// stopped.
    pub async fn recv(&mut self) -> Option<FetchResponse> {
        self.responses.recv().await
    }
}

async fn worker(
    mut client: SuggestClient,
    mut commands: mpsc::UnboundedReceiver<Command>,
    responses: mpsc::Sender<FetchResponse>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Reconfigure(config) => {
                if let Err(e) = client.update_config(config) {
                    tracing::warn!(error = %e, "rejected suggestion settings change");
                }
            }
            Command::Fetch(request) => {
                let outcome = match client.fetch(request.engine, &request.query).await {
                    Ok(list) => FetchOutcome::Suggestions(list),
                    Err(SuggestError::Throttled(_)) => FetchOutcome::Throttled,
                    Err(e) => {
                        tracing::debug!(
                            engine = %request.engine,
                            error = %e,
                            "suggestion fetch failed"
                        );
                        FetchOutcome::Failed
                    }
                };
                let response = FetchResponse {
                    generation: request.generation,
                    outcome,
                };
                if responses.send(response).await.is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("fetch worker stopped");
}
