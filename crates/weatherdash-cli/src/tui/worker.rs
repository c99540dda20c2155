//! Background worker for station fetches.
//!
//! The [`FetchWorker`] owns the HTTP client and runs in its own tokio task,
//! so the render loop never waits on the network. It receives [`Command`]s
//! and answers with [`LoaderEvent`]s.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use weatherdash_core::{Command, LoaderEvent, TelemetryClient};

/// Background worker that fetches the reading history.
pub struct FetchWorker {
    client: TelemetryClient,
    command_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<LoaderEvent>,
    /// Cancels an in-flight fetch on shutdown.
    cancel_token: CancellationToken,
}

impl FetchWorker {
    pub fn new(
        client: TelemetryClient,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<LoaderEvent>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            client,
            command_rx,
            event_tx,
            cancel_token,
        }
    }

    /// Run until [`Command::Shutdown`], channel close, or cancellation.
    pub async fn run(mut self) {
        info!(url = %self.client.base_url(), "FetchWorker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Fetch) => self.fetch().await,
                        Some(Command::Shutdown) => {
                            info!("FetchWorker received shutdown command");
                            break;
                        }
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                _ = self.cancel_token.cancelled() => {
                    info!("FetchWorker cancelled");
                    break;
                }
            }
        }

        info!("FetchWorker stopped");
    }

    async fn fetch(&self) {
        let url = self.client.data_url();
        self.send(LoaderEvent::FetchStarted { url: url.clone() }).await;

        let result = tokio::select! {
            result = self.client.fetch_readings() => result,
            _ = self.cancel_token.cancelled() => {
                info!("Fetch cancelled");
                return;
            }
        };

        let event = match result {
            Ok(readings) => {
                info!(count = readings.len(), "Fetched readings");
                LoaderEvent::ReadingsLoaded(readings)
            }
            Err(e) if e.is_timeout() => {
                warn!(%url, "Fetch timed out");
                LoaderEvent::FetchFailed(format!("Timed out waiting for {}", url))
            }
            Err(e) => {
                error!(error = %e, %url, "Fetch failed");
                LoaderEvent::FetchFailed(e.to_string())
            }
        };
        self.send(event).await;
    }

    async fn send(&self, event: LoaderEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send loader event: {}", e);
        }
    }
}
