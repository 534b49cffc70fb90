use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{db::MovieStore, error::AppError, models::InteractionLog};

/// Best-effort writer for the interaction log
///
/// `record` hands the entry to a background task and returns immediately.
/// Failures are logged and never reach the request that produced the entry.
#[derive(Clone)]
pub struct InteractionRecorder {
    write_tx: mpsc::UnboundedSender<InteractionLog>,
}

/// Handle for gracefully shutting down the recorder task
pub struct RecorderHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RecorderHandle {
    /// Stops the writer task after it has written every queued entry
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Interaction recorder task panicked");
        }
    }
}

impl InteractionRecorder {
    /// Spawns the background writer and returns the recorder with its handle
    pub fn spawn(store: Arc<dyn MovieStore>) -> (Self, RecorderHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(Self::writer_task(store, write_rx, shutdown_rx));

        (Self { write_tx }, RecorderHandle { shutdown_tx, task })
    }

    /// Queues one entry for writing
    pub fn record(&self, log: InteractionLog) {
        if let Err(e) = self.write_tx.send(log) {
            let err = AppError::Recorder(format!("writer task is gone: {}", e));
            tracing::error!(error = %err, "Dropping interaction log entry");
        }
    }

    async fn writer_task(
        store: Arc<dyn MovieStore>,
        mut write_rx: mpsc::UnboundedReceiver<InteractionLog>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        tracing::info!(store = store.name(), "Interaction recorder started");

        loop {
            tokio::select! {
                maybe_log = write_rx.recv() => match maybe_log {
                    Some(log) => Self::write(store.as_ref(), log).await,
                    None => break,
                },
                _ = &mut shutdown_rx => {
                    // Senders may still be alive, so drain without waiting for close
                    let mut flushed = 0usize;
                    while let Ok(log) = write_rx.try_recv() {
                        Self::write(store.as_ref(), log).await;
                        flushed += 1;
                    }
                    tracing::info!(flushed, "Interaction recorder flushed pending entries");
                    break;
                }
            }
        }

        tracing::info!("Interaction recorder stopped");
    }

    async fn write(store: &dyn MovieStore, log: InteractionLog) {
        if let Err(e) = store.insert_interaction(&log).await {
            let err = AppError::Recorder(e.to_string());
            tracing::error!(error = %err, interaction_id = %log.id, "Failed to persist interaction");
        }
    }
}
