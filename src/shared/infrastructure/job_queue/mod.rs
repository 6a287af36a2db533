// Single-worker job queue.
//
// Purpose
// - Serialize deferred background actions so they never overlap each other.
//
// Responsibilities
// - Accept jobs without blocking (unbounded FIFO).
// - Run them one at a time, strictly in submission order, on exactly one worker task.
// - Log a failing or panicking job and carry on with the next one.
// - Stop only when the shutdown token is cancelled (or every sender is gone).

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub type Job = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

struct QueuedJob {
    name: String,
    job: Job,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobQueueError {
    #[error("job queue worker has stopped")]
    Closed,
}

#[derive(Clone)]
pub struct JobQueue {
    sender: mpsc::UnboundedSender<QueuedJob>,
}

impl JobQueue {
    /// Spawns the worker. Call once at startup and share the returned queue.
    pub fn start(shutdown: CancellationToken) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(receiver, shutdown));
        (Self { sender }, worker)
    }

    pub fn enqueue<F>(&self, name: impl Into<String>, job: F) -> Result<(), JobQueueError>
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.sender
            .send(QueuedJob {
                name: name.into(),
                job: Box::pin(job),
            })
            .map_err(|_| JobQueueError::Closed)
    }
}

async fn run_worker(mut receiver: mpsc::UnboundedReceiver<QueuedJob>, shutdown: CancellationToken) {
    tracing::info!("job queue worker started");
    loop {
        let queued = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = receiver.recv() => match next {
                Some(queued) => queued,
                None => break,
            },
        };
        let QueuedJob { name, job } = queued;
        tracing::debug!(job = %name, "job started");
        // Own task so a panic surfaces as a JoinError instead of killing the worker.
        match tokio::spawn(job).await {
            Ok(Ok(())) => tracing::debug!(job = %name, "job finished"),
            Ok(Err(error)) => tracing::error!(job = %name, error = %error, "job failed"),
            Err(error) => tracing::error!(job = %name, error = %error, "job panicked"),
        }
    }
    tracing::info!("job queue worker stopped");
}
