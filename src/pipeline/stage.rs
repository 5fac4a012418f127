//! Bounded-parallelism stage runner
//!
//! A [`Stage`] owns an unbounded queue and a dispatcher task. The dispatcher takes items off the queue and runs
//! the stage's work function on each, holding a semaphore permit per running job so at most `parallelism` jobs
//! are in flight. Closing the queue (dropping every sender) lets the dispatcher finish the queued work, wait for
//! the jobs still running, and hand back every error it saw.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, warn};

use crate::error::GenerateError;

/// Which part of a run an error or log event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Load,
    Synthesize,
    Write,
    /// The orchestrating task itself
    Pipeline,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Load => "load",
            StageKind::Synthesize => "synthesize",
            StageKind::Write => "write",
            StageKind::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle for feeding a stage from outside (including from another stage's workers).
pub(crate) struct StageSender<T> {
    kind: StageKind,
    inner: mpsc::UnboundedSender<T>,
}

impl<T> Clone for StageSender<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            inner: self.inner.clone(),
        }
    }
}

impl<T> StageSender<T> {
    /// Queue `item` for the stage.
    ///
    /// ## Errors
    /// [`GenerateError::StageClosed`] if the stage's dispatcher is gone.
    pub(crate) fn send(&self, item: T) -> Result<(), GenerateError> {
        self.inner
            .send(item)
            .map_err(|_| GenerateError::StageClosed { stage: self.kind })
    }
}

/// A running stage: its queue and dispatcher.
pub(crate) struct Stage<T> {
    sender: StageSender<T>,
    dispatcher: JoinHandle<Vec<GenerateError>>,
}

impl<T: Send + 'static> Stage<T> {
    /// Spawn the stage's dispatcher on the current runtime.
    ///
    /// `work` is called once per item; the returned future runs as its own task.
    pub(crate) fn spawn<F, Fut>(kind: StageKind, parallelism: usize, work: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), GenerateError>> + Send + 'static,
    {
        let (inner, receiver) = mpsc::unbounded_channel();
        let dispatcher = tokio::spawn(dispatch(kind, parallelism, receiver, work));
        Self {
            sender: StageSender { kind, inner },
            dispatcher,
        }
    }

    pub(crate) fn sender(&self) -> StageSender<T> {
        self.sender.clone()
    }

    pub(crate) fn submit(&self, item: T) -> Result<(), GenerateError> {
        self.sender.send(item)
    }

    /// Close this handle's sender and wait for the stage to drain.
    ///
    /// The queue only closes once every other [`StageSender`] is gone too, so callers drain stages in
    /// pipeline order.
    pub(crate) async fn complete(self) -> Vec<GenerateError> {
        let Stage { sender, dispatcher } = self;
        let kind = sender.kind;
        drop(sender);

        match dispatcher.await {
            Ok(errors) => errors,
            Err(e) => vec![GenerateError::WorkerPanicked {
                stage: kind,
                message: panic_message(e),
            }],
        }
    }
}

async fn dispatch<T, F, Fut>(
    kind: StageKind,
    parallelism: usize,
    mut receiver: mpsc::UnboundedReceiver<T>,
    work: F,
) -> Vec<GenerateError>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), GenerateError>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(parallelism));
    let mut jobs = JoinSet::new();
    let mut errors = Vec::new();
    let mut dispatched = 0u64;

    while let Some(item) = receiver.recv().await {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .expect("INVARIANT: stage semaphore is never closed");

        let job = work(item);
        jobs.spawn(async move {
            let result = job.await;
            drop(permit);
            result
        });
        dispatched += 1;

        // Reap finished jobs so the set stays small on long runs
        while let Some(outcome) = jobs.try_join_next() {
            record(kind, outcome, &mut errors);
        }
    }

    while let Some(outcome) = jobs.join_next().await {
        record(kind, outcome, &mut errors);
    }

    // Downstream senders captured by `work` must be gone before the next stage is closed
    drop(work);
    drop(receiver);

    debug!(stage = %kind, dispatched, failed = errors.len(), "Stage drained");
    errors
}

fn record(kind: StageKind, outcome: Result<Result<(), GenerateError>, JoinError>, errors: &mut Vec<GenerateError>) {
    let error = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e,
        Err(e) => GenerateError::WorkerPanicked {
            stage: kind,
            message: panic_message(e),
        },
    };
    warn!(stage = %kind, error = %error, "Item failed");
    errors.push(error);
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(error: JoinError) -> String {
    if !error.is_panic() {
        return "task was cancelled".to_string();
    }
    payload_message(error.into_panic())
}

fn payload_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
