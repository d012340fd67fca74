//! # Print Job Queue
//!
//! Serialized execution of print jobs against the single shared printer.
//!
//! The printer is one physical resource with no internal concurrency:
//! interleaving two print streams corrupts the output. The queue is the sole
//! serialization point. Submissions are accepted from any number of
//! concurrent contexts; execution is strictly sequential, in exact
//! submission order.
//!
//! ## How draining works
//!
//! `enqueue` appends to the tail and spawns a drain attempt. The drain is an
//! idempotent no-op while another drain is mid-job (`printing == true`) or
//! the queue is empty; otherwise it claims the flag, pops the head, awaits
//! the job, clears the flag and loops. The flag and the deque are only ever
//! touched under one lock, so at most one job is in flight at any instant.
//!
//! The drain is an explicit loop rather than a recursive re-trigger, so a
//! burst of submissions cannot grow the call stack.
//!
//! ## Failure
//!
//! A job that returns an error is logged and dropped. No retry, no effect
//! on jobs behind it, never fatal to the process. Jobs run in their own
//! task, so even a panicking job only aborts itself; the drain clears the
//! flag and moves on.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::BoletaError;

/// One unit of print work, opaque to the queue.
///
/// Created at submission time; the payload and the device handle are
/// captured inside the future. The queue only knows "await it, it succeeds
/// or fails". Nothing is retained after execution.
pub struct PrintJob {
    kind: &'static str,
    task: Pin<Box<dyn Future<Output = Result<(), BoletaError>> + Send + 'static>>,
}

impl PrintJob {
    /// Wrap a future as a print job. `kind` is a short label for logs
    /// (e.g. `"text"`, `"image"`).
    pub fn new<F>(kind: &'static str, task: F) -> Self
    where
        F: Future<Output = Result<(), BoletaError>> + Send + 'static,
    {
        Self {
            kind,
            task: Box::pin(task),
        }
    }

    /// Job label for logging.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Execute the job to completion.
    pub async fn run(self) -> Result<(), BoletaError> {
        self.task.await
    }
}

impl std::fmt::Debug for PrintJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintJob").field("kind", &self.kind).finish()
    }
}

/// Read-only queue snapshot for observability.
///
/// `length` is the number of pending jobs, excluding the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    pub length: usize,
    pub printing: bool,
}

struct QueueInner {
    jobs: VecDeque<PrintJob>,
    printing: bool,
}

/// Ordered, in-memory, single-consumer print job queue.
///
/// Lives behind an `Arc` for the process lifetime; the HTTP layer and the
/// CLI hold handles to the same instance. Contents are volatile — pending
/// jobs do not survive a restart.
pub struct JobQueue {
    inner: Mutex<QueueInner>,
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(QueueInner {
                jobs: VecDeque::new(),
                printing: false,
            }),
        })
    }

    /// Append a job to the tail and trigger a drain attempt.
    ///
    /// Never fails and never waits for the printer; callers get control
    /// back as soon as the job is in the queue.
    pub async fn enqueue(self: &Arc<Self>, job: PrintJob) {
        {
            let mut inner = self.inner.lock().await;
            debug!(kind = job.kind(), depth = inner.jobs.len(), "job enqueued");
            inner.jobs.push_back(job);
        }

        let queue = Arc::clone(self);
        tokio::spawn(async move { queue.drain().await });
    }

    /// Snapshot of queue depth and the printing flag.
    pub async fn status(&self) -> QueueStatus {
        let inner = self.inner.lock().await;
        QueueStatus {
            length: inner.jobs.len(),
            printing: inner.printing,
        }
    }

    /// Execute pending jobs until the queue is empty or another drain owns
    /// the printing flag. Idempotent; safe to trigger at any time.
    async fn drain(self: Arc<Self>) {
        loop {
            let job = {
                let mut inner = self.inner.lock().await;
                if inner.printing {
                    // Another drain is mid-job; it will pick up our work
                    return;
                }
                let Some(job) = inner.jobs.pop_front() else {
                    return;
                };
                inner.printing = true;
                job
            };

            let kind = job.kind();
            let started = Instant::now();
            // The job runs in its own task so a panic inside it cannot take
            // the drain down while the printing flag is still set
            match tokio::spawn(job.run()).await {
                Ok(Ok(())) => {
                    info!(kind, elapsed_ms = started.elapsed().as_millis() as u64, "job printed");
                }
                Ok(Err(e)) => {
                    // Terminal for this job only; keep draining
                    error!(kind, error = %e, "print job failed");
                }
                Err(e) => {
                    error!(kind, error = %e, "print job aborted");
                }
            }

            self.inner.lock().await.printing = false;
        }
    }

    /// Wait until the queue is empty and idle.
    ///
    /// Polling is enough here: this exists for tests and orderly shutdown,
    /// not for the serving path.
    pub async fn join(&self) {
        loop {
            let status = self.status().await;
            if status.length == 0 && !status.printing {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_empty_queue_status() {
        let queue = JobQueue::new();
        let status = queue.status().await;
        assert_eq!(status.length, 0);
        assert!(!status.printing);
    }

    #[tokio::test]
    async fn test_single_job_executes() {
        let queue = JobQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));
        let ran2 = Arc::clone(&ran);

        queue
            .enqueue(PrintJob::new("text", async move {
                ran2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .await;

        queue.join().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_job_kind_label() {
        let job = PrintJob::new("image", async { Ok(()) });
        assert_eq!(job.kind(), "image");
    }

    #[tokio::test]
    async fn test_failed_job_does_not_stall_queue() {
        let queue = JobQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));

        queue
            .enqueue(PrintJob::new("text", async {
                Err(BoletaError::Device("paper jam".into()))
            }))
            .await;
        let ran2 = Arc::clone(&ran);
        queue
            .enqueue(PrintJob::new("text", async move {
                ran2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .await;

        queue.join().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(queue.status().await.length, 0);
    }

    fn blow_up() -> Result<(), BoletaError> {
        panic!("job blew up");
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_stall_queue() {
        let queue = JobQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));

        queue.enqueue(PrintJob::new("text", async { blow_up() })).await;
        let ran2 = Arc::clone(&ran);
        queue
            .enqueue(PrintJob::new("text", async move {
                ran2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .await;

        queue.join().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        let status = queue.status().await;
        assert_eq!(status.length, 0);
        assert!(!status.printing);
    }
}
