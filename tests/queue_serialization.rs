//! Integration tests for the print job queue.
//!
//! The queue's contract is behavioral: exactly one job executes at a time,
//! jobs run in submission order, and a failing job never blocks the jobs
//! behind it. These tests instrument jobs with timestamps and verify the
//! contract directly, no printer required.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use boleta::error::BoletaError;
use boleta::queue::{JobQueue, PrintJob};

/// Start/end interval recorded by one instrumented job.
#[derive(Debug, Clone, Copy)]
struct Execution {
    id: usize,
    start: Instant,
    end: Instant,
}

type Log = Arc<Mutex<Vec<Execution>>>;

/// A job that records its execution window and holds the printer for a bit.
fn instrumented_job(id: usize, log: Log, hold: Duration) -> PrintJob {
    PrintJob::new("text", async move {
        let start = Instant::now();
        tokio::time::sleep(hold).await;
        log.lock().unwrap().push(Execution {
            id,
            start,
            end: Instant::now(),
        });
        Ok(())
    })
}

fn assert_no_overlap(executions: &[Execution]) {
    let mut sorted = executions.to_vec();
    sorted.sort_by_key(|e| e.start);
    for pair in sorted.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "executions overlap: job {} [{:?}..{:?}] vs job {} [{:?}..{:?}]",
            pair[0].id,
            pair[0].start,
            pair[0].end,
            pair[1].id,
            pair[1].start,
            pair[1].end,
        );
    }
}

#[tokio::test]
async fn sequential_enqueues_execute_in_order() {
    let queue = JobQueue::new();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    for id in 0..5 {
        queue
            .enqueue(instrumented_job(id, log.clone(), Duration::from_millis(10)))
            .await;
    }
    queue.join().await;

    let executions = log.lock().unwrap().clone();
    assert_eq!(executions.len(), 5);

    // Completion order equals submission order
    let ids: Vec<usize> = executions.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);

    assert_no_overlap(&executions);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_enqueues_all_execute_exactly_once_without_overlap() {
    let queue = JobQueue::new();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let submitters: Vec<_> = (0..8)
        .map(|id| {
            let queue = queue.clone();
            let log = log.clone();
            tokio::spawn(async move {
                queue
                    .enqueue(instrumented_job(id, log, Duration::from_millis(5)))
                    .await;
            })
        })
        .collect();
    for s in submitters {
        s.await.unwrap();
    }
    queue.join().await;

    let executions = log.lock().unwrap().clone();
    assert_eq!(executions.len(), 8, "every submitted job must execute");

    let mut ids: Vec<usize> = executions.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..8).collect::<Vec<_>>(), "no job runs twice");

    assert_no_overlap(&executions);
}

#[tokio::test]
async fn failing_job_does_not_block_the_next_one() {
    let queue = JobQueue::new();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    queue
        .enqueue(instrumented_job(0, log.clone(), Duration::from_millis(5)))
        .await;
    queue
        .enqueue(PrintJob::new("text", async {
            Err(BoletaError::Device("transport timeout".into()))
        }))
        .await;
    queue
        .enqueue(instrumented_job(2, log.clone(), Duration::from_millis(5)))
        .await;

    queue.join().await;

    let executions = log.lock().unwrap().clone();
    let ids: Vec<usize> = executions.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 2]);

    let status = queue.status().await;
    assert_eq!(status.length, 0);
    assert!(!status.printing);
}

#[tokio::test]
async fn status_length_decreases_monotonically_while_draining() {
    let queue = JobQueue::new();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    for id in 0..3 {
        queue
            .enqueue(instrumented_job(id, log.clone(), Duration::from_millis(25)))
            .await;
    }

    let mut lengths = Vec::new();
    let mut saw_printing = false;
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let status = queue.status().await;
        lengths.push(status.length);
        saw_printing |= status.printing;
        if status.length == 0 && !status.printing {
            break;
        }
        assert!(Instant::now() < deadline, "queue did not drain in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(
        lengths.windows(2).all(|w| w[0] >= w[1]),
        "queue length must never grow while draining: {:?}",
        lengths
    );
    assert!(saw_printing, "printing flag must be observable mid-drain");
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn jobs_enqueued_during_execution_are_picked_up() {
    let queue = JobQueue::new();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    // First job holds the printer long enough for a second submission to
    // land while printing is true
    queue
        .enqueue(instrumented_job(0, log.clone(), Duration::from_millis(30)))
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(queue.status().await.printing);

    queue
        .enqueue(instrumented_job(1, log.clone(), Duration::from_millis(5)))
        .await;
    queue.join().await;

    let ids: Vec<usize> = log.lock().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1]);
}
