//! Lanes decide which thread runs a compression job. Compression is CPU
//! bound and can run for a long time, so large jobs should not run on
//! threads that serve short, latency sensitive work. A 'CpuLane' is a pool
//! of threads reserved for such jobs. When no such pool is available the
//! job runs 'Inline', on the calling thread.

use crate::error::{Error, Result};
use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A unit of work submitted to a lane.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A policy for running jobs.
pub trait Lane: Send + Sync {
    /// Schedule 'job' to run. Returns 'Error::LaneClosed' if the lane no
    /// longer accepts jobs.
    fn submit(&self, job: Job) -> Result<()>;

    /// A short name for logging.
    fn name(&self) -> &'static str;
}

/// Run 'job' on 'lane' and wait for its result.
pub fn run<T, F>(lane: &dyn Lane, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = bounded(1);
    lane.submit(Box::new(move || {
        let _ = tx.send(job());
    }))?;
    // The sender is dropped without a value if the job panicked.
    rx.recv().map_err(|_| Error::LaneClosed)
}

/// Runs every job on the thread that submits it.
#[derive(Copy, Clone, Debug, Default)]
pub struct Inline;

impl Lane for Inline {
    fn submit(&self, job: Job) -> Result<()> {
        job();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}

/// A fixed pool of worker threads for long running CPU work.
pub struct CpuLane {
    /// The job queue. Taken on drop to stop the workers.
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

fn worker_loop(rx: Receiver<Job>) {
    while let Ok(job) = rx.recv() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            let current = thread::current();
            log::warn!("A job panicked on {}", current.name().unwrap_or("?"));
        }
    }
}

impl CpuLane {
    /// Starts a pool of 'threads' workers (at least one).
    pub fn new(threads: usize) -> std::io::Result<Self> {
        let (sender, rx) = unbounded::<Job>();
        let mut workers = Vec::new();
        for i in 0..threads.max(1) {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("bzdrive-cpu-{}", i))
                .spawn(move || worker_loop(rx))?;
            workers.push(handle);
        }
        log::debug!("Started a cpu lane with {} workers", workers.len());
        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    pub fn threads(&self) -> usize {
        self.workers.len()
    }
}

impl Lane for CpuLane {
    fn submit(&self, job: Job) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(Error::LaneClosed)?;
        sender.send(job).map_err(|_| Error::LaneClosed)
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}

impl Drop for CpuLane {
    fn drop(&mut self) {
        // Closing the queue lets the workers finish the queued jobs and exit.
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Picks the lane for this machine: a 'CpuLane' with one worker per CPU when
/// there is more than one CPU, and 'Inline' otherwise or if the workers
/// cannot be started.
pub fn select_lane() -> Arc<dyn Lane> {
    let cpus = num_cpus::get();
    if cpus > 1 {
        match CpuLane::new(cpus) {
            Ok(lane) => return Arc::new(lane),
            Err(err) => log::warn!("Could not start the cpu lane: {}", err),
        }
    }
    Arc::new(Inline)
}
