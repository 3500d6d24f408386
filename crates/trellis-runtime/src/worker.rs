#![forbid(unsafe_code)]

//! Serial background worker.
//!
//! One named thread runs submitted jobs strictly in order. Cancellation is
//! the job's business: a superseded job polls its token and returns early.

use std::sync::mpsc;
use std::thread;

use crate::error::PipelineError;

/// A unit of background work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single background thread consuming a job queue.
///
/// Dropping the worker closes the queue; the thread exits after its current
/// job. The drop does not join, since a job may be waiting on the foreground.
#[derive(Debug)]
pub struct LayoutWorker {
    sender: mpsc::Sender<Job>,
    thread: thread::JoinHandle<()>,
}

impl LayoutWorker {
    /// Spawn the worker thread.
    pub fn spawn(name: &str) -> Result<Self, PipelineError> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread_name = name.to_owned();
        let thread = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                crate::debug_trace!("worker started: {}", thread_name);
                for job in receiver {
                    job();
                }
                crate::debug_trace!("worker stopped: {}", thread_name);
            })?;
        Ok(Self { sender, thread })
    }

    /// Queue a job behind any already submitted.
    pub fn submit(&self, job: Job) -> Result<(), PipelineError> {
        self.sender
            .send(job)
            .map_err(|_| PipelineError::WorkerDisconnected)
    }

    /// Whether the worker thread is still running.
    pub fn is_alive(&self) -> bool {
        !self.thread.is_finished()
    }
}
