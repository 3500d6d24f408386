#![forbid(unsafe_code)]

//! Pipeline errors.

use std::fmt;
use std::io;
use std::time::Duration;

/// Errors surfaced by the reload pipeline.
///
/// Layout math never fails and cancellation is silent; these cover only
/// the worker thread and waiting on it.
#[derive(Debug)]
pub enum PipelineError {
    /// The layout worker thread could not be started.
    Spawn(io::Error),
    /// The layout worker thread is gone (a job panicked).
    WorkerDisconnected,
    /// A reload was still in flight when the wait gave up.
    Timeout {
        /// How long the caller waited.
        waited: Duration,
        /// Generation of the reload still in flight.
        generation: u64,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "failed to spawn layout worker: {err}"),
            Self::WorkerDisconnected => write!(f, "layout worker disconnected"),
            Self::Timeout { waited, generation } => write!(
                f,
                "reload {generation} still in flight after {}ms",
                waited.as_millis()
            ),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}
