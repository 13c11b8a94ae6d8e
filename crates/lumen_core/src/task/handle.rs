use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};

use crate::error::{LumenError, LumenResult};

/// Handle to the eventual outcome of a submitted task.
///
/// The outcome is delivered exactly once: either the task's value, a
/// `TaskFailure`, or `Cancelled` if the task was discarded without running.
/// Once `try_wait` or `wait_timeout` has returned `Some`, the outcome has been
/// taken and later calls report `Cancelled`.
///
/// Waiting has no timeout of its own. A task stuck on the render thread
/// stalls the whole frame loop, and `wait` with it.
pub struct TaskHandle<T> {
    /// One-shot reply channel. The sending half travels with the task.
    outcome: Receiver<LumenResult<T>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(outcome: Receiver<LumenResult<T>>) -> Self {
        Self { outcome }
    }

    /// Returns a handle that already holds `Cancelled`.
    pub(crate) fn cancelled() -> Self {
        let (reply, outcome) = bounded(1);
        // receiver is alive and the slot is empty
        let _ = reply.send(Err(LumenError::Cancelled));
        Self { outcome }
    }

    /// Blocks until the task has run (or was cancelled) and returns its outcome.
    ///
    /// # Errors
    ///
    /// `TaskFailure` if the task failed, `Cancelled` if it never ran.
    pub fn wait(self) -> LumenResult<T> {
        self.outcome
            .recv()
            .unwrap_or(Err(LumenError::Cancelled))
    }

    /// Returns the outcome if it is available, without blocking.
    #[must_use]
    pub fn try_wait(&self) -> Option<LumenResult<T>> {
        match self.outcome.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LumenError::Cancelled)),
        }
    }

    /// Waits up to `timeout` for the outcome.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> Option<LumenResult<T>> {
        match self.outcome.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(LumenError::Cancelled)),
        }
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("ready", &!self.outcome.is_empty())
            .finish()
    }
}
