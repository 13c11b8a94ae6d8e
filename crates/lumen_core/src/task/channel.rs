//! Deferred work executed on the render thread.
//!
//! ```text
//!   Thread 1 ──┐
//!   Thread 2 ──┼──> [unbounded channel] ──> drain_and_run_all() ──> reply
//!   Thread N ──┘      (submit never blocks)     (render thread)      per task
//! ```
//!
//! A drain takes only the tasks that were queued when it started. Anything a
//! task submits while the drain is running (including to this same channel)
//! waits for the next frame, so a frame always finishes.

use std::fmt::Display;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{fence, AtomicBool, Ordering};
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::handle::TaskHandle;
use crate::error::{LumenError, LumenResult};

/// Type-erased unit of work. Dropping a job without running it resolves its
/// handle with `Cancelled`.
trait Job: Send {
    fn run(self: Box<Self>);
}

struct Task<T, E, F> {
    work: F,
    /// Sending half of the handle's one-shot channel.
    reply: Sender<LumenResult<T>>,
    _error: PhantomData<fn() -> E>,
}

impl<T, E, F> Job for Task<T, E, F>
where
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: Display,
{
    fn run(self: Box<Self>) {
        let Task { work, reply, .. } = *self;

        let outcome = match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(LumenError::TaskFailure(err.to_string())),
            Err(payload) => Err(LumenError::TaskFailure(panic_message(payload.as_ref()))),
        };

        // the submitter may have dropped its handle; nobody left to tell
        let _ = reply.send(outcome);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

/// Multi-producer queue of work for the render thread.
///
/// ## Thread Safety
///
/// - `submit` / `try_submit`: any thread, never blocks
/// - `drain_and_run_all`: the owning (render) thread only
/// - `close`: the owning thread, once, at shutdown
pub struct TaskChannel {
    /// Producers' end. crossbeam's list channel, lock-free for senders.
    sender: Sender<Box<dyn Job>>,
    /// Consumer end, used by the render thread and by late cancellation.
    receiver: Receiver<Box<dyn Job>>,
    /// Set once at shutdown. Paired with a SeqCst fence on both sides so a
    /// task sent concurrently with `close` is cancelled by one side or the other.
    closed: AtomicBool,
    /// Thread that drains the channel; set once by `bind_to_current_thread`.
    owner: OnceLock<ThreadId>,
}

impl TaskChannel {
    /// Creates an empty, open channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            closed: AtomicBool::new(false),
            owner: OnceLock::new(),
        }
    }

    /// Submits infallible work. Panics inside `work` become `TaskFailure`.
    pub fn submit<T, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.try_submit(move || Ok::<T, std::convert::Infallible>(work()))
    }

    /// Submits fallible work. An `Err` is delivered as `TaskFailure`.
    ///
    /// After `close` the returned handle already holds `Cancelled`.
    pub fn try_submit<T, E, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Display + 'static,
    {
        if self.closed.load(Ordering::SeqCst) {
            return TaskHandle::cancelled();
        }

        let (reply, outcome) = bounded(1);
        let task: Box<dyn Job> = Box::new(Task {
            work,
            reply,
            _error: PhantomData,
        });

        // we hold the receiver, so the channel cannot be disconnected
        let _ = self.sender.send(task);

        fence(Ordering::SeqCst);
        if self.closed.load(Ordering::SeqCst) {
            // raced with shutdown: the render thread may already be gone
            self.cancel_pending();
        }

        TaskHandle::new(outcome)
    }

    /// Submits work and blocks until it has run.
    ///
    /// # Errors
    ///
    /// `WouldDeadlock` when called from the thread that drains this channel,
    /// otherwise whatever the task produced.
    pub fn submit_and_wait<T, F>(&self, work: F) -> LumenResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.is_owner_thread() {
            return Err(LumenError::WouldDeadlock);
        }
        self.submit(work).wait()
    }

    /// Records the calling thread as the one that drains this channel.
    ///
    /// Only the first call has an effect.
    pub fn bind_to_current_thread(&self) {
        let _ = self.owner.set(thread::current().id());
    }

    /// Returns true when called from the bound drain thread.
    #[must_use]
    pub fn is_owner_thread(&self) -> bool {
        self.owner.get() == Some(&thread::current().id())
    }

    /// Runs every task that was queued when the call started, in order.
    ///
    /// Returns the number of tasks executed.
    pub fn drain_and_run_all(&self) -> usize {
        let batch = self.receiver.len();
        let mut ran = 0;

        for _ in 0..batch {
            let Ok(job) = self.receiver.try_recv() else {
                break;
            };
            job.run();
            ran += 1;
        }

        ran
    }

    /// Stops accepting work and cancels everything still queued.
    ///
    /// Returns the number of tasks cancelled. Idempotent.
    pub fn close(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        fence(Ordering::SeqCst);

        let cancelled = self.cancel_pending();
        if cancelled > 0 {
            tracing::debug!(cancelled, "task channel closed with pending work");
        }
        cancelled
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Returns the number of queued tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    fn cancel_pending(&self) -> usize {
        let mut cancelled = 0;
        // dropping a job drops its reply sender, which resolves the handle
        while let Ok(job) = self.receiver.try_recv() {
            drop(job);
            cancelled += 1;
        }
        cancelled
    }
}

impl Default for TaskChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskChannel {
    fn drop(&mut self) {
        self.close();
    }
}
