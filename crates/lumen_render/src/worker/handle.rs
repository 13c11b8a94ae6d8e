//! State shared between the render thread and its producers.

use std::sync::Arc;
use std::time::Duration;

use lumen_core::{FpsGauge, FrameInterval, LumenResult, Renderable, RenderableQueue, TaskChannel, TaskHandle};

use super::state::{AtomicState, WorkerState};
use crate::window::ContextWindow;

/// Everything both sides touch.
///
/// Only `renderables` is behind a lock, which also guards its closed flag.
/// The rest is atomics or the lock-free task channel.
pub(crate) struct Shared<W: ContextWindow> {
    pub(crate) state: AtomicState,
    pub(crate) interval: Arc<FrameInterval>,
    pub(crate) fps: FpsGauge,
    pub(crate) tasks: TaskChannel,
    pub(crate) renderables: RenderableQueue<dyn Renderable<W>>,
}

impl<W: ContextWindow> Shared<W> {
    pub(crate) fn new(interval: FrameInterval) -> Self {
        Self {
            state: AtomicState::new(),
            interval: Arc::new(interval),
            fps: FpsGauge::new(),
            tasks: TaskChannel::new(),
            renderables: RenderableQueue::new(),
        }
    }
}

/// Cloneable producer side of a render loop.
///
/// Every method may be called from any thread and none of them waits on
/// the loop, except [`RenderHandle::submit_and_wait`].
pub struct RenderHandle<W: ContextWindow> {
    pub(crate) shared: Arc<Shared<W>>,
}

impl<W: ContextWindow> RenderHandle<W> {
    /// Runs `work` on the render thread at the start of the next frame.
    ///
    /// If the loop has already stopped the handle resolves to `Cancelled`.
    pub fn submit<T, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.shared.tasks.submit(work)
    }

    /// Like [`RenderHandle::submit`] for fallible work; an `Err` resolves
    /// the handle to `TaskFailure`.
    pub fn try_submit<T, E, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: std::fmt::Display + 'static,
    {
        self.shared.tasks.try_submit(work)
    }

    /// Submits `work` and blocks until the render thread has run it.
    ///
    /// # Errors
    ///
    /// `WouldDeadlock` from the render thread itself, `Cancelled` if the
    /// loop stops first, `TaskFailure` if `work` panics.
    pub fn submit_and_wait<T, F>(&self, work: F) -> LumenResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.shared.tasks.submit_and_wait(work)
    }

    /// Queues `renderable` to be drawn once, on the next frame.
    ///
    /// Returns false (and drops the handle) once the loop has shut down.
    /// The check and the push share the queue's lock, so a handle accepted
    /// here is either drawn or released by shutdown.
    pub fn enqueue(&self, renderable: Arc<dyn Renderable<W>>) -> bool {
        let accepted = self.shared.renderables.enqueue(renderable);
        if !accepted {
            tracing::debug!("renderable dropped: render loop stopped");
        }
        accepted
    }

    /// Changes the target frame rate. Takes effect on the next tick.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `cap <= 0`; the previous rate stays.
    pub fn set_frame_cap(&self, cap: i32) -> LumenResult<()> {
        self.shared.interval.set_frame_cap(cap)?;
        tracing::debug!(cap, "frame cap changed");
        Ok(())
    }

    /// Returns the current target time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.shared.interval.as_duration()
    }

    /// Frames completed during the last full second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.shared.fps.get()
    }

    /// Asks the loop to exit after its current iteration. Idempotent.
    pub fn close(&self) {
        if self.shared.state.request_stop() {
            tracing::debug!("render loop stop requested");
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.shared.state.load()
    }

    /// Tasks waiting for the next frame.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.shared.tasks.pending()
    }

    /// Renderables waiting for the next frame.
    #[must_use]
    pub fn pending_renderables(&self) -> usize {
        self.shared.renderables.len()
    }
}

impl<W: ContextWindow> Clone for RenderHandle<W> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<W: ContextWindow> std::fmt::Debug for RenderHandle<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderHandle")
            .field("state", &self.state())
            .field("fps", &self.fps())
            .field("pending_tasks", &self.pending_tasks())
            .field("pending_renderables", &self.pending_renderables())
            .finish()
    }
}
