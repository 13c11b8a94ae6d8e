//! # Render Worker
//!
//! Owns the dedicated render thread.
//!
//! ```text
//!   owning thread                       "render" thread
//!   ─────────────                       ───────────────
//!   start() ───────spawn──────────────> make_current, init
//!      │ <──────────ready / error─────────────┘
//!      │                                loop { tasks, render, renderables,
//!   close() ──────state flag─────────────>      present, sleep }
//!   clean_up() ─────join──────────────> cancel tasks, drop renderables,
//!      │ <──────────loop result──────── release context
//! ```
//!
//! `start` only returns once the context is current and the init hook has
//! run, so start-up failures are reported to the caller instead of being
//! lost on the render thread.

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::bounded;
use lumen_core::{FrameInterval, LumenError, LumenResult, Renderable, TaskHandle};

use super::frame_loop::FrameLoop;
use super::handle::RenderHandle;
use super::hooks::RenderHooks;
use super::state::WorkerState;
use crate::config::RenderConfig;
use crate::window::ContextWindow;

/// Name given to the spawned thread.
pub const RENDER_THREAD_NAME: &str = "render";

/// A render loop running on its own thread.
pub struct RenderWorker<W: ContextWindow, H: RenderHooks<W>> {
    handle: RenderHandle<W>,
    window: Arc<W>,
    /// Present until `start` moves it onto the render thread.
    frame_loop: Option<FrameLoop<W, H>>,
    thread: Option<JoinHandle<LumenResult<()>>>,
}

impl<W: ContextWindow, H: RenderHooks<W>> RenderWorker<W, H> {
    /// Creates a worker targeting 60 frames per second. Nothing runs until
    /// [`RenderWorker::start`].
    #[must_use]
    pub fn new(window: Arc<W>, hooks: H) -> Self {
        let (frame_loop, handle) = FrameLoop::from_parts(Arc::clone(&window), hooks, FrameInterval::default(), true);
        Self::assemble(window, frame_loop, handle)
    }

    /// Creates a worker from the `[render]` configuration table.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `config.frame_cap <= 0`.
    pub fn with_config(window: Arc<W>, hooks: H, config: &RenderConfig) -> LumenResult<Self> {
        let (frame_loop, handle) = FrameLoop::new(Arc::clone(&window), hooks, config)?;
        Ok(Self::assemble(window, frame_loop, handle))
    }

    fn assemble(window: Arc<W>, frame_loop: FrameLoop<W, H>, handle: RenderHandle<W>) -> Self {
        Self {
            handle,
            window,
            frame_loop: Some(frame_loop),
            thread: None,
        }
    }

    /// Spawns the render thread and waits until it has made the context
    /// current and run the init hook.
    ///
    /// Does nothing if the worker was already started or closed.
    ///
    /// # Errors
    ///
    /// `ContextAcquisitionFailure`, an init `HookFailure`, or
    /// `WorkerPanicked` if start-up panicked. The worker is `Stopped`
    /// afterwards.
    pub fn start(&mut self) -> LumenResult<()> {
        if self.handle.state() != WorkerState::Created {
            return Ok(());
        }
        let Some(mut frame_loop) = self.frame_loop.take() else {
            return Ok(());
        };

        let (ready_tx, ready_rx) = bounded::<LumenResult<()>>(1);
        let spawned = thread::Builder::new()
            .name(RENDER_THREAD_NAME.into())
            .spawn(move || {
                if let Err(err) = frame_loop.acquire() {
                    let _ = ready_tx.send(Err(err.clone()));
                    return Err(err);
                }
                let _ = ready_tx.send(Ok(()));

                let outcome = frame_loop.run();
                if let Err(err) = &outcome {
                    tracing::error!(error = %err, "render loop aborted");
                }
                frame_loop.shutdown();
                outcome
            });

        let thread = match spawned {
            Ok(thread) => thread,
            Err(err) => {
                // the closure, and the frame loop with it, was dropped: already Stopped
                return Err(LumenError::ContextAcquisitionFailure(format!(
                    "cannot spawn render thread: {err}"
                )));
            }
        };

        let ready = ready_rx.recv();
        if let Ok(Ok(())) = ready {
            self.thread = Some(thread);
            return Ok(());
        }

        let joined = join_loop(thread);
        Err(match ready {
            Ok(Err(err)) => err,
            _ => joined
                .err()
                .unwrap_or(LumenError::InvalidState("render thread exited during start-up")),
        })
    }

    /// Asks the loop to exit after its current iteration. Idempotent and
    /// non-blocking.
    pub fn close(&self) {
        self.handle.close();
    }

    /// Waits for the render thread to exit and releases everything it held.
    ///
    /// Call after [`RenderWorker::close`], or after the loop stopped on its
    /// own because a hook failed.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the loop is still running. Otherwise the loop's own
    /// outcome: the `HookFailure` that stopped it, or `WorkerPanicked`.
    pub fn clean_up(&mut self) -> LumenResult<()> {
        if matches!(self.state(), WorkerState::Created | WorkerState::Running) {
            return Err(LumenError::InvalidState("clean_up called before close"));
        }

        // nothing queued now can be drawn; release it without waiting for the join
        let dropped = self.handle.shared.renderables.close();

        let outcome = self.thread.take().map_or(Ok(()), join_loop);
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.shutdown();
        }
        let cancelled = self.handle.shared.tasks.close();

        tracing::debug!(dropped, cancelled, "render worker cleaned up");
        outcome
    }

    /// Returns a producer handle that outlives borrows of the worker.
    #[must_use]
    pub fn handle(&self) -> RenderHandle<W> {
        self.handle.clone()
    }

    /// Returns the window the worker renders to.
    #[must_use]
    pub fn window(&self) -> &Arc<W> {
        &self.window
    }

    /// See [`RenderHandle::submit`].
    pub fn submit<T, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.handle.submit(work)
    }

    /// See [`RenderHandle::try_submit`].
    pub fn try_submit<T, E, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: std::fmt::Display + 'static,
    {
        self.handle.try_submit(work)
    }

    /// See [`RenderHandle::submit_and_wait`].
    ///
    /// # Errors
    ///
    /// As [`RenderHandle::submit_and_wait`].
    pub fn submit_and_wait<T, F>(&self, work: F) -> LumenResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.handle.submit_and_wait(work)
    }

    /// See [`RenderHandle::enqueue`].
    pub fn enqueue(&self, renderable: Arc<dyn Renderable<W>>) -> bool {
        self.handle.enqueue(renderable)
    }

    /// See [`RenderHandle::set_frame_cap`].
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `cap <= 0`.
    pub fn set_frame_cap(&self, cap: i32) -> LumenResult<()> {
        self.handle.set_frame_cap(cap)
    }

    /// Frames completed during the last full second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.handle.fps()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.handle.state()
    }
}

impl<W: ContextWindow, H: RenderHooks<W>> Drop for RenderWorker<W, H> {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if let Err(err) = join_loop(thread) {
                tracing::warn!(error = %err, "render worker dropped after a failed loop");
            }
        }
    }
}

impl<W: ContextWindow, H: RenderHooks<W>> std::fmt::Debug for RenderWorker<W, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderWorker")
            .field("state", &self.state())
            .field("fps", &self.fps())
            .field("thread", &self.thread.as_ref().map(|t| t.thread().id()))
            .finish_non_exhaustive()
    }
}

fn join_loop(thread: JoinHandle<LumenResult<()>>) -> LumenResult<()> {
    thread
        .join()
        .unwrap_or_else(|payload| Err(LumenError::WorkerPanicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("unknown panic"))
}
