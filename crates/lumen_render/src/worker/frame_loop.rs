//! # Frame Loop
//!
//! One iteration of the render thread, and the loop around it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  tick clock, add to backlog ── backlog == 0 ──> FPS update   │
//! │      │                                                       │
//! │      ├── 1. run tasks queued before this frame               │
//! │      ├── 2. render hook                                      │
//! │      ├── 3. swap out renderables, draw each once, drop them  │
//! │      ├── 4. present, backlog - 1                             │
//! │      └── 5. FPS window (publish once per second)             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`FrameLoop`] does not spawn anything. [`RenderWorker`](super::RenderWorker)
//! drives it on a dedicated thread; an embedder with its own thread (or its
//! own executor) can call [`FrameLoop::acquire`], [`FrameLoop::step`] and
//! [`FrameLoop::shutdown`] directly.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lumen_core::{FpsCounter, FrameClock, FrameInterval, Hook, LumenError, LumenResult, Renderable};

use super::handle::{RenderHandle, Shared};
use super::hooks::RenderHooks;
use super::state::WorkerState;
use crate::config::RenderConfig;
use crate::window::ContextWindow;

/// Below this much remaining time the loop sleeps the exact remainder, with
/// no wake margin. The loop never spins waiting for a frame; it only yields
/// when a frame is already due.
const SLEEP_THRESHOLD: Duration = Duration::from_micros(1000);

/// Wake this early from a sleep; the OS oversleeps more than it undersleeps.
const WAKE_MARGIN: Duration = Duration::from_micros(500);

/// Longest single sleep, so `close` is noticed even at very low frame caps.
const MAX_SLEEP: Duration = Duration::from_millis(100);

/// What one [`FrameLoop::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whole intervals that elapsed since the previous step.
    pub frames_due: u32,
    /// A frame was rendered and presented.
    pub rendered: bool,
    /// Tasks run this step.
    pub tasks_run: usize,
    /// Renderables drawn this step.
    pub renderables_drawn: usize,
    /// Due frames still to render after this one. While non-zero,
    /// [`FrameLoop::run`] steps again without sleeping.
    pub backlog: u32,
    /// Frame rate, when a one-second window closed this step.
    pub fps: Option<u32>,
}

/// The render loop body, bound to one window.
pub struct FrameLoop<W: ContextWindow, H: RenderHooks<W>> {
    shared: Arc<Shared<W>>,
    window: Arc<W>,
    hooks: H,
    clock: FrameClock,
    /// Whole frames the clock has paid out that are not rendered yet.
    outstanding: u32,
    fps: FpsCounter,
    /// Renderables being drawn this frame; swapped with the queue's buffer.
    working: Vec<Arc<dyn Renderable<W>>>,
    origin: Instant,
    log_fps: bool,
    acquired: bool,
}

impl<W: ContextWindow, H: RenderHooks<W>> FrameLoop<W, H> {
    /// Creates a loop for `window` and a handle for producers.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `config.frame_cap <= 0`.
    pub fn new(window: Arc<W>, hooks: H, config: &RenderConfig) -> LumenResult<(Self, RenderHandle<W>)> {
        let interval = FrameInterval::from_frame_cap(config.frame_cap)?;
        Ok(Self::from_parts(window, hooks, interval, config.log_fps))
    }

    pub(crate) fn from_parts(
        window: Arc<W>,
        hooks: H,
        interval: FrameInterval,
        log_fps: bool,
    ) -> (Self, RenderHandle<W>) {
        let shared = Arc::new(Shared::new(interval));
        let handle = RenderHandle {
            shared: Arc::clone(&shared),
        };
        let frame_loop = Self {
            clock: FrameClock::new(Arc::clone(&shared.interval)),
            outstanding: 0,
            fps: FpsCounter::new(shared.fps.clone()),
            shared,
            window,
            hooks,
            working: Vec::new(),
            origin: Instant::now(),
            log_fps,
            acquired: false,
        };
        (frame_loop, handle)
    }

    /// Makes the context current on the calling thread and runs the init hook.
    ///
    /// Every later call on this loop must come from the same thread. If the
    /// loop was closed before it started this does nothing, and the next
    /// [`FrameLoop::run`] returns at once.
    ///
    /// # Errors
    ///
    /// `ContextAcquisitionFailure` or an init `HookFailure`; the loop is
    /// shut down before the error is returned. `InvalidState` if already
    /// started.
    pub fn acquire(&mut self) -> LumenResult<()> {
        if !self.shared.state.transition(WorkerState::Created, WorkerState::Running) {
            return match self.shared.state.load() {
                WorkerState::StopRequested => Ok(()),
                _ => Err(LumenError::InvalidState("frame loop already started")),
            };
        }

        self.shared.tasks.bind_to_current_thread();

        if let Err(err) = self.window.make_current() {
            let err = LumenError::ContextAcquisitionFailure(err.to_string());
            tracing::error!(error = %err, "render loop failed to start");
            self.shutdown();
            return Err(err);
        }
        self.acquired = true;

        if let Err(err) = self.hooks.init(&self.window) {
            let err = LumenError::hook(Hook::Init, &err);
            tracing::error!(error = %err, "render loop failed to start");
            self.shutdown();
            return Err(err);
        }

        self.clock.reset();
        self.outstanding = 0;
        tracing::info!(interval = ?self.shared.interval.as_duration(), "render loop started");
        Ok(())
    }

    /// Nanoseconds since this loop was created, on the monotonic clock.
    #[must_use]
    pub fn now_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// Runs one iteration at time `now_nanos`.
    ///
    /// Renders at most one frame. When more than one interval has elapsed
    /// the rest stay in [`FrameReport::backlog`] and are rendered by the
    /// following steps, one each, whatever their timestamps.
    ///
    /// # Errors
    ///
    /// A render or renderable `HookFailure`. The loop must not be stepped
    /// again; call [`FrameLoop::shutdown`].
    pub fn step(&mut self, now_nanos: u64) -> LumenResult<FrameReport> {
        let frames_due = self.clock.tick(now_nanos);
        self.outstanding = self.outstanding.saturating_add(frames_due);
        let mut report = FrameReport {
            frames_due,
            ..FrameReport::default()
        };

        if self.outstanding > 0 {
            report.tasks_run = self.shared.tasks.drain_and_run_all();

            self.hooks
                .render(&self.window)
                .map_err(|e| LumenError::hook(Hook::Render, &e))?;

            report.renderables_drawn = self.draw_renderables()?;

            self.window.present_frame();
            self.fps.record_frame();
            report.rendered = true;

            self.outstanding -= 1;
            report.backlog = self.outstanding;
            if frames_due > 1 {
                tracing::debug!(backlog = report.backlog, "render loop catching up");
            }
        }

        report.fps = self.fps.update(now_nanos);
        if let Some(fps) = report.fps {
            if self.log_fps {
                tracing::info!(fps, "frame rate");
            }
        }

        Ok(report)
    }

    fn draw_renderables(&mut self) -> LumenResult<usize> {
        self.shared.renderables.drain_into(&mut self.working);
        let drawn = self.working.len();

        let window = &*self.window;
        let outcome = self.working.iter().try_for_each(|item| item.render(window));
        // drawn once, then released, whether or not drawing succeeded
        self.working.clear();

        outcome.map_err(|e| LumenError::hook(Hook::Renderable, &e))?;
        Ok(drawn)
    }

    /// Steps until the loop is closed, sleeping between frames. A backlog
    /// is rendered back to back.
    ///
    /// # Errors
    ///
    /// The first `HookFailure`; the state is left for
    /// [`FrameLoop::shutdown`] to settle.
    pub fn run(&mut self) -> LumenResult<()> {
        while self.shared.state.load() == WorkerState::Running {
            let now = self.now_nanos();
            if self.step(now)?.backlog > 0 {
                continue;
            }
            let spent = Duration::from_nanos(self.now_nanos().saturating_sub(now));
            self.pace(spent);
        }
        Ok(())
    }

    /// Sleeps until shortly before the next frame is due. `spent` is the
    /// time already used since the last tick.
    fn pace(&self, spent: Duration) {
        let remaining = self.clock.time_until_next_frame().saturating_sub(spent);
        match pause_for(remaining) {
            Some(pause) => thread::sleep(pause),
            None => thread::yield_now(),
        }
    }

    /// Acquires, runs until closed, then shuts down.
    ///
    /// # Errors
    ///
    /// Whatever [`FrameLoop::acquire`] or [`FrameLoop::run`] returned.
    pub fn drive(&mut self) -> LumenResult<()> {
        self.acquire()?;
        let outcome = self.run();
        if let Err(err) = &outcome {
            tracing::error!(error = %err, "render loop aborted");
        }
        self.shutdown();
        outcome
    }

    /// Cancels pending tasks, drops pending renderables, releases the
    /// context and marks the loop `Stopped`. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let cancelled = self.shared.tasks.close();
        let dropped = self.shared.renderables.close() + self.working.len();
        self.working.clear();

        if self.acquired {
            self.window.release_current();
            self.acquired = false;
        }

        if self.shared.state.load() != WorkerState::Stopped {
            self.shared.state.store(WorkerState::Stopped);
            tracing::info!(cancelled, dropped, "render loop stopped");
        }
    }

    /// Returns a new producer handle.
    #[must_use]
    pub fn handle(&self) -> RenderHandle<W> {
        RenderHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns the window this loop renders to.
    #[must_use]
    pub fn window(&self) -> &Arc<W> {
        &self.window
    }
}

/// How long to sleep with `remaining` left until the next frame. `None` when
/// the frame is already due.
fn pause_for(remaining: Duration) -> Option<Duration> {
    if remaining.is_zero() {
        None
    } else if remaining > SLEEP_THRESHOLD {
        Some((remaining - WAKE_MARGIN).min(MAX_SLEEP))
    } else {
        Some(remaining)
    }
}

impl<W: ContextWindow, H: RenderHooks<W>> Drop for FrameLoop<W, H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<W: ContextWindow, H: RenderHooks<W>> std::fmt::Debug for FrameLoop<W, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("state", &self.shared.state.load())
            .field("acquired", &self.acquired)
            .field("debt", &self.clock.debt())
            .field("backlog", &self.outstanding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::ContextError;
    use lumen_core::HookResult;
    use parking_lot::Mutex;

    const SECOND: u64 = 1_000_000_000;

    /// Window that records every call the loop makes on it.
    #[derive(Default)]
    struct RecordingWindow {
        log: Mutex<Vec<String>>,
        refuse_context: bool,
    }

    impl RecordingWindow {
        fn push(&self, entry: &str) {
            self.log.lock().push(entry.to_string());
        }

        fn entries(&self) -> Vec<String> {
            self.log.lock().clone()
        }
    }

    impl ContextWindow for RecordingWindow {
        fn make_current(&self) -> Result<(), ContextError> {
            if self.refuse_context {
                return Err(ContextError::Platform("no display".into()));
            }
            self.push("make_current");
            Ok(())
        }

        fn release_current(&self) {
            self.push("release_current");
        }

        fn present_frame(&self) {
            self.push("present");
        }

        fn poll_events(&self) {}

        fn exit_requested(&self) -> bool {
            false
        }
    }

    struct RecordingHooks {
        fail_init: bool,
        fail_render_at: Option<usize>,
        frames: usize,
    }

    impl RecordingHooks {
        fn ok() -> Self {
            Self {
                fail_init: false,
                fail_render_at: None,
                frames: 0,
            }
        }
    }

    impl RenderHooks<RecordingWindow> for RecordingHooks {
        fn init(&mut self, window: &RecordingWindow) -> HookResult {
            window.push("init");
            if self.fail_init {
                return Err("shader compile failed".into());
            }
            Ok(())
        }

        fn render(&mut self, window: &RecordingWindow) -> HookResult {
            self.frames += 1;
            window.push("render");
            if self.fail_render_at == Some(self.frames) {
                return Err("device lost".into());
            }
            Ok(())
        }
    }

    fn frame_loop(
        cap: i32,
        hooks: RecordingHooks,
    ) -> (FrameLoop<RecordingWindow, RecordingHooks>, RenderHandle<RecordingWindow>, Arc<RecordingWindow>) {
        let window = Arc::new(RecordingWindow::default());
        let config = RenderConfig {
            frame_cap: cap,
            log_fps: false,
        };
        let (frame_loop, handle) = FrameLoop::new(Arc::clone(&window), hooks, &config).unwrap();
        (frame_loop, handle, window)
    }

    fn log_renderable(label: &'static str) -> Arc<dyn Renderable<RecordingWindow>> {
        Arc::new(move |window: &RecordingWindow| -> HookResult {
            window.push(label);
            Ok(())
        })
    }

    #[test]
    fn test_frame_order() {
        let (mut frame_loop, handle, window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        let task_window = Arc::clone(&window);
        let task = handle.submit(move || task_window.push("task"));
        assert!(handle.enqueue(log_renderable("renderable")));

        let first = frame_loop.step(0).unwrap();
        assert!(!first.rendered);

        let report = frame_loop.step(SECOND / 2).unwrap();
        assert!(report.rendered);
        assert_eq!(report.tasks_run, 1);
        assert_eq!(report.renderables_drawn, 1);
        task.wait().unwrap();

        assert_eq!(
            window.entries(),
            vec!["make_current", "init", "task", "render", "renderable", "present"]
        );
    }

    #[test]
    fn test_no_frame_before_interval_elapses() {
        let (mut frame_loop, handle, window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();
        let task = handle.submit(|| 1);

        frame_loop.step(0).unwrap();
        let report = frame_loop.step(SECOND / 4).unwrap();

        assert_eq!(report, FrameReport::default());
        assert!(task.try_wait().is_none());
        assert!(!window.entries().contains(&"present".to_string()));
    }

    #[test]
    fn test_renderables_drawn_once_in_order() {
        let (mut frame_loop, handle, window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();
        for label in ["a", "b", "c"] {
            handle.enqueue(log_renderable(label));
        }

        frame_loop.step(0).unwrap();
        frame_loop.step(SECOND / 2).unwrap();
        let second = frame_loop.step(SECOND).unwrap();

        assert_eq!(second.renderables_drawn, 0);
        let drawn: Vec<String> = window
            .entries()
            .into_iter()
            .filter(|entry| entry.len() == 1)
            .collect();
        assert_eq!(drawn, vec!["a", "b", "c"]);
        assert_eq!(handle.pending_renderables(), 0);
    }

    #[test]
    fn test_renderable_handles_released_after_frame() {
        let (mut frame_loop, handle, _window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        let item = log_renderable("x");
        handle.enqueue(Arc::clone(&item));
        assert_eq!(Arc::strong_count(&item), 2);

        frame_loop.step(0).unwrap();
        frame_loop.step(SECOND / 2).unwrap();
        assert_eq!(Arc::strong_count(&item), 1);
    }

    #[test]
    fn test_task_submitted_during_frame_waits_for_next_frame() {
        let (mut frame_loop, handle, _window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        let inner = handle.clone();
        let outer = handle.submit(move || inner.submit(|| "inner"));

        frame_loop.step(0).unwrap();
        assert_eq!(frame_loop.step(SECOND / 2).unwrap().tasks_run, 1);
        let inner = outer.wait().unwrap();
        assert!(inner.try_wait().is_none());

        assert_eq!(frame_loop.step(SECOND).unwrap().tasks_run, 1);
        assert_eq!(inner.wait().unwrap(), "inner");
    }

    #[test]
    fn test_stall_is_caught_up() {
        let (mut frame_loop, handle, window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        frame_loop.step(0).unwrap();
        let report = frame_loop.step(3 * SECOND / 2).unwrap();
        assert_eq!(report.frames_due, 3);
        assert!(report.rendered);
        assert_eq!(report.backlog, 2);
        assert_eq!(report.fps, Some(1));

        // the backlog drains one frame per step, long before the next interval
        let millis = SECOND / 1000;
        let mut backlogs = Vec::new();
        for i in 1..=10 {
            let report = frame_loop.step(3 * SECOND / 2 + i * millis).unwrap();
            assert_eq!(report.frames_due, 0);
            if report.rendered {
                backlogs.push(report.backlog);
            }
        }
        assert_eq!(backlogs, vec![1, 0]);

        let presents = window.entries().iter().filter(|entry| *entry == "present").count();
        assert_eq!(presents, 3);

        // both caught-up frames count toward the next window
        let report = frame_loop.step(5 * SECOND / 2).unwrap();
        assert!(report.rendered);
        assert_eq!(report.fps, Some(3));
        assert_eq!(handle.fps(), 3);
    }

    #[test]
    fn test_backlog_drains_without_time_passing() {
        let (mut frame_loop, _handle, _window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        frame_loop.step(0).unwrap();
        assert_eq!(frame_loop.step(SECOND).unwrap().backlog, 1);
        assert!(frame_loop.step(SECOND).unwrap().rendered);
        assert!(!frame_loop.step(SECOND).unwrap().rendered);
    }

    #[test]
    fn test_pause_never_spins() {
        assert_eq!(pause_for(Duration::ZERO), None);
        // short remainders are slept in full
        assert_eq!(pause_for(Duration::from_micros(300)), Some(Duration::from_micros(300)));
        assert_eq!(pause_for(SLEEP_THRESHOLD), Some(SLEEP_THRESHOLD));
        assert_eq!(pause_for(Duration::from_millis(16)), Some(Duration::from_micros(15_500)));
        // long intervals are slept in slices so a close is noticed
        assert_eq!(pause_for(Duration::from_secs(10)), Some(MAX_SLEEP));
        assert_eq!(pause_for(Duration::MAX), Some(MAX_SLEEP));
    }

    #[test]
    fn test_fps_published_after_one_second() {
        let (mut frame_loop, handle, _window) = frame_loop(1000, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        let step = SECOND / 1000;
        let mut published = None;
        for i in 0..=1000 {
            if let Some(fps) = frame_loop.step(i * step).unwrap().fps {
                published = Some(fps);
            }
        }

        assert_eq!(published, Some(1000));
        assert_eq!(handle.fps(), 1000);
    }

    #[test]
    fn test_frame_cap_change_applies_on_next_tick() {
        let (mut frame_loop, handle, _window) = frame_loop(1, RecordingHooks::ok());
        frame_loop.acquire().unwrap();
        frame_loop.step(0).unwrap();

        handle.set_frame_cap(4).unwrap();
        assert_eq!(handle.frame_interval(), Duration::from_millis(250));
        assert!(frame_loop.step(SECOND / 4).unwrap().rendered);

        assert!(handle.set_frame_cap(0).is_err());
        assert_eq!(handle.frame_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_context_failure_stops_loop() {
        let window = Arc::new(RecordingWindow {
            refuse_context: true,
            ..RecordingWindow::default()
        });
        let (mut frame_loop, handle) =
            FrameLoop::new(window, RecordingHooks::ok(), &RenderConfig::default()).unwrap();
        let pending = handle.submit(|| ());

        let err = frame_loop.acquire().unwrap_err();
        assert!(matches!(err, LumenError::ContextAcquisitionFailure(ref msg) if msg.contains("no display")));
        assert_eq!(handle.state(), WorkerState::Stopped);
        assert_eq!(pending.wait().unwrap_err(), LumenError::Cancelled);
    }

    #[test]
    fn test_init_failure_releases_context() {
        let hooks = RecordingHooks {
            fail_init: true,
            ..RecordingHooks::ok()
        };
        let (mut frame_loop, handle, window) = frame_loop(60, hooks);

        let err = frame_loop.acquire().unwrap_err();
        assert!(matches!(err, LumenError::HookFailure { hook: Hook::Init, .. }));
        assert_eq!(window.entries(), vec!["make_current", "init", "release_current"]);
        assert_eq!(handle.state(), WorkerState::Stopped);
    }

    #[test]
    fn test_render_failure_is_returned() {
        let hooks = RecordingHooks {
            fail_render_at: Some(2),
            ..RecordingHooks::ok()
        };
        let (mut frame_loop, _handle, window) = frame_loop(2, hooks);
        frame_loop.acquire().unwrap();

        frame_loop.step(0).unwrap();
        frame_loop.step(SECOND / 2).unwrap();
        let err = frame_loop.step(SECOND).unwrap_err();

        assert_eq!(
            err,
            LumenError::HookFailure {
                hook: Hook::Render,
                reason: "device lost".into()
            }
        );
        let presents = window.entries().iter().filter(|entry| *entry == "present").count();
        assert_eq!(presents, 1);
    }

    #[test]
    fn test_renderable_failure_is_returned() {
        let (mut frame_loop, handle, _window) = frame_loop(2, RecordingHooks::ok());
        frame_loop.acquire().unwrap();
        handle.enqueue(Arc::new(|_: &RecordingWindow| -> HookResult { Err("bad mesh".into()) }));

        frame_loop.step(0).unwrap();
        let err = frame_loop.step(SECOND / 2).unwrap_err();
        assert!(matches!(err, LumenError::HookFailure { hook: Hook::Renderable, .. }));
    }

    #[test]
    fn test_run_returns_once_closed() {
        let (mut frame_loop, handle, _window) = frame_loop(60, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        handle.close();
        assert_eq!(handle.state(), WorkerState::StopRequested);
        frame_loop.run().unwrap();
    }

    #[test]
    fn test_shutdown_resolves_everything() {
        let (mut frame_loop, handle, window) = frame_loop(60, RecordingHooks::ok());
        frame_loop.acquire().unwrap();

        let pending = handle.submit(|| 5);
        handle.enqueue(log_renderable("never"));
        frame_loop.shutdown();

        assert_eq!(pending.wait().unwrap_err(), LumenError::Cancelled);
        assert_eq!(handle.pending_renderables(), 0);
        assert_eq!(handle.state(), WorkerState::Stopped);
        assert_eq!(window.entries().last().map(String::as_str), Some("release_current"));

        assert!(!handle.enqueue(log_renderable("late")));
        assert_eq!(handle.submit(|| 1).wait().unwrap_err(), LumenError::Cancelled);
    }

    #[test]
    fn test_closed_before_start() {
        let (mut frame_loop, handle, window) = frame_loop(60, RecordingHooks::ok());
        handle.close();

        frame_loop.drive().unwrap();
        assert!(window.entries().is_empty());
        assert_eq!(handle.state(), WorkerState::Stopped);
    }

    #[test]
    fn test_acquire_twice_is_rejected() {
        let (mut frame_loop, _handle, _window) = frame_loop(60, RecordingHooks::ok());
        frame_loop.acquire().unwrap();
        assert!(matches!(frame_loop.acquire(), Err(LumenError::InvalidState(_))));
    }

    #[test]
    fn test_closure_hooks() {
        let window = Arc::new(RecordingWindow::default());
        let mut frames = 0;
        let hooks = move |window: &RecordingWindow| -> HookResult {
            frames += 1;
            window.push(&format!("frame {frames}"));
            Ok(())
        };
        let (mut frame_loop, _handle) =
            FrameLoop::new(Arc::clone(&window), hooks, &RenderConfig::default()).unwrap();
        frame_loop.acquire().unwrap();
        frame_loop.step(0).unwrap();
        frame_loop.step(SECOND).unwrap();

        assert!(window.entries().contains(&"frame 1".to_string()));
    }
}
