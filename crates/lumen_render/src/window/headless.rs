//! A window without a surface.
//!
//! Keeps the bookkeeping a real window would (which thread holds the
//! context, how many frames were presented, the current framebuffer size)
//! and takes its input from [`HeadlessWindow::push_event`] instead of a
//! platform event loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::events::{EventDispatcher, EventKind, WindowEvent};
use super::{ContextError, ContextWindow};
use crate::config::WindowConfig;

/// Sets a window's exit flag from anywhere, including its own listeners.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    flag: Arc<AtomicBool>,
}

impl CloseHandle {
    /// Marks the window as asked to close.
    pub fn request_close(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

/// In-memory [`ContextWindow`].
pub struct HeadlessWindow {
    config: WindowConfig,
    /// Framebuffer size, updated by resize events.
    size: Mutex<(u32, u32)>,
    /// Thread the context is current on.
    current: Mutex<Option<ThreadId>>,
    presented: AtomicU64,
    exit: Arc<AtomicBool>,
    events_tx: Sender<WindowEvent>,
    events_rx: Receiver<WindowEvent>,
    /// Only locked by `poll_events` and `on`, both on the owning thread.
    dispatcher: Mutex<EventDispatcher>,
}

impl HeadlessWindow {
    /// Creates a window described by `config`.
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        let (events_tx, events_rx) = unbounded();
        tracing::debug!(
            width = config.width,
            height = config.height,
            title = %config.title,
            "headless window created"
        );
        Self {
            size: Mutex::new((config.width, config.height)),
            config,
            current: Mutex::new(None),
            presented: AtomicU64::new(0),
            exit: Arc::new(AtomicBool::new(false)),
            events_tx,
            events_rx,
            dispatcher: Mutex::new(EventDispatcher::new()),
        }
    }

    /// Returns the configuration the window was created with.
    #[must_use]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Returns the current framebuffer size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        *self.size.lock()
    }

    /// Registers a listener, run by [`ContextWindow::poll_events`].
    ///
    /// Must not be called from inside a listener.
    pub fn on<F>(&self, kind: EventKind, listener: F)
    where
        F: FnMut(&WindowEvent) + Send + 'static,
    {
        self.dispatcher.lock().on(kind, listener);
    }

    /// Queues a synthetic input event. Callable from any thread; delivered
    /// on the next `poll_events`.
    pub fn push_event(&self, event: WindowEvent) {
        // we hold the receiver, so the channel cannot be disconnected
        let _ = self.events_tx.send(event);
    }

    /// Returns a handle that can set the exit flag without borrowing the window.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            flag: Arc::clone(&self.exit),
        }
    }

    /// Marks the window as asked to close.
    pub fn request_close(&self) {
        self.exit.store(true, Ordering::Release);
    }

    /// Returns how many frames were presented by the context's thread.
    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented.load(Ordering::Acquire)
    }

    /// Returns the thread the context is current on, if any.
    #[must_use]
    pub fn current_thread(&self) -> Option<ThreadId> {
        *self.current.lock()
    }

    fn apply(&self, event: &WindowEvent) {
        match *event {
            WindowEvent::FramebufferResize { width, height } if self.config.resizable => {
                *self.size.lock() = (width, height);
            }
            WindowEvent::CloseRequest => self.request_close(),
            _ => {}
        }
    }
}

impl ContextWindow for HeadlessWindow {
    fn make_current(&self) -> Result<(), ContextError> {
        let me = thread::current().id();
        let mut current = self.current.lock();
        match *current {
            Some(owner) if owner != me => Err(ContextError::AlreadyCurrent(format!("{owner:?}"))),
            _ => {
                *current = Some(me);
                Ok(())
            }
        }
    }

    fn release_current(&self) {
        let me = thread::current().id();
        let mut current = self.current.lock();
        if *current == Some(me) {
            *current = None;
        }
    }

    fn present_frame(&self) {
        if self.current_thread() == Some(thread::current().id()) {
            self.presented.fetch_add(1, Ordering::AcqRel);
        } else {
            tracing::warn!("present_frame called without a current context");
        }
    }

    fn poll_events(&self) {
        let mut dispatcher = self.dispatcher.lock();
        for event in self.events_rx.try_iter() {
            self.apply(&event);
            dispatcher.dispatch(&event);
        }
    }

    fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl std::fmt::Debug for HeadlessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWindow")
            .field("title", &self.config.title)
            .field("size", &self.size())
            .field("presented", &self.presented_frames())
            .field("exit_requested", &self.exit_requested())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Action, Key};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_default_size() {
        let window = HeadlessWindow::default();
        assert_eq!(window.size(), (640, 480));
        assert!(!window.exit_requested());
    }

    #[test]
    fn test_context_is_exclusive_to_one_thread() {
        let window = Arc::new(HeadlessWindow::default());
        window.make_current().unwrap();

        let other = Arc::clone(&window);
        let result = thread::spawn(move || other.make_current()).join().unwrap();
        assert!(matches!(result, Err(ContextError::AlreadyCurrent(_))));

        window.release_current();
        let other = Arc::clone(&window);
        let result = thread::spawn(move || other.make_current()).join().unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_present_counts_only_on_current_thread() {
        let window = HeadlessWindow::default();
        window.present_frame();
        assert_eq!(window.presented_frames(), 0);

        window.make_current().unwrap();
        window.present_frame();
        window.present_frame();
        assert_eq!(window.presented_frames(), 2);
    }

    #[test]
    fn test_events_are_delivered_on_poll() {
        let window = HeadlessWindow::default();
        let keys = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&keys);
        window.on(EventKind::Key, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        window.push_event(WindowEvent::key(Key::Char('a'), Action::Press));
        assert_eq!(keys.load(Ordering::SeqCst), 0);

        window.poll_events();
        assert_eq!(keys.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_escape_listener_closes_window() {
        let window = HeadlessWindow::default();
        let close = window.close_handle();
        window.on(EventKind::Key, move |event| {
            if let WindowEvent::Key {
                key: Key::Escape,
                action: Action::Press,
                ..
            } = event
            {
                close.request_close();
            }
        });

        window.push_event(WindowEvent::key(Key::Escape, Action::Press));
        window.poll_events();
        assert!(window.exit_requested());
    }

    #[test]
    fn test_resize_and_close_request() {
        let window = HeadlessWindow::default();
        window.push_event(WindowEvent::FramebufferResize { width: 1280, height: 720 });
        window.push_event(WindowEvent::CloseRequest);
        window.poll_events();

        assert_eq!(window.size(), (1280, 720));
        assert!(window.exit_requested());
    }

    #[test]
    fn test_fixed_size_window_ignores_resize() {
        let window = HeadlessWindow::new(WindowConfig {
            resizable: false,
            ..WindowConfig::default()
        });
        window.push_event(WindowEvent::FramebufferResize { width: 10, height: 10 });
        window.poll_events();
        assert_eq!(window.size(), (640, 480));
    }
}
