//! # Window Collaborator
//!
//! The render loop does not create windows. It is handed something that
//! implements [`ContextWindow`] and only ever calls these operations:
//!
//! ```text
//!   render thread                      owning (main) thread
//!   ─────────────                      ────────────────────
//!   make_current   (once, at start)    poll_events   (every iteration)
//!   present_frame  (every frame)       exit_requested
//!   release_current (once, at stop)
//! ```
//!
//! A platform window (GLFW, winit, EGL, ...) implements this trait in the
//! embedding application. [`HeadlessWindow`] is the in-tree implementation.

mod events;
mod headless;

pub use events::{Action, EventDispatcher, EventKind, Key, Modifiers, MouseButton, WindowEvent};
pub use headless::{CloseHandle, HeadlessWindow};

use thiserror::Error;

/// Why a rendering context could not be made current.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The context is current on another thread.
    #[error("context is already current on thread {0}")]
    AlreadyCurrent(String),

    /// The window (and its context) has been destroyed.
    #[error("window has been destroyed")]
    Destroyed,

    /// Failure reported by the windowing platform.
    #[error("platform error: {0}")]
    Platform(String),
}

/// What the render loop needs from a window.
///
/// Implementations are shared between the owning thread and the render
/// thread, hence `Send + Sync`. The context is never touched from any
/// thread other than the one that made it current.
pub trait ContextWindow: Send + Sync + 'static {
    /// Makes the rendering context current on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if the context cannot be bound here.
    fn make_current(&self) -> Result<(), ContextError>;

    /// Releases the context from the calling thread.
    fn release_current(&self) {}

    /// Presents the completed frame (buffer swap).
    fn present_frame(&self);

    /// Pumps pending platform events. Called by the owning thread.
    fn poll_events(&self);

    /// Returns true once the user or the application asked to close.
    fn exit_requested(&self) -> bool;
}
