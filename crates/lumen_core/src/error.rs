//! # LUMEN Error Types
//!
//! All errors that can surface from the render loop and its channels.

use thiserror::Error;

/// Boxed error returned by embedder-supplied hooks and renderables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of an init hook, render hook or renderable draw.
pub type HookResult = Result<(), BoxError>;

/// Errors that can occur in the render loop.
///
/// Every variant is cheap to clone so the same failure can be delivered to a
/// task's result handle and logged by the worker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LumenError {
    /// A frame cap, interval or config value was rejected. Never clamped.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A submitted task returned an error or panicked.
    #[error("task failed: {0}")]
    TaskFailure(String),

    /// The task was still pending when the worker shut down.
    #[error("task cancelled: render worker shut down")]
    Cancelled,

    /// The rendering context could not be made current on the worker thread.
    #[error("failed to acquire rendering context: {0}")]
    ContextAcquisitionFailure(String),

    /// An init hook, render hook or renderable failed. Fatal to the worker.
    #[error("{hook} hook failed: {reason}")]
    HookFailure {
        /// Which hook failed.
        hook: Hook,
        /// Rendered error message.
        reason: String,
    },

    /// A lifecycle operation was called in the wrong state.
    #[error("invalid worker state: {0}")]
    InvalidState(&'static str),

    /// The render thread panicked and could not be joined cleanly.
    #[error("render thread panicked: {0}")]
    WorkerPanicked(String),

    /// Blocking on a task from the render thread itself would never return.
    #[error("cannot wait for a task from the render thread")]
    WouldDeadlock,
}

/// Identifies the embedder-supplied code that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// The one-time init hook.
    Init,
    /// The per-frame render hook.
    Render,
    /// A queued renderable.
    Renderable,
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::Render => "render",
            Self::Renderable => "renderable",
        })
    }
}

impl LumenError {
    /// Wraps a hook error, keeping only its message.
    #[must_use]
    pub fn hook(hook: Hook, err: &BoxError) -> Self {
        Self::HookFailure {
            hook,
            reason: err.to_string(),
        }
    }
}

/// Result type for LUMEN operations.
pub type LumenResult<T> = Result<T, LumenError>;
