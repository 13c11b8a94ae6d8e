//! # LUMEN Render
//!
//! A dedicated render thread that owns a window's context and draws at a
//! capped frame rate, while any other thread feeds it work.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         PRODUCER THREADS                         │
//! │   submit(closure) -> TaskHandle        enqueue(Arc<Renderable>)  │
//! └──────────────┬─────────────────────────────────┬─────────────────┘
//!                │ TaskChannel (lock-free)         │ RenderableQueue (swap)
//!                v                                 v
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          RENDER THREAD                           │
//! │  FrameClock ─> tasks ─> render hook ─> renderables ─> present    │
//! │  context current here and nowhere else                           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lumen_render::{HeadlessWindow, HookResult, RenderWorker};
//!
//! let window = Arc::new(HeadlessWindow::default());
//! let mut worker = RenderWorker::new(window, |_: &HeadlessWindow| -> HookResult { Ok(()) });
//! worker.start()?;
//!
//! let answer = worker.submit(|| 6 * 7);
//! assert_eq!(answer.wait()?, 42);
//!
//! worker.close();
//! worker.clean_up()?;
//! # Ok::<(), lumen_render::LumenError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod window;
pub mod worker;

pub use config::{LoggingConfig, LumenConfig, RenderConfig, WindowConfig};
pub use window::{
    Action, CloseHandle, ContextError, ContextWindow, EventDispatcher, EventKind, HeadlessWindow, Key,
    Modifiers, MouseButton, WindowEvent,
};
pub use worker::{FrameLoop, FrameReport, RenderHandle, RenderHooks, RenderWorker, WorkerState, RENDER_THREAD_NAME};

pub use lumen_core::{BoxError, Hook, HookResult, LumenError, LumenResult, Renderable, TaskHandle};
