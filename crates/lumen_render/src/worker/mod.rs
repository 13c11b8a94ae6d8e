//! # Render Worker
//!
//! The render loop, split in two:
//!
//! - [`FrameLoop`]: one paced iteration at a time, no thread of its own
//! - [`RenderWorker`]: runs a `FrameLoop` on a dedicated thread
//!
//! Producers on other threads talk to either through a [`RenderHandle`].

mod frame_loop;
mod handle;
mod hooks;
mod render_worker;
mod state;

pub use frame_loop::{FrameLoop, FrameReport};
pub use handle::RenderHandle;
pub use hooks::RenderHooks;
pub use render_worker::{RenderWorker, RENDER_THREAD_NAME};
pub use state::WorkerState;
