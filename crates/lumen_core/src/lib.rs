//! # LUMEN Core
//!
//! The timing and handoff primitives behind the LUMEN render loop:
//!
//! - [`FrameClock`]: fixed-step accumulator deciding when a frame is due
//! - [`TaskChannel`]: run closures on the render thread, collect the result
//! - [`RenderableQueue`]: producers append drawables, the render thread
//!   swaps the whole batch out once per frame
//!
//! ## Threading Rules
//!
//! 1. **Producers never wait** - `submit` and `enqueue` return immediately
//! 2. **Bounded frames** - a drain only sees work queued before it started
//! 3. **Nothing is lost** - every task runs once or resolves `Cancelled`
//!
//! ## Example
//!
//! ```rust
//! use lumen_core::{FrameClock, TaskChannel};
//!
//! let mut clock = FrameClock::with_frame_cap(2)?;
//! assert_eq!(clock.tick(0), 0);
//! assert_eq!(clock.tick(500_000_000), 1);
//!
//! let tasks = TaskChannel::new();
//! let handle = tasks.submit(|| 6 * 7);
//! tasks.drain_and_run_all();
//! assert_eq!(handle.wait()?, 42);
//! # Ok::<(), lumen_core::LumenError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod error;
pub mod queue;
pub mod task;

pub use clock::{FpsCounter, FpsGauge, FrameClock, FrameInterval, DEFAULT_FRAME_CAP, NANOS_PER_SECOND};
pub use error::{BoxError, Hook, HookResult, LumenError, LumenResult};
pub use queue::{Renderable, RenderableQueue};
pub use task::{TaskChannel, TaskHandle};
