//! # Frame Pacing
//!
//! Everything that decides *when* the render thread draws:
//!
//! - [`FrameInterval`]: target time per frame, retargetable from any thread
//! - [`FrameClock`]: fixed-step accumulator fed with monotonic timestamps
//! - [`FpsCounter`] / [`FpsGauge`]: one-second frame count, published atomically
//!
//! All of it is pure computation over caller-supplied timestamps, so it is
//! deterministic under test.

mod fps;
mod frame_clock;
mod interval;

pub use fps::{FpsCounter, FpsGauge};
pub use frame_clock::FrameClock;
pub use interval::{FrameInterval, DEFAULT_FRAME_CAP, NANOS_PER_SECOND};
