//! # Task Channel
//!
//! Lets any thread run code inside the render thread's context and collect
//! the result through a [`TaskHandle`].

mod channel;
mod handle;

pub use channel::TaskChannel;
pub use handle::TaskHandle;
