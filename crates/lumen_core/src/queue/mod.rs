//! # Renderable Queue
//!
//! Producers hand drawable handles to the render thread; the render thread
//! takes the whole pending set once per frame with a single swap.

mod renderable;
mod renderable_queue;

pub use renderable::Renderable;
pub use renderable_queue::RenderableQueue;
