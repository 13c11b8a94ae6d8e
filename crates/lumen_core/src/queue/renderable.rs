use crate::error::HookResult;

/// Something that can draw itself with the render thread's context.
///
/// Handles are queued as `Arc<dyn Renderable<C>>`: the queue shares ownership
/// with whoever tracks the object's lifetime and never copies drawing state.
/// `render` always runs on the render thread with the context current.
pub trait Renderable<C: ?Sized>: Send + Sync {
    /// Issues the draw calls for this object.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the render loop; the context may be corrupt.
    fn render(&self, context: &C) -> HookResult;
}

impl<C, F> Renderable<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> HookResult + Send + Sync,
{
    fn render(&self, context: &C) -> HookResult {
        self(context)
    }
}
