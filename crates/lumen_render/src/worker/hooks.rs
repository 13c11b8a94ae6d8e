use lumen_core::HookResult;

/// Application code run by the render loop with the context current.
///
/// A plain `FnMut(&W) -> HookResult` closure is a `RenderHooks` whose
/// `init` does nothing.
pub trait RenderHooks<W: ?Sized>: Send + 'static {
    /// Runs once, after the context is made current and before the first frame.
    ///
    /// # Errors
    ///
    /// An error aborts start-up; the worker never reaches its first frame.
    fn init(&mut self, window: &W) -> HookResult {
        let _ = window;
        Ok(())
    }

    /// Runs once per frame, after queued tasks and before queued renderables.
    ///
    /// # Errors
    ///
    /// An error stops the loop and is returned from `clean_up`.
    fn render(&mut self, window: &W) -> HookResult;
}

impl<W, F> RenderHooks<W> for F
where
    W: ?Sized,
    F: FnMut(&W) -> HookResult + Send + 'static,
{
    fn render(&mut self, window: &W) -> HookResult {
        self(window)
    }
}
