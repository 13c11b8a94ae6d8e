//! Swap-drained handoff of drawable handles.
//!
//! ```text
//! Frame N:
//!   producers  ──enqueue──> [pending: Vec]       worker renders [working: Vec]
//!
//! drain_into (one lock, one pointer swap):
//!   [pending] <──swap──> [working]
//!
//! Frame N+1:
//!   producers  ──enqueue──> [old working, cleared]  worker renders [old pending]
//! ```
//!
//! Both vectors keep their allocations, so steady state allocates nothing.
//!
//! Closing happens under the same lock as `enqueue`, so once `close` returns
//! no handle can slip in behind it.

use std::sync::Arc;

use parking_lot::Mutex;

struct Pending<R: ?Sized> {
    items: Vec<Arc<R>>,
    closed: bool,
}

/// Multi-producer, single-consumer queue of shared handles.
///
/// `R` is usually `dyn Renderable<C>`.
pub struct RenderableQueue<R: ?Sized> {
    /// Items appended since the last drain, plus the closed flag. The lock is
    /// held for a push or a swap, never per item on the consumer side.
    pending: Mutex<Pending<R>>,
}

impl<R: ?Sized> RenderableQueue<R> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` handles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(Pending {
                items: Vec::with_capacity(capacity),
                closed: false,
            }),
        }
    }

    /// Appends a handle. Never waits on the consumer beyond a single push.
    ///
    /// Returns false, dropping `item`, once the queue is closed.
    pub fn enqueue(&self, item: Arc<R>) -> bool {
        let mut pending = self.pending.lock();
        if pending.closed {
            return false;
        }
        pending.items.push(item);
        true
    }

    /// Moves every pending handle into `buffer`, in enqueue order.
    ///
    /// With an empty `buffer` (the normal case) this is a vector swap: the
    /// queue takes over `buffer`'s allocation for the next frame. A non-empty
    /// `buffer` is appended to instead. Returns the number of handles moved.
    pub fn drain_into(&self, buffer: &mut Vec<Arc<R>>) -> usize {
        let before = buffer.len();
        {
            let mut pending = self.pending.lock();
            if buffer.is_empty() {
                std::mem::swap(&mut pending.items, buffer);
            } else {
                buffer.append(&mut pending.items);
            }
        }
        buffer.len() - before
    }

    /// Discards every pending handle. Returns how many were dropped.
    ///
    /// Handles are released after the lock is let go.
    pub fn clear(&self) -> usize {
        let dropped = std::mem::take(&mut self.pending.lock().items);
        dropped.len()
    }

    /// Rejects all further `enqueue` calls and discards what is pending, in
    /// one critical section. Returns how many were dropped. Idempotent.
    pub fn close(&self) -> usize {
        let dropped = {
            let mut pending = self.pending.lock();
            pending.closed = true;
            std::mem::take(&mut pending.items)
        };
        dropped.len()
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pending.lock().closed
    }

    /// Returns the number of pending handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().items.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().items.is_empty()
    }
}

impl<R: ?Sized> Default for RenderableQueue<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> std::fmt::Debug for RenderableQueue<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.pending.lock();
        f.debug_struct("RenderableQueue")
            .field("pending", &pending.items.len())
            .field("closed", &pending.closed)
            .finish()
    }
}
