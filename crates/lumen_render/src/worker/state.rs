use std::sync::atomic::{AtomicU8, Ordering};

/// Worker lifecycle.
///
/// ```text
/// Created ──start──> Running ──close──> StopRequested ──loop exits──> Stopped
///    │                  │                                                ^
///    └──close───────────┴──────── (failure at start or in a hook) ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WorkerState {
    /// Constructed, thread not started.
    Created = 0,
    /// Loop is running.
    Running = 1,
    /// `close` was called; the loop exits after its current iteration.
    StopRequested = 2,
    /// Loop exited and released the context.
    Stopped = 3,
}

impl WorkerState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Created,
            1 => Self::Running,
            2 => Self::StopRequested,
            _ => Self::Stopped,
        }
    }
}

/// [`WorkerState`] readable and writable from any thread.
#[derive(Debug)]
pub(crate) struct AtomicState(AtomicU8);

impl AtomicState {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(WorkerState::Created as u8))
    }

    pub(crate) fn load(&self) -> WorkerState {
        WorkerState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Moves `from -> to` if the state is still `from`.
    pub(crate) fn transition(&self, from: WorkerState, to: WorkerState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Requests a stop from `Created` or `Running`. Returns false if the
    /// worker was already stopping or stopped.
    pub(crate) fn request_stop(&self) -> bool {
        let mut current = self.load();
        loop {
            match current {
                WorkerState::Created | WorkerState::Running => {
                    match self.0.compare_exchange(
                        current as u8,
                        WorkerState::StopRequested as u8,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => return true,
                        Err(actual) => current = WorkerState::from_u8(actual),
                    }
                }
                WorkerState::StopRequested | WorkerState::Stopped => return false,
            }
        }
    }
}
