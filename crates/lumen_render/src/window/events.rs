//! Window input events and per-kind listener dispatch.
//!
//! Listeners are keyed on a fixed [`EventKind`], so registering one is an
//! index into an array rather than a runtime type check.

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// A printable key.
    Char(char),
    /// Any other key, by platform key code.
    Other(u32),
}

/// Button or key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Went down.
    Press,
    /// Went up.
    Release,
    /// Held long enough to auto-repeat.
    Repeat,
}

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Either shift key.
    pub shift: bool,
    /// Either control key.
    pub control: bool,
    /// Either alt key.
    pub alt: bool,
    /// Either super / command key.
    pub super_key: bool,
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Extra buttons, by platform index.
    Other(u8),
}

/// An input or window-state event delivered on the owning thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// A key changed state.
    Key {
        /// Logical key.
        key: Key,
        /// Platform scancode.
        scancode: i32,
        /// Transition.
        action: Action,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// The framebuffer was resized.
    FramebufferResize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The cursor moved.
    CursorMove {
        /// X in window coordinates.
        x: f64,
        /// Y in window coordinates.
        y: f64,
    },
    /// A mouse button changed state.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// Transition.
        action: Action,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Scroll wheel or trackpad scroll.
    Scroll {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// The user asked to close the window.
    CloseRequest,
}

impl WindowEvent {
    /// Shorthand for a key event without modifiers.
    #[must_use]
    pub fn key(key: Key, action: Action) -> Self {
        Self::Key {
            key,
            scancode: 0,
            action,
            modifiers: Modifiers::default(),
        }
    }

    /// Returns the listener slot this event is dispatched to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Key { .. } => EventKind::Key,
            Self::FramebufferResize { .. } => EventKind::FramebufferResize,
            Self::CursorMove { .. } => EventKind::CursorMove,
            Self::MouseButton { .. } => EventKind::MouseButton,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::CloseRequest => EventKind::CloseRequest,
        }
    }
}

/// Listener slot. One per [`WindowEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// [`WindowEvent::Key`].
    Key = 0,
    /// [`WindowEvent::FramebufferResize`].
    FramebufferResize = 1,
    /// [`WindowEvent::CursorMove`].
    CursorMove = 2,
    /// [`WindowEvent::MouseButton`].
    MouseButton = 3,
    /// [`WindowEvent::Scroll`].
    Scroll = 4,
    /// [`WindowEvent::CloseRequest`].
    CloseRequest = 5,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 6;

    const fn index(self) -> usize {
        self as usize
    }
}

type Listener = Box<dyn FnMut(&WindowEvent) + Send>;

/// Per-kind listener lists, invoked in registration order.
pub struct EventDispatcher {
    listeners: [Vec<Listener>; EventKind::COUNT],
}

impl EventDispatcher {
    /// Creates a dispatcher with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Registers `listener` for every event of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&WindowEvent) + Send + 'static,
    {
        self.listeners[kind.index()].push(Box::new(listener));
    }

    /// Delivers `event` to the listeners of its kind. Returns how many ran.
    pub fn dispatch(&mut self, event: &WindowEvent) -> usize {
        let listeners = &mut self.listeners[event.kind().index()];
        for listener in listeners.iter_mut() {
            listener(event);
        }
        listeners.len()
    }

    /// Returns how many listeners are registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners[kind.index()].len()
    }

    /// Removes every listener registered for `kind`.
    pub fn clear(&mut self, kind: EventKind) {
        self.listeners[kind.index()].clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<usize> = self.listeners.iter().map(Vec::len).collect();
        f.debug_struct("EventDispatcher").field("listeners", &counts).finish()
    }
}
