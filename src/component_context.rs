//! Shared component rendering context
//!
//! `ComponentContext` carries what a window's content may need to know about
//! its window while rendering or handling input, so the `Component` trait
//! stays stable as the shell grows.

/// - `focused`: the hosting window is the active window.
/// - `compact`: the desktop is in compact mode and the window fills it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
    compact: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            compact: false,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn compact(&self) -> bool {
        self.compact
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}
