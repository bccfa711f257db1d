pub mod decorator;
pub mod geometry;
pub mod registry;
pub mod z_order;

mod window_manager;

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use ratatui::prelude::Rect;

use crate::components::Component;
use crate::content::{DirectionHandler, TemplateId};
use crate::error::ContentError;
use crate::scheduler::TimerId;

pub use window_manager::{WindowDraw, WindowManager};

/// Identifier of one window instance. Assigned from a session-wide counter
/// and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-instance-{}", self.0)
    }
}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (c, r) = (column as i32, row as i32);
        c >= self.x && c < self.right() && r >= self.y && r < self.bottom()
    }

    /// The part of this rectangle that falls inside `bounds`.
    pub fn visible_in(&self, bounds: Rect) -> Rect {
        let bounds_x0 = bounds.x as i32;
        let bounds_y0 = bounds.y as i32;
        let bounds_x1 = bounds_x0 + bounds.width as i32;
        let bounds_y1 = bounds_y0 + bounds.height as i32;
        let x0 = self.x.max(bounds_x0);
        let y0 = self.y.max(bounds_y0);
        let x1 = self.right().min(bounds_x1);
        let y1 = self.bottom().min(bounds_y1);
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }
}

/// Layout a minimized window returns to when it is raised again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreTarget {
    Normal,
    Maximized,
}

/// Visual state of a window.
///
/// - `Normal <-> Maximized` via [`WindowState::toggled_maximize`]
/// - any state `-> Minimized` via [`WindowState::minimized`]
/// - `Minimized -> Normal | Maximized` via [`WindowState::restored`],
///   depending on where it was minimized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized { restore: RestoreTarget },
}

impl WindowState {
    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized { .. })
    }

    pub fn is_maximized(self) -> bool {
        matches!(self, Self::Maximized)
    }

    pub fn minimized(self) -> Self {
        match self {
            Self::Normal => Self::Minimized {
                restore: RestoreTarget::Normal,
            },
            Self::Maximized => Self::Minimized {
                restore: RestoreTarget::Maximized,
            },
            minimized @ Self::Minimized { .. } => minimized,
        }
    }

    pub fn restored(self) -> Self {
        match self {
            Self::Minimized {
                restore: RestoreTarget::Normal,
            } => Self::Normal,
            Self::Minimized {
                restore: RestoreTarget::Maximized,
            } => Self::Maximized,
            visible => visible,
        }
    }

    /// `None` when the toggle does not apply (minimized windows).
    pub fn toggled_maximize(self) -> Option<Self> {
        match self {
            Self::Normal => Some(Self::Maximized),
            Self::Maximized => Some(Self::Normal),
            Self::Minimized { .. } => None,
        }
    }
}

/// State shared between a window and the handles given to its content.
#[derive(Debug, Default)]
pub(crate) struct WindowShared {
    active: Cell<bool>,
}

impl WindowShared {
    pub(crate) fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

/// Read-only view of a window for hosted content.
///
/// Content that finishes work later (a deferred load, a timer) must check
/// [`WindowHandle::is_open`] before touching anything it mounted: the window
/// may have been closed in the meantime.
#[derive(Debug, Clone)]
pub struct WindowHandle {
    id: WindowId,
    shared: Weak<WindowShared>,
}

impl WindowHandle {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// Whether the window currently receives keyboard input. Always `false`
    /// once the window is closed.
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.active.get())
    }
}

pub type Cleanup = Box<dyn FnOnce() -> Result<(), ContentError>>;

/// One open window instance.
pub struct Window {
    pub(crate) id: WindowId,
    pub(crate) template_id: TemplateId,
    pub(crate) title: String,
    pub(crate) z_index: u64,
    pub(crate) state: WindowState,
    pub(crate) geometry: FloatRect,
    pub(crate) original_geometry: Option<FloatRect>,
    pub(crate) owned_timer: Option<TimerId>,
    pub(crate) cleanup: Vec<Cleanup>,
    pub(crate) direction_handler: Option<DirectionHandler>,
    pub(crate) content: Option<Box<dyn Component>>,
    pub(crate) initialized: bool,
    shared: Rc<WindowShared>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("template_id", &self.template_id)
            .field("title", &self.title)
            .field("z_index", &self.z_index)
            .field("state", &self.state)
            .field("geometry", &self.geometry)
            .field("original_geometry", &self.original_geometry)
            .field("owned_timer", &self.owned_timer)
            .field("cleanup", &self.cleanup.len())
            .field("direction_handler", &self.direction_handler.is_some())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl Window {
    pub(crate) fn new(
        id: WindowId,
        template_id: TemplateId,
        title: String,
        geometry: FloatRect,
    ) -> Self {
        Self {
            id,
            template_id,
            title,
            z_index: 0,
            state: WindowState::Normal,
            geometry,
            original_geometry: None,
            owned_timer: None,
            cleanup: Vec::new(),
            direction_handler: None,
            content: None,
            initialized: false,
            shared: Rc::new(WindowShared::default()),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_minimized(&self) -> bool {
        self.state.is_minimized()
    }

    pub fn is_maximized(&self) -> bool {
        self.state.is_maximized()
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized()
    }

    /// Normal-layout rectangle. Unchanged while maximized.
    pub fn geometry(&self) -> FloatRect {
        self.geometry
    }

    pub fn original_geometry(&self) -> Option<FloatRect> {
        self.original_geometry
    }

    pub fn owned_timer(&self) -> Option<TimerId> {
        self.owned_timer
    }

    pub fn cleanup_len(&self) -> usize {
        self.cleanup.len()
    }

    pub fn has_direction_handler(&self) -> bool {
        self.direction_handler.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn handle(&self) -> WindowHandle {
        WindowHandle {
            id: self.id,
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub(crate) fn shared(&self) -> &WindowShared {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_remembers_maximized_layout() {
        let state = WindowState::Maximized.minimized();
        assert!(state.is_minimized());
        assert!(!state.is_maximized());
        assert_eq!(state.restored(), WindowState::Maximized);
        assert_eq!(WindowState::Normal.minimized().restored(), WindowState::Normal);
    }

    #[test]
    fn minimizing_twice_keeps_restore_target() {
        let state = WindowState::Maximized.minimized().minimized();
        assert_eq!(state.restored(), WindowState::Maximized);
    }

    #[test]
    fn toggle_maximize_is_two_state() {
        let once = WindowState::Normal.toggled_maximize();
        assert_eq!(once, Some(WindowState::Maximized));
        assert_eq!(
            once.and_then(WindowState::toggled_maximize),
            Some(WindowState::Normal)
        );
        assert_eq!(WindowState::Normal.minimized().toggled_maximize(), None);
    }

    #[test]
    fn visible_in_clips_negative_offsets() {
        let bounds = Rect::new(0, 0, 80, 24);
        let visible = FloatRect::new(-5, 3, 20, 6).visible_in(bounds);
        assert_eq!(visible, Rect::new(0, 3, 15, 6));
        assert_eq!(FloatRect::new(90, 3, 5, 5).visible_in(bounds), Rect::default());
    }

    #[test]
    fn handle_tracks_liveness() {
        let win = Window::new(
            WindowId::from_raw(1),
            TemplateId::from("about"),
            "About".into(),
            FloatRect::default(),
        );
        let handle = win.handle();
        assert!(handle.is_open());
        win.shared().set_active(true);
        assert!(handle.is_active());
        drop(win);
        assert!(!handle.is_open());
        assert!(!handle.is_active());
    }

    #[test]
    fn display_matches_instance_naming() {
        assert_eq!(WindowId::from_raw(4).to_string(), "window-instance-4");
    }
}
