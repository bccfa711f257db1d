//! Window placement, dragging and maximize/restore.
//!
//! Everything here is a pure function of the window and the desktop area;
//! the window manager decides when to call it.

use ratatui::prelude::Rect;

use super::{FloatRect, Window, WindowId, WindowState};
use crate::config::ShellConfig;
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

/// The viewport minus the taskbar strip at the bottom.
pub fn desktop_area(viewport: Rect, taskbar_height: u16) -> Rect {
    Rect {
        x: viewport.x,
        y: viewport.y,
        width: viewport.width,
        height: viewport.height.saturating_sub(taskbar_height),
    }
}

/// Small viewports present every window full-screen and disable dragging.
pub fn is_compact(viewport: Rect, config: &ShellConfig) -> bool {
    viewport.width < config.compact_width || viewport.height < config.compact_height
}

/// Initial rectangle for a new window, staggered by the number of windows
/// already open so stacked windows stay distinguishable.
pub fn cascade_placement(open_count: usize, desktop: Rect, config: &ShellConfig) -> FloatRect {
    let step = (open_count % config.cascade_wrap.max(1)) as i32;
    let (origin_x, origin_y) = config.cascade_origin;
    let (step_x, step_y) = config.cascade_step;
    let (width, height) = config.window_size;
    let width = width.min(desktop.width).max(MIN_WINDOW_WIDTH.min(desktop.width));
    let height = height
        .min(desktop.height)
        .max(MIN_WINDOW_HEIGHT.min(desktop.height));
    let rect = FloatRect {
        x: desktop.x as i32 + origin_x + step * step_x,
        y: desktop.y as i32 + origin_y + step * step_y,
        width,
        height,
    };
    clamp_to_desktop(rect, desktop)
}

/// Keep `rect` inside `desktop`. The far edge is applied first, so a window
/// wider or taller than the desktop is pinned to the near edge.
pub fn clamp_to_desktop(rect: FloatRect, desktop: Rect) -> FloatRect {
    let min_x = desktop.x as i32;
    let min_y = desktop.y as i32;
    let max_x = min_x + desktop.width as i32 - rect.width as i32;
    let max_y = min_y + desktop.height as i32 - rect.height as i32;
    FloatRect {
        x: rect.x.min(max_x).max(min_x),
        y: rect.y.min(max_y).max(min_y),
        ..rect
    }
}

/// Rectangle a window is actually drawn in.
pub fn effective_rect(window: &Window, desktop: Rect, compact: bool) -> FloatRect {
    if compact || window.state == WindowState::Maximized {
        FloatRect::from_rect(desktop)
    } else {
        window.geometry
    }
}

/// Switch between normal and maximized layout.
///
/// Maximizing snapshots the normal geometry; restoring writes the snapshot
/// back verbatim. Returns `false` for minimized windows.
pub fn toggle_maximize(window: &mut Window) -> bool {
    let Some(next) = window.state.toggled_maximize() else {
        return false;
    };
    if next.is_maximized() {
        window.original_geometry = Some(window.geometry);
    } else if let Some(saved) = window.original_geometry {
        window.geometry = saved;
    }
    window.state = next;
    tracing::debug!(window_id = %window.id, maximized = next.is_maximized(), "toggled maximize");
    true
}

/// An in-progress title-bar drag: which window, and where inside its title
/// bar the pointer grabbed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGrab {
    pub id: WindowId,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl DragGrab {
    pub fn begin(id: WindowId, rect: FloatRect, column: u16, row: u16) -> Self {
        Self {
            id,
            offset_x: column as i32 - rect.x,
            offset_y: row as i32 - rect.y,
        }
    }

    /// New origin for `rect` with the pointer at `(column, row)`.
    pub fn moved(&self, rect: FloatRect, column: u16, row: u16, desktop: Rect) -> FloatRect {
        let candidate = FloatRect {
            x: column as i32 - self.offset_x,
            y: row as i32 - self.offset_y,
            ..rect
        };
        clamp_to_desktop(candidate, desktop)
    }
}
