//! Stacking order and window activation.
//!
//! The stacking counter only ever increases, so two open windows can never
//! share a value and "topmost" is simply the window holding the counter.

use super::registry::WindowRegistry;
use super::{FloatRect, Window, WindowId};
use crate::constants::Z_INDEX_BASE;
use crate::taskbar::Taskbar;

/// Outcome of a taskbar entry click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarClick {
    Raised,
    Minimized,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ZOrder {
    highest: u64,
    active: Option<WindowId>,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZOrder {
    pub fn new() -> Self {
        Self {
            highest: Z_INDEX_BASE,
            active: None,
        }
    }

    pub fn highest(&self) -> u64 {
        self.highest
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Unhide `id` if needed, put it on top and make it the active window.
    pub fn raise(
        &mut self,
        registry: &mut WindowRegistry,
        taskbar: &mut Taskbar,
        id: WindowId,
    ) -> bool {
        let Some(window) = registry.get_mut(id) else {
            return false;
        };
        if window.state.is_minimized() {
            window.state = window.state.restored();
            taskbar.set_minimized(id, false);
        }
        self.highest = self.highest.saturating_add(1);
        window.z_index = self.highest;
        self.active = Some(id);
        tracing::debug!(window_id = %id, z_index = self.highest, "raised window");
        self.publish_active(registry, taskbar);
        true
    }

    /// Hide `id` without destroying it. The active window is cleared, not
    /// handed over: nothing is active until the next raise.
    pub fn minimize(
        &mut self,
        registry: &mut WindowRegistry,
        taskbar: &mut Taskbar,
        id: WindowId,
    ) -> bool {
        let Some(window) = registry.get_mut(id) else {
            return false;
        };
        window.state = window.state.minimized();
        taskbar.set_minimized(id, true);
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(window_id = %id, "minimized window");
        self.publish_active(registry, taskbar);
        true
    }

    /// Taskbar behaviour: the topmost visible window tucks away, anything
    /// else (including a minimized window) comes forward.
    pub fn toggle_taskbar_click(
        &mut self,
        registry: &mut WindowRegistry,
        taskbar: &mut Taskbar,
        id: WindowId,
    ) -> TaskbarClick {
        if !registry.contains(id) {
            return TaskbarClick::Ignored;
        }
        if self.is_topmost_visible(registry, id) {
            self.minimize(registry, taskbar, id);
            TaskbarClick::Minimized
        } else {
            self.raise(registry, taskbar, id);
            TaskbarClick::Raised
        }
    }

    pub fn is_topmost_visible(&self, registry: &WindowRegistry, id: WindowId) -> bool {
        registry
            .get(id)
            .is_some_and(|window| window.z_index == self.highest && window.is_visible())
    }

    /// Forget `id` after it has been removed from the registry.
    pub fn forget(&mut self, registry: &WindowRegistry, taskbar: &mut Taskbar, id: WindowId) {
        if self.active == Some(id) {
            self.active = None;
            self.publish_active(registry, taskbar);
        }
    }

    /// Visible windows, bottom to top.
    pub fn stacking<'a>(&self, registry: &'a WindowRegistry) -> Vec<&'a Window> {
        let mut visible: Vec<&Window> = registry.list().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// The visible window drawn on top at `(column, row)`.
    pub fn topmost_at<F>(
        &self,
        registry: &WindowRegistry,
        column: u16,
        row: u16,
        rect_for: F,
    ) -> Option<WindowId>
    where
        F: Fn(&Window) -> FloatRect,
    {
        self.stacking(registry)
            .into_iter()
            .rev()
            .find(|window| rect_for(window).contains(column, row))
            .map(|window| window.id)
    }

    /// The open window after (or before) the active one in creation order.
    pub fn cycle_target(&self, registry: &WindowRegistry, forward: bool) -> Option<WindowId> {
        let ids = registry.ids();
        if ids.is_empty() {
            return None;
        }
        let Some(current) = self.active.and_then(|a| ids.iter().position(|&id| id == a)) else {
            return if forward { ids.first() } else { ids.last() }.copied();
        };
        let step = if forward { 1isize } else { -1isize };
        let next = (current as isize + step).rem_euclid(ids.len() as isize) as usize;
        Some(ids[next])
    }

    fn publish_active(&self, registry: &WindowRegistry, taskbar: &mut Taskbar) {
        for window in registry.list() {
            window.shared().set_active(self.active == Some(window.id));
        }
        taskbar.sync_active(self.active);
    }
}
