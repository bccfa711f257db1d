//! Authoritative map of open windows.

use std::collections::BTreeMap;

use super::{FloatRect, Window, WindowId};
use crate::content::TemplateId;

#[derive(Debug, Default)]
pub struct WindowRegistry {
    next_id: u64,
    windows: BTreeMap<WindowId, Window>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id and register a new window under it.
    pub fn create(&mut self, template_id: TemplateId, title: String, geometry: FloatRect) -> WindowId {
        self.next_id = self.next_id.saturating_add(1);
        let id = WindowId::from_raw(self.next_id);
        self.windows
            .insert(id, Window::new(id, template_id, title, geometry));
        id
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        self.windows.remove(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Windows in creation order.
    pub fn list(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub(crate) fn list_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.values_mut()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
