//! Desktop-scope pointer subscriptions.
//!
//! A drag keeps tracking the pointer after it leaves the window, so the
//! tracking has to be subscribed at desktop scope rather than on the window.
//! Each subscription is owned by a window; the window manager pushes the
//! returned unsubscribe action onto that window's cleanup list so repeated
//! open/close cycles never leave dangling subscriptions behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerListener {
    Move,
    Up,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    entries: BTreeMap<ListenerId, (WindowId, PointerListener)>,
}

/// Shared handle to the desktop listener table.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    inner: Rc<RefCell<ListenerTable>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, owner: WindowId, kind: PointerListener) -> ListenerId {
        let mut table = self.inner.borrow_mut();
        table.next_id = table.next_id.saturating_add(1);
        let id = ListenerId(table.next_id);
        table.entries.insert(id, (owner, kind));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().entries.remove(&id).is_some()
    }

    /// Build a detached unsubscribe action. It only holds a weak reference,
    /// so running it after the table is gone does nothing.
    pub fn unsubscriber(&self, id: ListenerId) -> impl FnOnce() + 'static {
        let weak: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.inner);
        move || {
            if let Some(table) = weak.upgrade() {
                table.borrow_mut().entries.remove(&id);
            }
        }
    }

    /// Whether `owner` currently listens for `kind`.
    pub fn is_subscribed(&self, owner: WindowId, kind: PointerListener) -> bool {
        self.inner
            .borrow()
            .entries
            .values()
            .any(|&(o, k)| o == owner && k == kind)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}
