//! The boundary between the window manager and what runs inside windows.
//!
//! A [`Template`] names a kind of window and carries a plain `fn` initializer.
//! The window manager calls it exactly once per window with a
//! [`ContentMount`], which is the only way content can attach anything to its
//! window: a component to draw, cleanup actions, one recurring timer and a
//! directional-key handler. Content that needs the shell to do something
//! (open another window, close itself) pushes a [`ShellRequest`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::components::Component;
use crate::error::{ContentError, ShellError};
use crate::scheduler::{Scheduler, TimerId};
use crate::window::{Window, WindowHandle, WindowId};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub type DirectionHandler = Box<dyn FnMut(Direction)>;

pub type ContentInitializer = fn(&mut ContentMount<'_>) -> Result<(), ContentError>;

#[derive(Clone)]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    pub icon: String,
    pub initializer: ContentInitializer,
}

impl Template {
    pub fn new(
        id: impl Into<TemplateId>,
        title: impl Into<String>,
        icon: impl Into<String>,
        initializer: ContentInitializer,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            initializer,
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// Registered templates, in registration order.
#[derive(Debug, Default, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, template: Template) -> Result<(), ShellError> {
        if self.contains(&template.id) {
            return Err(ShellError::DuplicateTemplate(template.id.to_string()));
        }
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|template| &template.id == id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    Open(TemplateId),
    Close(WindowId),
}

/// Queue of requests from content to the shell, drained by the window
/// manager after each event and tick.
#[derive(Debug, Clone, Default)]
pub struct ShellRequests {
    queue: Rc<RefCell<VecDeque<ShellRequest>>>,
}

impl ShellRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: ShellRequest) {
        self.queue.borrow_mut().push_back(request);
    }

    pub fn open(&self, template: impl Into<TemplateId>) {
        self.push(ShellRequest::Open(template.into()));
    }

    pub fn close(&self, id: WindowId) {
        self.push(ShellRequest::Close(id));
    }

    pub fn drain(&self) -> Vec<ShellRequest> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// What an initializer gets to work with while its window is being built.
pub struct ContentMount<'a> {
    window: &'a mut Window,
    scheduler: &'a mut Scheduler,
    requests: &'a ShellRequests,
    now: Instant,
}

impl<'a> ContentMount<'a> {
    pub(crate) fn new(
        window: &'a mut Window,
        scheduler: &'a mut Scheduler,
        requests: &'a ShellRequests,
        now: Instant,
    ) -> Self {
        Self {
            window,
            scheduler,
            requests,
            now,
        }
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id
    }

    pub fn title(&self) -> &str {
        &self.window.title
    }

    pub fn handle(&self) -> WindowHandle {
        self.window.handle()
    }

    pub fn requests(&self) -> ShellRequests {
        self.requests.clone()
    }

    /// Set the component drawn in the window body. A second call replaces
    /// the first.
    pub fn mount(&mut self, content: Box<dyn Component>) {
        self.window.content = Some(content);
    }

    /// Register a teardown action. Actions run once, in registration order,
    /// when the window closes.
    pub fn on_cleanup<F>(&mut self, cleanup: F)
    where
        F: FnOnce() -> Result<(), ContentError> + 'static,
    {
        self.window.cleanup.push(Box::new(cleanup));
    }

    /// Run `task` every `interval` for as long as the window is open. A
    /// window owns at most one timer; setting another stops the previous one.
    pub fn set_timer<F>(&mut self, interval: Duration, task: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        if let Some(previous) = self.window.owned_timer.take() {
            self.scheduler.cancel(previous);
        }
        let id = self.scheduler.schedule_repeating(
            Some(self.window.id),
            interval,
            self.now,
            Box::new(task),
        );
        self.window.owned_timer = Some(id);
        id
    }

    /// Receive arrow keys while this window is active.
    pub fn set_direction_handler<F>(&mut self, handler: F)
    where
        F: FnMut(Direction) + 'static,
    {
        self.window.direction_handler = Some(Box::new(handler));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::FloatRect;

    fn noop(_: &mut ContentMount<'_>) -> Result<(), ContentError> {
        Ok(())
    }

    #[test]
    fn duplicate_templates_are_rejected() {
        let mut catalog = TemplateCatalog::new();
        catalog
            .register(Template::new("about", "About", "i", noop))
            .expect("first registration");
        let err = catalog
            .register(Template::new("about", "About again", "i", noop))
            .expect_err("duplicate");
        assert!(matches!(err, ShellError::DuplicateTemplate(id) if id == "about"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(&TemplateId::from("about")).map(|t| t.title.as_str()),
            Some("About")
        );
    }

    #[test]
    fn requests_drain_in_order() {
        let requests = ShellRequests::new();
        let clone = requests.clone();
        clone.open("about");
        clone.close(WindowId::from_raw(3));
        assert_eq!(
            requests.drain(),
            vec![
                ShellRequest::Open(TemplateId::from("about")),
                ShellRequest::Close(WindowId::from_raw(3)),
            ]
        );
        assert!(requests.is_empty());
    }

    #[test]
    fn set_timer_replaces_previous() {
        let mut window = Window::new(
            WindowId::from_raw(1),
            TemplateId::from("crawler"),
            "Crawler".into(),
            FloatRect::default(),
        );
        let mut scheduler = Scheduler::new();
        let requests = ShellRequests::new();
        let mut mount = ContentMount::new(&mut window, &mut scheduler, &requests, Instant::now());
        let first = mount.set_timer(Duration::from_millis(100), || {});
        let second = mount.set_timer(Duration::from_millis(50), || {});
        assert_ne!(first, second);
        assert!(!scheduler.is_scheduled(first));
        assert!(scheduler.is_scheduled(second));
        assert_eq!(window.owned_timer(), Some(second));
    }
}
