//! The window manager: one explicit context object that owns every piece of
//! desktop state and runs each window through its lifecycle.
//!
//! Opening a window registers it, places it, wires the drag listeners, runs
//! the template's content initializer once, adds the taskbar entry and
//! raises it. Closing does the reverse: stop the window's timer, run its
//! cleanup actions in order, then drop it from the registry and taskbar.
//! Operations on ids that are no longer registered are silent no-ops.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;
use ratatui::style::Style;

use super::decorator::{DesktopDecorator, HeaderAction, WindowDecorator};
use super::geometry::{self, DragGrab};
use super::registry::WindowRegistry;
use super::z_order::{TaskbarClick, ZOrder};
use super::{FloatRect, Window, WindowId};
use crate::components::ComponentContext;
use crate::config::ShellConfig;
use crate::content::{ContentMount, Direction, ShellRequest, ShellRequests, TemplateCatalog, TemplateId};
use crate::desktop_icons::{DesktopIcon, DesktopIcons};
use crate::keybindings::{Action, KeyBindings};
use crate::listeners::{Listeners, PointerListener};
use crate::scheduler::{Scheduler, TimerId};
use crate::taskbar::{StartMenuItem, Taskbar, TaskbarEntry, TaskbarHit, rect_contains};
use crate::ui::{UiFrame, fill_rect, safe_set_string};

/// What the previous primary click landed on, for double-click detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    TitleBar(WindowId),
    Icon(usize),
}

/// One window as it will be drawn this frame, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDraw {
    pub id: WindowId,
    pub rect: FloatRect,
    pub inner: Rect,
    pub focused: bool,
    pub maximized: bool,
}

#[derive(Debug)]
pub struct WindowManager {
    config: ShellConfig,
    viewport: Rect,
    now: Instant,
    registry: WindowRegistry,
    z_order: ZOrder,
    taskbar: Taskbar,
    scheduler: Scheduler,
    listeners: Listeners,
    catalog: TemplateCatalog,
    requests: ShellRequests,
    keybindings: KeyBindings,
    decorator: DesktopDecorator,
    icons: DesktopIcons,
    drag: Option<DragGrab>,
    last_click: Option<(ClickTarget, Instant)>,
    clock_timer: TimerId,
}

impl WindowManager {
    pub fn new(catalog: TemplateCatalog, config: ShellConfig) -> Self {
        Self::with_viewport(catalog, config, Rect::new(0, 0, 80, 24))
    }

    pub fn with_viewport(catalog: TemplateCatalog, config: ShellConfig, viewport: Rect) -> Self {
        let now = Instant::now();
        let mut taskbar = Taskbar::new();
        taskbar.set_menu_items(
            catalog
                .iter()
                .map(|template| StartMenuItem {
                    template_id: template.id.clone(),
                    icon: template.icon.clone(),
                    title: template.title.clone(),
                })
                .collect(),
        );
        let icons = DesktopIcons::new(
            catalog
                .iter()
                .map(|template| DesktopIcon {
                    template_id: template.id.clone(),
                    icon: template.icon.clone(),
                    title: template.title.clone(),
                })
                .collect(),
        );
        let clock = taskbar.clock();
        clock.refresh();
        let mut scheduler = Scheduler::new();
        let clock_timer =
            scheduler.schedule_repeating(None, config.clock_tick, now, Box::new(move || clock.refresh()));
        Self {
            config,
            viewport,
            now,
            registry: WindowRegistry::new(),
            z_order: ZOrder::new(),
            taskbar,
            scheduler,
            listeners: Listeners::new(),
            catalog,
            requests: ShellRequests::new(),
            keybindings: KeyBindings::default(),
            decorator: DesktopDecorator,
            icons,
            drag: None,
            last_click: None,
            clock_timer,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id)
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn requests(&self) -> &ShellRequests {
        &self.requests
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn icons(&self) -> &DesktopIcons {
        &self.icons
    }

    pub fn active(&self) -> Option<WindowId> {
        self.z_order.active()
    }

    pub fn highest_z(&self) -> u64 {
        self.z_order.highest()
    }

    pub fn clock_timer(&self) -> TimerId {
        self.clock_timer
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_compact(&self) -> bool {
        geometry::is_compact(self.viewport, &self.config)
    }

    pub fn desktop_area(&self) -> Rect {
        geometry::desktop_area(self.viewport, self.config.taskbar_height)
    }

    /// The rectangle `id` is drawn in, chrome included.
    pub fn effective_rect(&self, id: WindowId) -> Option<FloatRect> {
        let window = self.registry.get(id)?;
        Some(geometry::effective_rect(
            window,
            self.desktop_area(),
            self.is_compact(),
        ))
    }

    /// Adopt a new terminal size. Normal-layout windows are pulled back
    /// inside the new desktop area.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if self.is_compact() {
            return;
        }
        let desktop = self.desktop_area();
        for window in self.registry.list_mut() {
            window.geometry = geometry::clamp_to_desktop(window.geometry, desktop);
        }
        tracing::debug!(?viewport, "viewport changed");
    }

    /// Open a window from a template. Unknown templates are logged and leave
    /// nothing behind.
    pub fn open(&mut self, template_id: impl Into<TemplateId>) -> Option<WindowId> {
        let template_id = template_id.into();
        let Some(template) = self.catalog.get(&template_id) else {
            tracing::error!(template = %template_id, "unknown window template");
            return None;
        };
        let (title, icon, initializer) = (
            template.title.clone(),
            template.icon.clone(),
            template.initializer,
        );

        // Compact viewports show the window full-screen, but it still gets a
        // normal-layout rectangle for when the viewport grows.
        let placement =
            geometry::cascade_placement(self.registry.len(), self.desktop_area(), &self.config);
        let id = self
            .registry
            .create(template_id.clone(), title.clone(), placement);

        if !self.is_compact() {
            self.subscribe_drag(id);
        }

        if let Some(window) = self.registry.get_mut(id)
            && !window.initialized
        {
            window.initialized = true;
            let mut mount = ContentMount::new(window, &mut self.scheduler, &self.requests, self.now);
            if let Err(err) = initializer(&mut mount) {
                tracing::warn!(window_id = %id, template = %template_id, error = %err, "content initializer failed");
            }
        }

        self.taskbar.insert(id, TaskbarEntry::new(icon, title));
        self.z_order.raise(&mut self.registry, &mut self.taskbar, id);
        tracing::debug!(window_id = %id, template = %template_id, "opened window");
        Some(id)
    }

    fn subscribe_drag(&mut self, id: WindowId) {
        let moves = self.listeners.subscribe(id, PointerListener::Move);
        let ups = self.listeners.subscribe(id, PointerListener::Up);
        let Some(window) = self.registry.get_mut(id) else {
            return;
        };
        for listener in [moves, ups] {
            let unsubscribe = self.listeners.unsubscriber(listener);
            window.cleanup.push(Box::new(move || {
                unsubscribe();
                Ok(())
            }));
        }
    }

    /// Tear a window down. Returns `false` if it was not open.
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some(window) = self.registry.get_mut(id) else {
            return false;
        };
        if let Some(timer) = window.owned_timer.take() {
            self.scheduler.cancel(timer);
        }
        for (index, cleanup) in window.cleanup.drain(..).enumerate() {
            if let Err(err) = cleanup() {
                tracing::warn!(window_id = %id, index, error = %err, "cleanup action failed");
            }
        }
        window.direction_handler = None;
        self.registry.remove(id);
        self.taskbar.remove(id);
        self.z_order.forget(&self.registry, &mut self.taskbar, id);
        if self.drag.is_some_and(|grab| grab.id == id) {
            self.drag = None;
        }
        if self
            .last_click
            .is_some_and(|(target, _)| target == ClickTarget::TitleBar(id))
        {
            self.last_click = None;
        }
        tracing::debug!(window_id = %id, "closed window");
        true
    }

    pub fn raise(&mut self, id: WindowId) -> bool {
        self.z_order.raise(&mut self.registry, &mut self.taskbar, id)
    }

    pub fn minimize(&mut self, id: WindowId) -> bool {
        if self.drag.is_some_and(|grab| grab.id == id) {
            self.drag = None;
        }
        self.z_order.minimize(&mut self.registry, &mut self.taskbar, id)
    }

    /// Maximize or restore. A no-op in compact mode, where every window
    /// already fills the desktop, and for minimized windows.
    pub fn toggle_maximize(&mut self, id: WindowId) -> bool {
        if self.is_compact() {
            return false;
        }
        let Some(window) = self.registry.get_mut(id) else {
            return false;
        };
        if !geometry::toggle_maximize(window) {
            return false;
        }
        if self.drag.is_some_and(|grab| grab.id == id) {
            self.drag = None;
        }
        true
    }

    pub fn taskbar_click(&mut self, id: WindowId) -> TaskbarClick {
        self.z_order
            .toggle_taskbar_click(&mut self.registry, &mut self.taskbar, id)
    }

    /// Raise the next (or previous) window in creation order.
    pub fn cycle(&mut self, forward: bool) -> Option<WindowId> {
        let target = self.z_order.cycle_target(&self.registry, forward)?;
        self.raise(target);
        Some(target)
    }

    /// Deliver a direction to the active window's handler. Returns `false`
    /// when nothing is active or the active window has no handler.
    pub fn dispatch_direction(&mut self, direction: Direction) -> bool {
        let Some(active) = self.z_order.active() else {
            return false;
        };
        let Some(handler) = self
            .registry
            .get_mut(active)
            .and_then(|window| window.direction_handler.as_mut())
        else {
            return false;
        };
        handler(direction);
        true
    }

    /// Advance time: run due timers and apply any requests they made.
    pub fn tick(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
        self.scheduler.run_due(self.now);
        self.process_requests();
    }

    /// Apply queued content requests. Requests made while applying (an
    /// initializer that opens another window) are applied too.
    pub fn process_requests(&mut self) {
        loop {
            let pending = self.requests.drain();
            if pending.is_empty() {
                break;
            }
            for request in pending {
                match request {
                    ShellRequest::Open(template) => {
                        self.open(template);
                    }
                    ShellRequest::Close(id) => {
                        self.close(id);
                    }
                }
            }
        }
    }

    /// Route one input event. Returns `true` if something consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let handled = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.set_viewport(Rect::new(0, 0, *width, *height));
                true
            }
            _ => false,
        };
        self.process_requests();
        handled
    }

    /// The first bound action `key` triggers, checked in priority order.
    fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        const ORDER: [Action; 13] = [
            Action::ToggleStartMenu,
            Action::MenuCancel,
            Action::MenuSelect,
            Action::CyclePrevWindow,
            Action::CycleNextWindow,
            Action::CloseWindow,
            Action::MinimizeWindow,
            Action::MaximizeWindow,
            Action::DirectionUp,
            Action::DirectionDown,
            Action::DirectionLeft,
            Action::DirectionRight,
            Action::Quit,
        ];
        ORDER
            .into_iter()
            .find(|action| self.keybindings.matches(*action, key))
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let action = self.action_for(key);
        if self.taskbar.menu_open() {
            return self.handle_menu_key(action);
        }
        if let Some(direction) = action.and_then(Action::direction) {
            return self.dispatch_direction(direction);
        }
        let active = self.z_order.active();
        match action {
            Some(Action::ToggleStartMenu) => {
                self.taskbar.toggle_menu();
                true
            }
            Some(Action::CycleNextWindow) => self.cycle(true).is_some(),
            Some(Action::CyclePrevWindow) => self.cycle(false).is_some(),
            Some(Action::CloseWindow) => active.is_some_and(|id| self.close(id)),
            Some(Action::MinimizeWindow) => active.is_some_and(|id| self.minimize(id)),
            Some(Action::MaximizeWindow) => active.is_some_and(|id| self.toggle_maximize(id)),
            // Quit belongs to the runner.
            Some(Action::Quit) => false,
            _ => active.is_some_and(|id| self.forward_to_content(id, &Event::Key(*key))),
        }
    }

    fn handle_menu_key(&mut self, action: Option<Action>) -> bool {
        match action {
            Some(Action::MenuCancel | Action::ToggleStartMenu) => self.taskbar.close_menu(),
            Some(Action::MenuSelect) => {
                let selected = self.taskbar.menu_selected();
                self.launch_menu_item(selected);
            }
            Some(Action::DirectionUp) => self.taskbar.menu_step(false),
            Some(Action::DirectionDown) => self.taskbar.menu_step(true),
            Some(Action::Quit) => return false,
            _ => {}
        }
        // The open menu swallows every other key.
        true
    }

    fn launch_menu_item(&mut self, index: usize) {
        let template = self
            .taskbar
            .menu_item(index)
            .map(|item| item.template_id.clone());
        self.taskbar.close_menu();
        if let Some(template) = template {
            self.open(template);
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(mouse),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_move(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.pointer_up(),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let Some(id) = self.window_at(mouse.column, mouse.row) else {
                    return false;
                };
                self.forward_to_content(id, &Event::Mouse(*mouse))
            }
            _ => false,
        }
    }

    fn window_at(&self, column: u16, row: u16) -> Option<WindowId> {
        let desktop = self.desktop_area();
        let compact = self.is_compact();
        self.z_order.topmost_at(&self.registry, column, row, |window| {
            geometry::effective_rect(window, desktop, compact)
        })
    }

    fn pointer_down(&mut self, mouse: &MouseEvent) -> bool {
        let (column, row) = (mouse.column, mouse.row);
        match self.taskbar.hit_test(column, row) {
            Some(TaskbarHit::StartButton) => {
                self.taskbar.toggle_menu();
                return true;
            }
            Some(TaskbarHit::Entry(id)) => {
                self.taskbar.close_menu();
                self.taskbar_click(id);
                return true;
            }
            Some(TaskbarHit::MenuItem(index)) => {
                self.launch_menu_item(index);
                return true;
            }
            Some(TaskbarHit::Background) => {
                // Empty strip closes the menu; empty menu space keeps it.
                if rect_contains(self.taskbar.area(), column, row) {
                    self.taskbar.close_menu();
                }
                return true;
            }
            None => self.taskbar.close_menu(),
        }

        let Some(id) = self.window_at(column, row) else {
            return self.desktop_down(column, row);
        };
        self.icons.select(None);
        self.raise(id);
        let Some(rect) = self.effective_rect(id) else {
            return true;
        };
        match self.decorator.hit_test(rect, column, row) {
            HeaderAction::Close => {
                self.close(id);
            }
            HeaderAction::Minimize => {
                self.minimize(id);
            }
            HeaderAction::Maximize => {
                self.toggle_maximize(id);
            }
            HeaderAction::TitleBar => self.title_bar_down(id, rect, column, row),
            HeaderAction::Body => {
                self.forward_to_content(id, &Event::Mouse(*mouse));
            }
            HeaderAction::None => {}
        }
        true
    }

    /// Record a click on `target`. Returns `true` when it completes a
    /// double click on the same target.
    fn register_click(&mut self, target: ClickTarget) -> bool {
        let double = self.last_click.is_some_and(|(last, at)| {
            last == target && self.now.saturating_duration_since(at) <= self.config.double_click
        });
        self.last_click = if double { None } else { Some((target, self.now)) };
        double
    }

    /// A press on bare desktop. Icons open their template on a double
    /// click, or a single one in compact mode.
    fn desktop_down(&mut self, column: u16, row: u16) -> bool {
        let Some(index) = self.icons.hit_test(column, row) else {
            self.icons.select(None);
            self.last_click = None;
            return false;
        };
        self.icons.select(Some(index));
        let double = self.register_click(ClickTarget::Icon(index));
        if double || self.is_compact() {
            self.last_click = None;
            let template = self.icons.icon(index).map(|icon| icon.template_id.clone());
            if let Some(template) = template {
                self.icons.select(None);
                self.open(template);
            }
        }
        true
    }

    fn title_bar_down(&mut self, id: WindowId, rect: FloatRect, column: u16, row: u16) {
        if self.register_click(ClickTarget::TitleBar(id)) {
            self.drag = None;
            self.toggle_maximize(id);
            return;
        }
        let draggable = !self.is_compact()
            && self.registry.get(id).is_some_and(|w| !w.is_maximized())
            && self.listeners.is_subscribed(id, PointerListener::Move);
        if draggable {
            self.drag = Some(DragGrab::begin(id, rect, column, row));
        }
    }

    fn pointer_move(&mut self, column: u16, row: u16) -> bool {
        let Some(grab) = self.drag else {
            return false;
        };
        if !self.listeners.is_subscribed(grab.id, PointerListener::Move) {
            self.drag = None;
            return false;
        }
        let desktop = self.desktop_area();
        let Some(window) = self.registry.get_mut(grab.id) else {
            self.drag = None;
            return false;
        };
        window.geometry = grab.moved(window.geometry, column, row, desktop);
        true
    }

    fn pointer_up(&mut self) -> bool {
        let Some(grab) = self.drag else {
            return false;
        };
        if self.listeners.is_subscribed(grab.id, PointerListener::Up) {
            self.drag = None;
            tracing::trace!(window_id = %grab.id, "drag finished");
        }
        true
    }

    fn forward_to_content(&mut self, id: WindowId, event: &Event) -> bool {
        let ctx = self.context_for(id);
        self.registry
            .get_mut(id)
            .and_then(|window| window.content.as_mut())
            .is_some_and(|content| content.handle_event(event, &ctx))
    }

    fn context_for(&self, id: WindowId) -> ComponentContext {
        ComponentContext::new(self.z_order.active() == Some(id)).with_compact(self.is_compact())
    }

    /// Visible windows, bottom to top, with the rectangles they occupy.
    pub fn window_draw_plan(&self) -> Vec<WindowDraw> {
        let desktop = self.desktop_area();
        let compact = self.is_compact();
        self.z_order
            .stacking(&self.registry)
            .into_iter()
            .map(|window| {
                let rect = geometry::effective_rect(window, desktop, compact);
                WindowDraw {
                    id: window.id,
                    rect,
                    inner: self.decorator.inner(rect).visible_in(desktop),
                    focused: self.z_order.active() == Some(window.id),
                    maximized: window.is_maximized(),
                }
            })
            .collect()
    }

    /// Draw the whole desktop: background, windows, taskbar, start menu.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.set_viewport(frame.area());
        self.taskbar.begin_frame();
        let (desktop, _) = self.taskbar.split_area(self.viewport, self.config.taskbar_height);
        let compact = self.is_compact();

        let desktop_style = Style::default()
            .bg(crate::theme::desktop_bg())
            .fg(crate::theme::desktop_fg());
        fill_rect(frame.buffer_mut(), desktop, desktop_style);
        self.icons.render(frame, desktop);
        if self.registry.is_empty() && desktop.height > 1 {
            let hint = format!(
                "Press {} or click Start to open a window",
                self.keybindings
                    .combos_for(Action::ToggleStartMenu)
                    .join("/")
            );
            let bottom = desktop.y + desktop.height - 1;
            safe_set_string(frame.buffer_mut(), desktop, desktop.x + 1, bottom, &hint, desktop_style);
        }

        for draw in self.window_draw_plan() {
            let Some(window) = self.registry.get_mut(draw.id) else {
                continue;
            };
            self.decorator.render_window(
                frame,
                draw.rect,
                desktop,
                &window.title,
                draw.focused,
                draw.maximized,
            );
            if let Some(content) = window.content.as_mut()
                && draw.inner.width > 0
                && draw.inner.height > 0
            {
                let ctx = ComponentContext::new(draw.focused).with_compact(compact);
                content.render(frame, draw.inner, &ctx);
            }
        }

        self.taskbar.render(frame);
        self.taskbar.render_menu(frame, desktop);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::content::Template;
    use crate::error::ContentError;

    thread_local! {
        static CLEANUPS: Cell<u32> = const { Cell::new(0) };
        static DIRECTIONS: RefCell<Vec<(WindowId, Direction)>> = const { RefCell::new(Vec::new()) };
    }

    fn plain(_: &mut ContentMount<'_>) -> Result<(), ContentError> {
        Ok(())
    }

    fn counted(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
        mount.on_cleanup(|| {
            CLEANUPS.with(|c| c.set(c.get() + 1));
            Ok(())
        });
        mount.on_cleanup(|| Err(ContentError::failed("flaky")));
        mount.on_cleanup(|| {
            CLEANUPS.with(|c| c.set(c.get() + 1));
            Ok(())
        });
        Ok(())
    }

    fn steering(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
        let id = mount.window_id();
        mount.set_direction_handler(move |dir| DIRECTIONS.with(|d| d.borrow_mut().push((id, dir))));
        mount.set_timer(Duration::from_millis(100), || {});
        Ok(())
    }

    fn broken(_: &mut ContentMount<'_>) -> Result<(), ContentError> {
        Err(ContentError::failed("no content"))
    }

    fn manager() -> WindowManager {
        let mut catalog = TemplateCatalog::new();
        for template in [
            Template::new("plain", "Plain", "P", plain),
            Template::new("counted", "Counted", "C", counted),
            Template::new("steering", "Steering", "S", steering),
            Template::new("broken", "Broken", "B", broken),
        ] {
            catalog.register(template).expect("register");
        }
        WindowManager::with_viewport(catalog, ShellConfig::default(), Rect::new(0, 0, 100, 30))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn assert_in_sync(wm: &WindowManager) {
        assert_eq!(wm.registry().ids(), wm.taskbar().ids());
    }

    #[test]
    fn open_registers_raises_and_adds_taskbar_entry() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        assert_eq!(wm.active(), Some(id));
        assert!(wm.window(id).is_some_and(|w| w.is_initialized()));
        assert_eq!(wm.taskbar().entry(id).map(|e| e.title()), Some("Plain"));
        assert_in_sync(&wm);
    }

    #[test]
    fn unknown_template_leaves_nothing() {
        let mut wm = manager();
        let listeners = wm.listeners().len();
        assert_eq!(wm.open("paint"), None);
        assert!(wm.registry().is_empty());
        assert!(wm.taskbar().is_empty());
        assert_eq!(wm.listeners().len(), listeners);
    }

    #[test]
    fn close_runs_every_cleanup_once() {
        CLEANUPS.with(|c| c.set(0));
        let mut wm = manager();
        let id = wm.open("counted").expect("open");
        assert!(wm.close(id));
        assert_eq!(CLEANUPS.with(Cell::get), 2);
        assert!(!wm.close(id));
        assert_eq!(CLEANUPS.with(Cell::get), 2);
        assert_eq!(wm.active(), None);
        assert_in_sync(&wm);
    }

    #[test]
    fn failed_initializer_leaves_closable_window() {
        let mut wm = manager();
        let id = wm.open("broken").expect("window still opens");
        assert!(wm.window(id).is_some_and(|w| w.is_initialized()));
        assert!(wm.close(id));
        assert!(wm.registry().is_empty());
    }

    #[test]
    fn listeners_return_to_baseline() {
        let mut wm = manager();
        let baseline = wm.listeners().len();
        for _ in 0..5 {
            let id = wm.open("plain").expect("open");
            assert!(wm.listeners().len() > baseline);
            wm.close(id);
        }
        assert_eq!(wm.listeners().len(), baseline);
    }

    #[test]
    fn two_instances_have_independent_timers() {
        let mut wm = manager();
        let a = wm.open("steering").expect("a");
        let b = wm.open("steering").expect("b");
        let timer_a = wm.window(a).and_then(Window::owned_timer).expect("timer a");
        let timer_b = wm.window(b).and_then(Window::owned_timer).expect("timer b");
        assert_ne!(timer_a, timer_b);
        wm.close(a);
        assert!(!wm.scheduler().is_scheduled(timer_a));
        assert!(wm.scheduler().is_scheduled(timer_b));
        assert_eq!(wm.scheduler().owned_by(a), 0);
        wm.close(b);
        assert_eq!(wm.scheduler().owned_by(b), 0);
        assert!(wm.scheduler().is_scheduled(wm.clock_timer()));
    }

    #[test]
    fn arrows_reach_only_the_active_window() {
        DIRECTIONS.with(|d| d.borrow_mut().clear());
        let mut wm = manager();
        let a = wm.open("steering").expect("a");
        let b = wm.open("steering").expect("b");
        assert!(wm.handle_event(&key(KeyCode::Left)));
        wm.raise(a);
        assert!(wm.handle_event(&key(KeyCode::Up)));
        wm.minimize(a);
        assert!(!wm.handle_event(&key(KeyCode::Down)));
        let seen = DIRECTIONS.with(|d| d.borrow().clone());
        assert_eq!(seen, vec![(b, Direction::Left), (a, Direction::Up)]);
    }

    #[test]
    fn cascade_staggers_new_windows() {
        let mut wm = manager();
        let a = wm.open("plain").expect("a");
        let b = wm.open("plain").expect("b");
        let ra = wm.effective_rect(a).expect("rect a");
        let rb = wm.effective_rect(b).expect("rect b");
        assert_eq!(rb.x - ra.x, wm.config().cascade_step.0);
        assert_eq!(rb.y - ra.y, wm.config().cascade_step.1);
    }

    #[test]
    fn title_bar_drag_moves_and_clamps() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        let start = wm.effective_rect(id).expect("rect");
        let (col, row) = (start.x as u16 + 2, start.y as u16);
        wm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, row));
        assert!(wm.is_dragging());
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), col + 5, row + 3));
        let moved = wm.effective_rect(id).expect("rect");
        assert_eq!((moved.x, moved.y), (start.x + 5, start.y + 3));

        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 200));
        let clamped = wm.effective_rect(id).expect("rect");
        let desktop = wm.desktop_area();
        assert_eq!(clamped.x, 0);
        assert_eq!(clamped.bottom(), desktop.height as i32);

        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 200));
        assert!(!wm.is_dragging());
    }

    #[test]
    fn double_click_title_toggles_maximize() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        let rect = wm.effective_rect(id).expect("rect");
        let (col, row) = (rect.x as u16 + 2, rect.y as u16);
        let down = mouse(MouseEventKind::Down(MouseButton::Left), col, row);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), col, row);
        wm.handle_event(&down);
        wm.handle_event(&up);
        wm.handle_event(&down);
        assert!(wm.window(id).is_some_and(Window::is_maximized));
        assert!(!wm.is_dragging());

        // Slow second click is two single clicks.
        let full = wm.effective_rect(id).expect("rect");
        let down = mouse(MouseEventKind::Down(MouseButton::Left), full.x as u16 + 2, full.y as u16);
        wm.handle_event(&down);
        wm.tick(wm.now() + Duration::from_secs(2));
        wm.handle_event(&down);
        assert!(wm.window(id).is_some_and(Window::is_maximized));
    }

    #[test]
    fn chrome_buttons_route_to_lifecycle() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        let rect = wm.effective_rect(id).expect("rect");
        let row = rect.y as u16;
        let close_col = (rect.right() - 3) as u16;
        let max_col = (rect.right() - 6) as u16;
        let min_col = (rect.right() - 9) as u16;

        wm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), max_col, row));
        assert!(wm.window(id).is_some_and(Window::is_maximized));
        let full = wm.effective_rect(id).expect("rect");
        wm.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            (full.right() - 6) as u16,
            full.y as u16,
        ));
        assert_eq!(wm.effective_rect(id), Some(rect));

        wm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), min_col, row));
        assert!(wm.window(id).is_some_and(Window::is_minimized));
        wm.raise(id);
        wm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), close_col, row));
        assert!(wm.window(id).is_none());
        assert_in_sync(&wm);
    }

    #[test]
    fn compact_viewport_fills_desktop_and_skips_drag() {
        let mut wm = manager();
        wm.set_viewport(Rect::new(0, 0, 40, 12));
        assert!(wm.is_compact());
        let baseline = wm.listeners().len();
        let id = wm.open("plain").expect("open");
        assert_eq!(wm.listeners().len(), baseline);
        assert_eq!(wm.effective_rect(id), Some(FloatRect::from_rect(wm.desktop_area())));
        assert!(!wm.toggle_maximize(id));
        wm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 0));
        assert!(!wm.is_dragging());
    }

    #[test]
    fn keyboard_window_actions_target_active() {
        let mut wm = manager();
        let a = wm.open("plain").expect("a");
        let b = wm.open("plain").expect("b");
        wm.handle_event(&key(KeyCode::F(10)));
        assert!(wm.window(b).is_some_and(Window::is_maximized));
        wm.handle_event(&key(KeyCode::F(9)));
        assert_eq!(wm.active(), None);
        // Minimized while maximized comes back maximized.
        wm.raise(b);
        assert!(wm.window(b).is_some_and(Window::is_maximized));
        wm.handle_event(&key(KeyCode::F(6)));
        assert_eq!(wm.active(), Some(a));
        wm.handle_event(&key(KeyCode::F(4)));
        assert!(wm.window(a).is_none());
        assert_in_sync(&wm);
    }

    #[test]
    fn start_menu_keyboard_opens_template() {
        let mut wm = manager();
        wm.handle_event(&key(KeyCode::F(2)));
        assert!(wm.taskbar().menu_open());
        wm.handle_event(&key(KeyCode::Down));
        wm.handle_event(&key(KeyCode::Enter));
        assert!(!wm.taskbar().menu_open());
        let opened: Vec<_> = wm.registry().list().map(|w| w.template_id().clone()).collect();
        assert_eq!(opened, vec![TemplateId::from("counted")]);
    }

    #[test]
    fn shell_requests_are_applied_after_events() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        wm.requests().open("steering");
        wm.requests().close(id);
        wm.tick(wm.now());
        assert!(wm.window(id).is_none());
        assert_eq!(wm.registry().len(), 1);
        assert_in_sync(&wm);
    }

    #[test]
    fn shrinking_viewport_pulls_windows_inside() {
        let mut wm = manager();
        let id = wm.open("plain").expect("open");
        wm.set_viewport(Rect::new(0, 0, 70, 20));
        let rect = wm.effective_rect(id).expect("rect");
        assert!(rect.right() <= 70);
        assert!(rect.bottom() <= wm.desktop_area().height as i32);
    }
}
