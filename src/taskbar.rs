//! Bottom strip of the desktop: start button, one entry per open window and
//! a clock. The start menu pops up above the start button.
//!
//! The taskbar never decides anything on its own. It mirrors the z-order
//! controller's view (`sync_active`, `set_minimized`) and reports what was
//! clicked through [`Taskbar::hit_test`]; the window manager acts on it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::TemplateId;
use crate::ui::{UiFrame, fill_rect, safe_set_string, truncate_to_width};
use crate::window::WindowId;

const START_LABEL: &str = " ≡ Start ";
const MAX_ENTRY_LABEL: usize = 18;
const ENTRY_GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    icon: String,
    title: String,
    active: bool,
    minimized: bool,
}

impl TaskbarEntry {
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            active: false,
            minimized: false,
        }
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn minimized(&self) -> bool {
        self.minimized
    }

    fn label(&self) -> String {
        let text = format!("{} {}", self.icon, self.title);
        truncate_to_width(&text, MAX_ENTRY_LABEL)
    }
}

/// A launchable template as listed in the start menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartMenuItem {
    pub template_id: TemplateId,
    pub icon: String,
    pub title: String,
}

#[derive(Debug, Default)]
struct StartMenu {
    open: bool,
    selected: usize,
    items: Vec<StartMenuItem>,
}

/// The clock text shown at the right edge. Shared with the clock timer.
#[derive(Debug, Clone, Default)]
pub struct ClockLabel {
    text: Rc<RefCell<String>>,
}

impl ClockLabel {
    pub fn get(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_time(&self, time: DateTime<Local>) {
        *self.text.borrow_mut() = time.format("%H:%M").to_string();
    }

    pub fn refresh(&self) {
        self.set_time(Local::now());
    }
}

/// What a pointer press on the taskbar (or its menu) landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    StartButton,
    Entry(WindowId),
    MenuItem(usize),
    /// Inside the strip or the menu, but not on anything clickable.
    Background,
}

#[derive(Debug, Default)]
pub struct Taskbar {
    entries: BTreeMap<WindowId, TaskbarEntry>,
    menu: StartMenu,
    clock: ClockLabel,
    area: Rect,
    start_rect: Option<Rect>,
    entry_hits: Vec<(WindowId, Rect)>,
    menu_hits: Vec<(usize, Rect)>,
    menu_bounds: Option<Rect>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: WindowId, entry: TaskbarEntry) {
        self.entries.insert(id, entry);
    }

    pub fn remove(&mut self, id: WindowId) -> Option<TaskbarEntry> {
        self.entries.remove(&id)
    }

    pub fn entry(&self, id: WindowId) -> Option<&TaskbarEntry> {
        self.entries.get(&id)
    }

    /// Entries in window creation order.
    pub fn entries(&self) -> impl Iterator<Item = (WindowId, &TaskbarEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_minimized(&mut self, id: WindowId, minimized: bool) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.minimized = minimized;
            if minimized {
                entry.active = false;
            }
        }
    }

    /// Make `active` the only highlighted entry (or none).
    pub fn sync_active(&mut self, active: Option<WindowId>) {
        for (id, entry) in self.entries.iter_mut() {
            entry.active = Some(*id) == active;
        }
    }

    pub fn clock(&self) -> ClockLabel {
        self.clock.clone()
    }

    pub fn set_menu_items(&mut self, items: Vec<StartMenuItem>) {
        self.menu.items = items;
        self.menu.selected = 0;
    }

    pub fn menu_items(&self) -> &[StartMenuItem] {
        &self.menu.items
    }

    pub fn menu_open(&self) -> bool {
        self.menu.open
    }

    pub fn toggle_menu(&mut self) {
        self.menu.open = !self.menu.open;
        self.menu.selected = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu.open = false;
    }

    pub fn menu_selected(&self) -> usize {
        self.menu.selected
    }

    /// Move the menu highlight, wrapping at both ends.
    pub fn menu_step(&mut self, forward: bool) {
        let len = self.menu.items.len();
        if len == 0 {
            return;
        }
        self.menu.selected = if forward {
            (self.menu.selected + 1) % len
        } else {
            (self.menu.selected + len - 1) % len
        };
    }

    pub fn menu_item(&self, index: usize) -> Option<&StartMenuItem> {
        self.menu.items.get(index)
    }

    /// Split `area` into the desktop above and the taskbar strip below.
    pub fn split_area(&mut self, area: Rect, height: u16) -> (Rect, Rect) {
        let bar_h = height.min(area.height);
        let desktop = Rect {
            height: area.height.saturating_sub(bar_h),
            ..area
        };
        let bar = Rect {
            x: area.x,
            y: area.y.saturating_add(desktop.height),
            width: area.width,
            height: bar_h,
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.entry_hits.clear();
        self.menu_hits.clear();
        self.menu_bounds = None;
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = self.area;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::taskbar_bg())
            .fg(crate::theme::taskbar_fg());
        fill_rect(buffer, bounds, base);

        let y = bounds.y;
        let max_x = bounds.x.saturating_add(bounds.width);
        let mut x = bounds.x;

        let start_style = if self.menu.open {
            Style::default()
                .bg(crate::theme::menu_selected_bg())
                .fg(crate::theme::menu_selected_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::start_button_bg())
                .fg(crate::theme::start_button_fg())
                .add_modifier(Modifier::BOLD)
        };
        let start_width = START_LABEL.chars().count() as u16;
        safe_set_string(buffer, bounds, x, y, START_LABEL, start_style);
        self.start_rect = Some(Rect {
            x,
            y,
            width: start_width.min(max_x.saturating_sub(x)),
            height: 1,
        });
        x = x.saturating_add(start_width).saturating_add(1);

        let clock = self.clock.get();
        let clock_chunk = format!(" {clock} ");
        let clock_width = clock_chunk.chars().count() as u16;
        let entries_end = max_x.saturating_sub(clock_width);

        let (widths, gap) = entry_layout(
            self.entries.values().map(TaskbarEntry::label),
            entries_end.saturating_sub(x),
        );
        for ((id, entry), width) in self.entries.iter().zip(widths) {
            if x.saturating_add(width) > entries_end {
                break;
            }
            let chunk = fit_chunk(&entry.label(), width);
            let style = if entry.active {
                Style::default()
                    .bg(crate::theme::taskbar_active_bg())
                    .fg(crate::theme::taskbar_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                base.fg(crate::theme::taskbar_minimized_fg())
                    .add_modifier(Modifier::DIM)
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.entry_hits.push((
                *id,
                Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            ));
            x = x.saturating_add(width).saturating_add(gap);
        }

        if clock_width < bounds.width && !clock.is_empty() {
            safe_set_string(buffer, bounds, entries_end, y, &clock_chunk, base);
        }
    }

    /// Draw the start menu, anchored above the start button and clipped to
    /// `bounds` (normally the desktop area).
    pub fn render_menu(&mut self, frame: &mut UiFrame<'_>, bounds: Rect) {
        if !self.menu.open || self.menu.items.is_empty() {
            return;
        }
        let anchor_x = self.start_rect.map_or(bounds.x, |rect| rect.x);
        let label_width = self
            .menu
            .items
            .iter()
            .map(|item| item.icon.chars().count() + item.title.chars().count() + 1)
            .max()
            .unwrap_or(1) as u16;
        let width = label_width
            .saturating_add(4)
            .min(bounds.width.saturating_sub(anchor_x.saturating_sub(bounds.x)));
        let height = (self.menu.items.len() as u16)
            .saturating_add(2)
            .min(bounds.height);
        if width < 3 || height < 3 {
            return;
        }
        let menu_rect = Rect {
            x: anchor_x,
            y: bounds.y.saturating_add(bounds.height).saturating_sub(height),
            width,
            height,
        };
        let buffer = frame.buffer_mut();
        let clip = bounds.intersection(buffer.area);
        let menu_style = Style::default()
            .bg(crate::theme::menu_bg())
            .fg(crate::theme::menu_fg());
        let selected_style = Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg())
            .add_modifier(Modifier::BOLD);
        fill_rect(buffer, menu_rect.intersection(clip), menu_style);
        self.menu_bounds = Some(menu_rect);

        let inner_x = menu_rect.x.saturating_add(1);
        let inner_width = menu_rect.width.saturating_sub(2) as usize;
        for (idx, item) in self.menu.items.iter().enumerate() {
            let y = menu_rect.y.saturating_add(idx as u16 + 1);
            if y >= menu_rect.y.saturating_add(menu_rect.height).saturating_sub(1) {
                break;
            }
            let selected = idx == self.menu.selected;
            let marker = if selected { ">" } else { " " };
            let line = format!("{marker}{} {}", item.icon, item.title);
            let style = if selected { selected_style } else { menu_style };
            safe_set_string(
                buffer,
                clip,
                inner_x,
                y,
                &truncate_to_width(&line, inner_width),
                style,
            );
            self.menu_hits.push((
                idx,
                Rect {
                    x: menu_rect.x,
                    y,
                    width: menu_rect.width,
                    height: 1,
                },
            ));
        }
    }

    /// Resolve a pointer press. `None` means the press is outside both the
    /// strip and the open menu.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if self.menu.open {
            if let Some((idx, _)) = self
                .menu_hits
                .iter()
                .find(|(_, rect)| rect_contains(*rect, column, row))
            {
                return Some(TaskbarHit::MenuItem(*idx));
            }
            if self
                .menu_bounds
                .is_some_and(|rect| rect_contains(rect, column, row))
            {
                return Some(TaskbarHit::Background);
            }
        }
        if self
            .start_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(TaskbarHit::StartButton);
        }
        if let Some((id, _)) = self
            .entry_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(TaskbarHit::Entry(*id));
        }
        rect_contains(self.area, column, row).then_some(TaskbarHit::Background)
    }
}

/// Chunk widths and the gap between chunks when `labels` share
/// `available` columns.
///
/// Entries keep their natural width (label plus one space each side) when
/// everything fits. Otherwise the space is split evenly so every entry
/// stays on the strip and clickable, down to a single column without gaps.
fn entry_layout(labels: impl Iterator<Item = String>, available: u16) -> (Vec<u16>, u16) {
    let natural: Vec<u16> = labels
        .map(|label| (label.chars().count() as u16).saturating_add(2))
        .collect();
    let count = natural.len() as u16;
    if count == 0 {
        return (natural, ENTRY_GAP);
    }
    let needed = natural
        .iter()
        .fold(ENTRY_GAP.saturating_mul(count - 1), |sum, width| sum.saturating_add(*width));
    if needed <= available {
        return (natural, ENTRY_GAP);
    }
    let gap = if available >= count.saturating_mul(ENTRY_GAP + 1) {
        ENTRY_GAP
    } else {
        0
    };
    let slot = (available.saturating_sub(gap.saturating_mul(count - 1)) / count).max(1);
    (natural.into_iter().map(|width| width.min(slot)).collect(), gap)
}

/// Shrink ` label ` to `width` columns, dropping the padding first.
fn fit_chunk(label: &str, width: u16) -> String {
    let width = width as usize;
    if width >= label.chars().count() + 2 {
        format!(" {label} ")
    } else if width >= 3 {
        format!(" {} ", truncate_to_width(label, width - 2))
    } else {
        truncate_to_width(label, width)
    }
}

pub(crate) fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::buffer::Buffer;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
            .collect()
    }

    fn sample() -> Taskbar {
        let mut bar = Taskbar::new();
        bar.insert(WindowId::from_raw(1), TaskbarEntry::new(">_", "Terminal"));
        bar.insert(WindowId::from_raw(2), TaskbarEntry::new("i", "About"));
        bar
    }

    #[test]
    fn sync_active_leaves_at_most_one() {
        let mut bar = sample();
        bar.sync_active(Some(WindowId::from_raw(2)));
        assert_eq!(bar.entries().filter(|(_, e)| e.active()).count(), 1);
        bar.sync_active(None);
        assert!(bar.entries().all(|(_, e)| !e.active()));
    }

    #[test]
    fn minimizing_clears_active_flag() {
        let mut bar = sample();
        let id = WindowId::from_raw(1);
        bar.sync_active(Some(id));
        bar.set_minimized(id, true);
        let entry = bar.entry(id).expect("entry");
        assert!(entry.minimized());
        assert!(!entry.active());
    }

    #[test]
    fn split_area_reserves_bottom_rows() {
        let mut bar = Taskbar::new();
        let (desk, strip) = bar.split_area(Rect::new(0, 0, 40, 10), 1);
        assert_eq!(desk, Rect::new(0, 0, 40, 9));
        assert_eq!(strip, Rect::new(0, 9, 40, 1));
    }

    #[test]
    fn render_records_entry_hits() {
        let mut bar = sample();
        bar.clock().set_time(
            Local
                .with_ymd_and_hms(2024, 5, 1, 9, 7, 0)
                .single()
                .expect("valid time"),
        );
        let area = Rect::new(0, 0, 80, 5);
        let mut buf = Buffer::empty(area);
        bar.split_area(area, 1);
        bar.begin_frame();
        let mut ui = UiFrame::from_parts(area, &mut buf);
        bar.render(&mut ui);

        let text = row_text(&buf, 4);
        assert!(text.contains("Start"));
        assert!(text.contains("Terminal"));
        assert!(text.contains("09:07"));

        assert_eq!(bar.hit_test(1, 4), Some(TaskbarHit::StartButton));
        let terminal_col = text.find("Terminal").expect("label") as u16;
        // Column from byte offset is fine: everything before it is ASCII
        // except the start glyph, which is three bytes wide.
        let column = terminal_col.saturating_sub(2);
        assert_eq!(
            bar.hit_test(column, 4),
            Some(TaskbarHit::Entry(WindowId::from_raw(1)))
        );
        assert_eq!(bar.hit_test(1, 0), None);
    }

    #[test]
    fn crowded_strip_shrinks_entries_instead_of_dropping_them() {
        let mut bar = Taskbar::new();
        for raw in 1..=8 {
            bar.insert(WindowId::from_raw(raw), TaskbarEntry::new("i", "About Me"));
        }
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        bar.split_area(area, 1);
        bar.begin_frame();
        let mut ui = UiFrame::from_parts(area, &mut buf);
        bar.render(&mut ui);

        let mut reached: Vec<WindowId> = (0..80)
            .filter_map(|x| match bar.hit_test(x, 2) {
                Some(TaskbarHit::Entry(id)) => Some(id),
                _ => None,
            })
            .collect();
        reached.dedup();
        assert_eq!(reached, bar.ids());
        assert!(row_text(&buf, 2).contains(" i Abo "));
    }

    #[test]
    fn entry_layout_keeps_natural_widths_when_they_fit() {
        let labels = || ["ab".to_string(), "cdef".to_string()].into_iter();
        assert_eq!(entry_layout(labels(), 20), (vec![4, 6], 1));
        assert_eq!(entry_layout(labels(), 7), (vec![3, 3], 1));
        assert_eq!(entry_layout(labels(), 3), (vec![1, 1], 0));
        assert_eq!(fit_chunk("cdef", 3), " c ");
        assert_eq!(fit_chunk("cdef", 2), "cd");
    }

    #[test]
    fn menu_navigation_wraps() {
        let mut bar = Taskbar::new();
        bar.set_menu_items(vec![
            StartMenuItem {
                template_id: TemplateId::from("terminal"),
                icon: ">_".into(),
                title: "Terminal".into(),
            },
            StartMenuItem {
                template_id: TemplateId::from("about"),
                icon: "i".into(),
                title: "About".into(),
            },
        ]);
        bar.toggle_menu();
        assert!(bar.menu_open());
        bar.menu_step(false);
        assert_eq!(bar.menu_selected(), 1);
        bar.menu_step(true);
        assert_eq!(bar.menu_selected(), 0);
        bar.close_menu();
        assert!(!bar.menu_open());
    }

    #[test]
    fn open_menu_is_hit_tested_first() {
        let mut bar = Taskbar::new();
        bar.set_menu_items(vec![StartMenuItem {
            template_id: TemplateId::from("about"),
            icon: "i".into(),
            title: "About".into(),
        }]);
        bar.toggle_menu();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let (desk, _) = bar.split_area(area, 1);
        bar.begin_frame();
        let mut ui = UiFrame::from_parts(area, &mut buf);
        bar.render(&mut ui);
        bar.render_menu(&mut ui, desk);
        // One item: menu is three rows tall, sitting on top of the strip.
        assert_eq!(bar.hit_test(2, 9), Some(TaskbarHit::MenuItem(0)));
        assert_eq!(bar.hit_test(2, 8), Some(TaskbarHit::Background));
        assert!(row_text(&buf, 9).contains("About"));
    }
}
