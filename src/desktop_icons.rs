//! Launcher icons laid out on the desktop background, one per template.
//!
//! Icons fill columns top to bottom, left to right. Like the taskbar, the
//! grid only records where it drew each icon; the window manager decides
//! what a press on one means.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::TemplateId;
use crate::taskbar::rect_contains;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

pub const ICON_WIDTH: u16 = 12;
/// Glyph row, title row and one spacer row.
pub const ICON_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub template_id: TemplateId,
    pub icon: String,
    pub title: String,
}

#[derive(Debug, Default)]
pub struct DesktopIcons {
    icons: Vec<DesktopIcon>,
    selected: Option<usize>,
    hits: Vec<(usize, Rect)>,
}

impl DesktopIcons {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn icon(&self, index: usize) -> Option<&DesktopIcon> {
        self.icons.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.icons.len());
    }

    /// Where icon `index` sits inside `desktop`. The bottom row is left free
    /// for the desktop hint.
    pub fn slot(desktop: Rect, index: usize) -> Rect {
        let usable = desktop.height.saturating_sub(1);
        let per_column = (usable / ICON_HEIGHT).max(1) as usize;
        let column = (index / per_column) as u16;
        let row = (index % per_column) as u16;
        Rect {
            x: desktop
                .x
                .saturating_add(1)
                .saturating_add(column.saturating_mul(ICON_WIDTH)),
            y: desktop.y.saturating_add(row.saturating_mul(ICON_HEIGHT)),
            width: ICON_WIDTH,
            height: ICON_HEIGHT - 1,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, desktop: Rect) {
        self.hits.clear();
        let buffer = frame.buffer_mut();
        let clip = desktop.intersection(buffer.area);
        if clip.width == 0 || clip.height == 0 {
            return;
        }
        let normal = Style::default()
            .bg(crate::theme::desktop_bg())
            .fg(crate::theme::desktop_fg());
        let selected = Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg())
            .add_modifier(Modifier::BOLD);
        for (index, icon) in self.icons.iter().enumerate() {
            let slot = Self::slot(desktop, index);
            if slot.x >= clip.x.saturating_add(clip.width)
                || slot.y.saturating_add(slot.height) > clip.y.saturating_add(clip.height)
            {
                continue;
            }
            let style = if self.selected == Some(index) {
                selected
            } else {
                normal
            };
            let glyph = centered(&format!("[{}]", icon.icon), ICON_WIDTH);
            let title = centered(&icon.title, ICON_WIDTH);
            safe_set_string(buffer, clip, slot.x, slot.y, &glyph, normal);
            safe_set_string(buffer, clip, slot.x, slot.y + 1, &title, style);
            self.hits.push((index, slot.intersection(clip)));
        }
    }

    /// The icon drawn under the pointer in the last frame.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(index, _)| *index)
    }
}

fn centered(text: &str, width: u16) -> String {
    let width = width as usize;
    let text = truncate_to_width(text, width);
    let spare = width - text.chars().count();
    let left = spare / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(spare - left))
}
