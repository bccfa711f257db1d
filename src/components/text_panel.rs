use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Read-only, scrollable block of text. The first line is shown as a heading.
#[derive(Debug, Clone)]
pub struct TextPanelComponent {
    lines: Vec<String>,
    offset: usize,
    view_height: usize,
}

impl TextPanelComponent {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            offset: 0,
            view_height: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.view_height.max(1))
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.offset as isize + delta;
        self.offset = next.clamp(0, self.max_offset() as isize) as usize;
    }
}

impl Component for TextPanelComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.view_height = area.height as usize;
        self.offset = self.offset.min(self.max_offset());
        let lines: Vec<Line<'_>> = self
            .lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if idx == 0 {
                    Line::styled(line.as_str(), Style::default().add_modifier(Modifier::BOLD))
                } else {
                    Line::raw(line.as_str())
                }
            })
            .collect();
        let paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((self.offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let page = self.view_height.max(1) as isize;
        match event {
            Event::Key(key) => match key.code {
                KeyCode::PageUp => self.scroll_by(-page),
                KeyCode::PageDown => self.scroll_by(page),
                KeyCode::Home => self.offset = 0,
                KeyCode::End => self.offset = self.max_offset(),
                _ => return false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_by(-1),
                MouseEventKind::ScrollDown => self.scroll_by(1),
                _ => return false,
            },
            _ => return false,
        }
        true
    }
}
