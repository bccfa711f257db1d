//! Window chrome: the title row with its minimize, maximize and close
//! buttons, plus a single-line border around the body.

use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::FloatRect;
use crate::ui::{UiFrame, fill_rect, safe_set_string, truncate_to_width};

const BUTTON_WIDTH: i32 = 3;
const MINIMIZE_LABEL: &str = "[_]";
const MAXIMIZE_LABEL: &str = "[□]";
const RESTORE_LABEL: &str = "[▫]";
const CLOSE_LABEL: &str = "[x]";

/// Part of a window under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    /// The title row outside the buttons: drag handle and double-click target.
    TitleBar,
    Body,
    None,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    );

    fn hit_test(&self, rect: FloatRect, column: u16, row: u16) -> HeaderAction;

    /// The rectangle content draws into.
    fn inner(&self, rect: FloatRect) -> FloatRect;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopDecorator;

impl DesktopDecorator {
    /// Buttons only fit when the title row can also hold a little title.
    fn has_buttons(rect: FloatRect) -> bool {
        rect.width as i32 >= BUTTON_WIDTH * 3 + 3
    }

    /// Left edges of the minimize, maximize and close buttons.
    fn button_columns(rect: FloatRect) -> [i32; 3] {
        let close = rect.right() - 1 - BUTTON_WIDTH;
        [close - 2 * BUTTON_WIDTH, close - BUTTON_WIDTH, close]
    }
}

impl WindowDecorator for DesktopDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    ) {
        let visible = rect.visible_in(bounds);
        if visible.width == 0 || visible.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let header_style = Style::default()
            .bg(if focused {
                crate::theme::header_active_bg()
            } else {
                crate::theme::header_inactive_bg()
            })
            .fg(crate::theme::header_fg())
            .add_modifier(if focused {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let body_style = Style::default()
            .bg(crate::theme::window_body_bg())
            .fg(crate::theme::window_body_fg());
        let border_style = body_style.fg(crate::theme::window_border());

        fill_rect(buffer, visible, body_style);

        // Title row.
        let header = FloatRect { height: 1, ..rect }.visible_in(bounds);
        fill_rect(buffer, header, header_style);
        let header_y = rect.y;
        let text_room = if Self::has_buttons(rect) {
            rect.width as usize - (BUTTON_WIDTH as usize * 3 + 2)
        } else {
            (rect.width as usize).saturating_sub(2)
        };
        if header_y >= 0 {
            let title = truncate_to_width(title, text_room);
            let x = rect.x + 1;
            if x >= 0 {
                safe_set_string(buffer, header, x as u16, header_y as u16, &title, header_style);
            }
            if Self::has_buttons(rect) {
                let labels = [
                    MINIMIZE_LABEL,
                    if maximized { RESTORE_LABEL } else { MAXIMIZE_LABEL },
                    CLOSE_LABEL,
                ];
                for (x, label) in Self::button_columns(rect).into_iter().zip(labels) {
                    if x >= 0 {
                        safe_set_string(buffer, header, x as u16, header_y as u16, label, header_style);
                    }
                }
            }
        }

        // Side and bottom border.
        let left = rect.x;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        let mut put = |x: i32, y: i32, symbol: &str| {
            if x < 0 || y < 0 {
                return;
            }
            let (x, y) = (x as u16, y as u16);
            if x >= visible.x
                && x < visible.x.saturating_add(visible.width)
                && y >= visible.y
                && y < visible.y.saturating_add(visible.height)
                && let Some(cell) = buffer.cell_mut((x, y))
            {
                cell.set_symbol(symbol);
                cell.set_style(border_style);
            }
        };
        if rect.height > 1 {
            for y in rect.y + 1..bottom {
                put(left, y, "│");
                put(right, y, "│");
            }
            for x in left + 1..right {
                put(x, bottom, "─");
            }
            put(left, bottom, "└");
            put(right, bottom, "┘");
        }
    }

    fn hit_test(&self, rect: FloatRect, column: u16, row: u16) -> HeaderAction {
        if !rect.contains(column, row) {
            return HeaderAction::None;
        }
        if row as i32 != rect.y {
            return HeaderAction::Body;
        }
        if Self::has_buttons(rect) {
            let col = column as i32;
            let [minimize, maximize, close] = Self::button_columns(rect);
            let within = |start: i32| col >= start && col < start + BUTTON_WIDTH;
            if within(close) {
                return HeaderAction::Close;
            }
            if within(maximize) {
                return HeaderAction::Maximize;
            }
            if within(minimize) {
                return HeaderAction::Minimize;
            }
        }
        HeaderAction::TitleBar
    }

    fn inner(&self, rect: FloatRect) -> FloatRect {
        FloatRect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        }
    }
}
