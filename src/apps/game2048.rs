//! The 2048 window. It shows an empty 4x4 board and records the moves its
//! direction handler receives; there is no tile sliding, merging or score.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::content::{ContentMount, Direction};
use crate::error::ContentError;
use crate::ui::{UiFrame, safe_set_string};

const BOARD_SIZE: u16 = 4;
const CELL_WIDTH: u16 = 6;
const RECENT_MOVES: usize = 6;

#[derive(Debug, Default)]
struct MoveLog {
    total: u32,
    recent: Vec<Direction>,
}

impl MoveLog {
    fn record(&mut self, direction: Direction) {
        self.total += 1;
        self.recent.push(direction);
        if self.recent.len() > RECENT_MOVES {
            self.recent.remove(0);
        }
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
        Direction::Left => "←",
        Direction::Right => "→",
    }
}

#[derive(Debug, Clone, Default)]
pub struct Game2048Component {
    log: Rc<RefCell<MoveLog>>,
}

impl Game2048Component {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> u32 {
        self.log.borrow().total
    }

    pub fn last_move(&self) -> Option<Direction> {
        self.log.borrow().recent.last().copied()
    }

    pub fn record(&self, direction: Direction) {
        self.log.borrow_mut().record(direction);
    }
}

impl Component for Game2048Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let log = self.log.borrow();
        let buffer = frame.buffer_mut();
        let trail: Vec<&str> = log.recent.iter().map(|d| arrow(*d)).collect();
        safe_set_string(
            buffer,
            area,
            area.x,
            area.y,
            &format!("Moves: {}  {}", log.total, trail.join(" ")),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let row = format!("{:>5} ", ".").repeat(BOARD_SIZE as usize);
        for r in 0..BOARD_SIZE {
            safe_set_string(buffer, area, area.x, area.y + 1 + r, &row, Style::default());
        }
        if log.total == 0 && ctx.focused() {
            let hint_y = area.y.saturating_add(BOARD_SIZE + 2);
            let hint_x = area.x.saturating_add(CELL_WIDTH / 2);
            safe_set_string(buffer, area, hint_x, hint_y, "arrows slide the board", Style::default());
        }
    }
}

pub(super) fn init(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    let game = Game2048Component::new();
    let recorder = game.clone();
    mount.set_direction_handler(move |direction| recorder.record(direction));
    mount.mount(Box::new(game));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn records_moves_in_order() {
        let game = Game2048Component::new();
        assert_eq!(game.last_move(), None);
        for direction in [Direction::Left, Direction::Up, Direction::Up] {
            game.record(direction);
        }
        assert_eq!(game.moves(), 3);
        assert_eq!(game.last_move(), Some(Direction::Up));
    }

    #[test]
    fn recent_moves_are_bounded() {
        let game = Game2048Component::new();
        for _ in 0..20 {
            game.record(Direction::Right);
        }
        game.record(Direction::Down);
        assert_eq!(game.moves(), 21);
        assert_eq!(game.log.borrow().recent.len(), RECENT_MOVES);
        assert_eq!(game.last_move(), Some(Direction::Down));
    }

    #[test]
    fn render_shows_count_and_trail() {
        let mut game = Game2048Component::new();
        game.record(Direction::Left);
        game.record(Direction::Right);
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            game.render(&mut ui, area, &ComponentContext::new(true));
        }
        let header: String = (0..area.width)
            .map(|x| buf.cell((x, 0)).map_or(" ", |c| c.symbol()))
            .collect();
        assert_eq!(header.trim_end(), "Moves: 2  ← →");
    }
}
