//! A marker crawling across the window body, steered with the arrow keys.
//! It exists to exercise a window-owned timer and direction handler; there
//! is no food, score or collision.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::content::{ContentMount, Direction};
use crate::error::ContentError;
use crate::ui::{UiFrame, safe_set_string};

pub const SNAKE_STEP: Duration = Duration::from_millis(120);
const TRAIL_LEN: usize = 8;
const DEFAULT_BOARD: (i32, i32) = (20, 10);

#[derive(Debug)]
struct SnakeState {
    head: (i32, i32),
    heading: (i32, i32),
    trail: VecDeque<(i32, i32)>,
    board: (i32, i32),
    steps: u64,
}

impl Default for SnakeState {
    fn default() -> Self {
        Self {
            head: (DEFAULT_BOARD.0 / 2, DEFAULT_BOARD.1 / 2),
            heading: (0, 0),
            trail: VecDeque::new(),
            board: DEFAULT_BOARD,
            steps: 0,
        }
    }
}

impl SnakeState {
    /// Turning straight back onto the trail is ignored.
    fn steer(&mut self, direction: Direction) {
        let (dx, dy) = match direction {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };
        if self.heading == (-dx, -dy) {
            return;
        }
        self.heading = (dx, dy);
    }

    fn step(&mut self) {
        if self.heading == (0, 0) {
            return;
        }
        self.trail.push_front(self.head);
        self.trail.truncate(TRAIL_LEN);
        let (w, h) = self.board;
        self.head = (
            (self.head.0 + self.heading.0).rem_euclid(w.max(1)),
            (self.head.1 + self.heading.1).rem_euclid(h.max(1)),
        );
        self.steps += 1;
    }

    fn resize(&mut self, width: u16, height: u16) {
        let board = (i32::from(width).max(1), i32::from(height).max(1));
        if board == self.board {
            return;
        }
        self.board = board;
        self.head = (self.head.0.rem_euclid(board.0), self.head.1.rem_euclid(board.1));
        self.trail.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnakeComponent {
    state: Rc<RefCell<SnakeState>>,
}

impl SnakeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> (i32, i32) {
        self.state.borrow().head
    }

    pub fn steps(&self) -> u64 {
        self.state.borrow().steps
    }

    pub fn steer(&self, direction: Direction) {
        self.state.borrow_mut().steer(direction);
    }

    pub fn step(&self) {
        self.state.borrow_mut().step();
    }
}

impl Component for SnakeComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        state.resize(area.width, area.height);
        let style = Style::default().fg(crate::theme::snake_fg());
        let buffer = frame.buffer_mut();
        let cell = |(x, y): (i32, i32)| (area.x + x as u16, area.y + y as u16);
        for &segment in &state.trail {
            let (x, y) = cell(segment);
            safe_set_string(buffer, area, x, y, "·", style);
        }
        let (x, y) = cell(state.head);
        safe_set_string(buffer, area, x, y, "@", style);
        if state.heading == (0, 0) && ctx.focused() {
            safe_set_string(buffer, area, area.x, area.y, "arrows to move", Style::default());
        }
    }
}

pub(super) fn init(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    let snake = SnakeComponent::new();
    let handle = mount.handle();
    let ticker = snake.clone();
    // Paused whenever another window has the keyboard.
    mount.set_timer(SNAKE_STEP, move || {
        if handle.is_active() {
            ticker.step();
        }
    });
    let steering = snake.clone();
    mount.set_direction_handler(move |direction| steering.steer(direction));
    mount.mount(Box::new(snake));
    Ok(())
}
