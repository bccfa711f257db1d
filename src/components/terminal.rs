//! A small command prompt. Commands print text or ask the shell to open
//! other windows; there is no process spawning.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::content::{Direction, ShellRequests};
use crate::ui::UiFrame;
use crate::window::WindowId;

const PROMPT: &str = "C:\\>";
const MAX_OUTPUT_LINES: usize = 500;

/// Cadence of the typewriter used for `echo art`.
pub const TYPEWRITER_STEP: Duration = Duration::from_millis(15);
const TYPEWRITER_CHARS_PER_STEP: usize = 3;

const BANNER: &str = indoc! {r#"
    desk-wm terminal [Version 0.1]
    Type "help" for a list of commands.
"#};

const HELP: &str = indoc! {"
    Available commands:
      help          - Show this help message
      echo [text]   - Print text to terminal
      echo art      - Display some ASCII art
      date          - Show current date and time
      clear         - Clear the terminal screen
      about         - Open the \"About Me\" window
      projects      - Open the \"Projects\" window
      contact       - Open the \"Contact\" window
      exit          - Close this terminal
"};

const ART: &str = indoc! {r"
     _           _
    | |         | |
  __| | ___  ___| | __
 / _` |/ _ \/ __| |/ /
| (_| |  __/\__ \   <
 \__,_|\___||___/_|\_\
"};

#[derive(Debug, Default)]
struct TerminalState {
    output: Vec<String>,
    input: String,
    history: Vec<String>,
    /// Position while browsing history; `history.len()` means "not browsing".
    history_index: usize,
    /// Characters still to be typed out. Input is ignored until it drains.
    typing: VecDeque<char>,
}

impl TerminalState {
    fn print(&mut self, text: &str) {
        self.output.extend(text.lines().map(str::to_string));
        self.trim_output();
    }

    fn trim_output(&mut self) {
        let excess = self.output.len().saturating_sub(MAX_OUTPUT_LINES);
        if excess > 0 {
            self.output.drain(..excess);
        }
    }

    fn start_typing(&mut self, text: &str) {
        self.output.push(String::new());
        self.typing.extend(text.trim_end_matches('\n').chars());
    }

    fn type_step(&mut self, count: usize) {
        for _ in 0..count {
            match self.typing.pop_front() {
                None => break,
                Some('\n') => self.output.push(String::new()),
                Some(ch) => match self.output.last_mut() {
                    Some(line) => line.push(ch),
                    None => self.output.push(ch.to_string()),
                },
            }
        }
        self.trim_output();
    }

    fn browse_history(&mut self, direction: Direction) {
        match direction {
            Direction::Up if self.history_index > 0 => {
                self.history_index -= 1;
            }
            Direction::Down if self.history_index < self.history.len() => {
                self.history_index += 1;
            }
            _ => return,
        }
        self.input = self
            .history
            .get(self.history_index)
            .cloned()
            .unwrap_or_default();
    }
}

#[derive(Debug)]
pub struct TerminalComponent {
    window: WindowId,
    requests: ShellRequests,
    state: Rc<RefCell<TerminalState>>,
}

impl TerminalComponent {
    pub fn new(window: WindowId, requests: ShellRequests) -> Self {
        let mut state = TerminalState::default();
        state.print(BANNER);
        Self {
            window,
            requests,
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Arrow-key handler for the window: Up and Down walk the history.
    pub fn history_handler(&self) -> impl FnMut(Direction) + 'static {
        let state = Rc::clone(&self.state);
        move |direction| state.borrow_mut().browse_history(direction)
    }

    /// Timer task for the window: types out pending text a few characters
    /// per step.
    pub fn typewriter(&self) -> impl FnMut() + 'static {
        let state = Rc::clone(&self.state);
        move || state.borrow_mut().type_step(TYPEWRITER_CHARS_PER_STEP)
    }

    pub fn is_typing(&self) -> bool {
        !self.state.borrow().typing.is_empty()
    }

    pub fn output(&self) -> Vec<String> {
        self.state.borrow().output.clone()
    }

    pub fn input(&self) -> String {
        self.state.borrow().input.clone()
    }

    pub fn execute(&mut self, line: &str) {
        let mut state = self.state.borrow_mut();
        let line = line.trim();
        if !line.is_empty() {
            state.history.push(line.to_string());
        }
        state.history_index = state.history.len();
        state.print(&format!("{PROMPT}{line}"));
        let (command, args) = line.split_once(' ').unwrap_or((line, ""));
        match command.to_lowercase().as_str() {
            "" => {}
            "help" => state.print(HELP),
            "echo" if args.trim().eq_ignore_ascii_case("art") => state.start_typing(ART),
            "echo" => state.print(args),
            "date" => state.print(&Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
            "clear" => state.output.clear(),
            "about" => {
                self.requests.open("about");
                state.print("Opening \"About Me\"...");
            }
            "projects" => {
                self.requests.open("projects");
                state.print("Opening \"Projects\"...");
            }
            "contact" => {
                self.requests.open("contact");
                state.print("Opening \"Contact\"...");
            }
            "exit" => self.requests.close(self.window),
            other => state.print(&format!(
                "'{other}' is not recognized as an internal or external command."
            )),
        }
    }
}

impl Component for TerminalComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let state = self.state.borrow();
        let mut lines: Vec<Line<'_>> = state.output.iter().map(|l| Line::raw(l.as_str())).collect();
        let cursor = if ctx.focused() { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(crate::theme::prompt_fg())),
            Span::raw(state.input.as_str()),
            Span::raw(cursor),
        ]));
        let overflow = lines.len().saturating_sub(area.height as usize);
        let paragraph = Paragraph::new(Text::from(lines)).scroll((overflow.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        if self.is_typing() {
            return matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Enter);
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.state.borrow_mut().input.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.state.borrow_mut().input.pop();
                true
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.state.borrow_mut().input);
                self.execute(&line);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ShellRequest, TemplateId};
    use crossterm::event::KeyEvent;

    fn terminal() -> (TerminalComponent, ShellRequests) {
        let requests = ShellRequests::new();
        (TerminalComponent::new(WindowId::from_raw(1), requests.clone()), requests)
    }

    fn type_line(term: &mut TerminalComponent, text: &str) {
        let ctx = ComponentContext::new(true);
        for ch in text.chars() {
            term.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)), &ctx);
        }
        term.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), &ctx);
    }

    #[test]
    fn echo_prints_arguments() {
        let (mut term, _) = terminal();
        type_line(&mut term, "echo hello world");
        let out = term.output();
        assert!(out.iter().any(|l| l == "C:\\>echo hello world"));
        assert_eq!(out.last().map(String::as_str), Some("hello world"));
    }

    #[test]
    fn unknown_command_is_reported() {
        let (mut term, _) = terminal();
        term.execute("frobnicate now");
        assert!(
            term.output()
                .iter()
                .any(|l| l.contains("'frobnicate' is not recognized"))
        );
    }

    #[test]
    fn window_commands_become_shell_requests() {
        let (mut term, requests) = terminal();
        term.execute("about");
        term.execute("exit");
        assert_eq!(
            requests.drain(),
            vec![
                ShellRequest::Open(TemplateId::from("about")),
                ShellRequest::Close(WindowId::from_raw(1)),
            ]
        );
    }

    #[test]
    fn clear_empties_output() {
        let (mut term, _) = terminal();
        term.execute("help");
        term.execute("clear");
        assert!(term.output().is_empty());
    }

    #[test]
    fn echo_art_is_typed_out_by_the_timer() {
        let (mut term, _) = terminal();
        let before = term.output().len();
        term.execute("echo art");
        assert!(term.is_typing());
        assert_eq!(term.output().len(), before + 2);

        // Keys are swallowed while the art is still being typed.
        type_line(&mut term, "date");
        assert_eq!(term.input(), "");

        let mut tick = term.typewriter();
        let mut steps = 0;
        while term.is_typing() {
            tick();
            steps += 1;
        }
        assert!(steps > 1);
        let out = term.output();
        let art: Vec<_> = ART.trim_end_matches('\n').lines().collect();
        assert_eq!(&out[out.len() - art.len()..], art.as_slice());

        type_line(&mut term, "echo done");
        assert_eq!(term.output().last().map(String::as_str), Some("done"));
    }

    #[test]
    fn history_walks_with_arrows() {
        let (mut term, _) = terminal();
        term.execute("date");
        term.execute("echo hi");
        let mut handler = term.history_handler();
        handler(Direction::Up);
        assert_eq!(term.input(), "echo hi");
        handler(Direction::Up);
        assert_eq!(term.input(), "date");
        handler(Direction::Up);
        assert_eq!(term.input(), "date");
        handler(Direction::Down);
        handler(Direction::Down);
        assert_eq!(term.input(), "");
    }
}
