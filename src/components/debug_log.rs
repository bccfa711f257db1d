use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

pub const DEFAULT_MAX_LINES: usize = 2000;

static GLOBAL_LOG: OnceLock<DebugLogHandle> = OnceLock::new();

pub fn set_global_debug_log(handle: DebugLogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_debug_log() -> Option<DebugLogHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct DebugLogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl DebugLogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

/// Ring buffer of log lines, shared between the tracing writer and every
/// open Debug Log window.
#[derive(Clone, Debug)]
pub struct DebugLogHandle {
    inner: Arc<Mutex<DebugLogBuffer>>,
}

impl DebugLogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DebugLogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|buffer| buffer.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|buffer| buffer.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn writer(&self) -> DebugLogWriter {
        DebugLogWriter::new(self.clone())
    }
}

/// `io::Write` adapter that splits written bytes into lines.
#[derive(Debug)]
pub struct DebugLogWriter {
    handle: DebugLogHandle,
    pending: Vec<u8>,
}

impl DebugLogWriter {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        if self.pending.is_empty() {
            return;
        }
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            self.handle.push(line.to_string());
        }
    }
}

impl Write for DebugLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

impl Drop for DebugLogWriter {
    fn drop(&mut self) {
        self.flush_pending(true);
    }
}

/// Tail view of a [`DebugLogHandle`]. Follows new lines until the user
/// scrolls up; scrolling back to the bottom resumes following.
#[derive(Debug)]
pub struct DebugLogComponent {
    handle: DebugLogHandle,
    offset: usize,
    follow_tail: bool,
    last_total: usize,
    last_view: usize,
}

impl DebugLogComponent {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self {
            handle,
            offset: 0,
            follow_tail: true,
            last_total: 0,
            last_view: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.last_total.saturating_sub(self.last_view)
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = (self.offset as isize + delta).clamp(0, self.max_offset() as isize);
        self.offset = next as usize;
        self.follow_tail = self.offset >= self.max_offset();
    }
}

impl Component for DebugLogComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = self.handle.lines();
        self.last_total = lines.len();
        self.last_view = area.height as usize;
        if self.follow_tail {
            self.offset = self.max_offset();
        }
        self.offset = self.offset.min(self.max_offset());

        let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
        let scroll_top = self.offset.min(u16::MAX as usize) as u16;
        let mut paragraph = Paragraph::new(text).scroll((scroll_top, 0));
        if ctx.focused() {
            paragraph = paragraph.style(Style::default().fg(crate::theme::log_highlight()));
        }
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let page = self.last_view.max(1) as isize;
        match event {
            Event::Key(key) => match key.code {
                KeyCode::PageUp => self.scroll_by(-page),
                KeyCode::PageDown => self.scroll_by(page),
                KeyCode::Home => self.scroll_by(-(self.offset as isize)),
                KeyCode::End => self.scroll_by(self.max_offset() as isize),
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
