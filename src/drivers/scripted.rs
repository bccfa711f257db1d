//! An input driver fed from a list, for driving the shell in tests and
//! demos without a terminal.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

#[derive(Debug, Default)]
pub struct ScriptedDriver {
    /// `None` entries are idle polls: the loop sees a quiet interval.
    script: VecDeque<Option<Event>>,
    mouse_capture: bool,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> &mut Self {
        self.script.push_back(Some(event));
        self
    }

    /// Make the next poll report no input, so the loop ticks and draws.
    pub fn pause(&mut self) -> &mut Self {
        self.script.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        match self.script.front() {
            Some(Some(_)) => Ok(true),
            Some(None) => {
                self.script.pop_front();
                Ok(false)
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            )),
        }
    }

    fn read(&mut self) -> io::Result<Event> {
        match self.script.pop_front() {
            Some(Some(event)) => Ok(event),
            _ => Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "no scripted event ready",
            )),
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}
