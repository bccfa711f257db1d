//! Raw key event cleanup applied before events reach the window manager.
//!
//! Terminals that report key releases (Windows consoles, kitty protocol)
//! would otherwise type every character twice into a focused prompt.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the event should be dropped.
    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            KeyEventKind::Repeat | KeyEventKind::Press => {}
        }
        // Held Esc would otherwise open and close the start menu repeatedly.
        if key.code == KeyCode::Esc {
            if self.esc_down && cfg!(windows) {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        // Typed capitals already carry the case; a SHIFT flag on top would
        // stop them from reaching the prompt as plain characters.
        if let KeyCode::Char(ch) = key.code
            && ch.is_uppercase()
        {
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        key.kind = KeyEventKind::Press;
        Some(Event::Key(key))
    }
}
