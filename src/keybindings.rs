use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::content::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleStartMenu,
    CloseWindow,
    MinimizeWindow,
    MaximizeWindow,
    CycleNextWindow,
    CyclePrevWindow,
    DirectionUp,
    DirectionDown,
    DirectionLeft,
    DirectionRight,
    // Start menu navigation
    MenuSelect,
    MenuCancel,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::DirectionUp => Some(Direction::Up),
            Action::DirectionDown => Some(Direction::Down),
            Action::DirectionLeft => Some(Direction::Left),
            Action::DirectionRight => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleStartMenu => "Toggle start menu",
            Action::CloseWindow => "Close active window",
            Action::MinimizeWindow => "Minimize active window",
            Action::MaximizeWindow => "Maximize / restore active window",
            Action::CycleNextWindow => "Next window",
            Action::CyclePrevWindow => "Previous window",
            Action::DirectionUp => "Up",
            Action::DirectionDown => "Down",
            Action::DirectionLeft => "Left",
            Action::DirectionRight => "Right",
            Action::MenuSelect => "Menu select",
            Action::MenuCancel => "Menu cancel",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(ToggleStartMenu, KeyCombo::plain(KeyCode::F(2)));
        kb.add(CloseWindow, KeyCombo::plain(KeyCode::F(4)));
        kb.add(MinimizeWindow, KeyCombo::plain(KeyCode::F(9)));
        kb.add(MaximizeWindow, KeyCombo::plain(KeyCode::F(10)));
        kb.add(CycleNextWindow, KeyCombo::plain(KeyCode::F(6)));
        kb.add(CyclePrevWindow, KeyCombo::new(KeyCode::F(6), KeyModifiers::SHIFT));
        kb.add(DirectionUp, KeyCombo::plain(KeyCode::Up));
        kb.add(DirectionDown, KeyCombo::plain(KeyCode::Down));
        kb.add(DirectionLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(DirectionRight, KeyCombo::plain(KeyCode::Right));
        kb.add(MenuSelect, KeyCombo::plain(KeyCode::Enter));
        kb.add(MenuCancel, KeyCombo::plain(KeyCode::Esc));
        kb
    }
}

impl KeyBindings {
    /// An empty binding table.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// The direction bound to `key`, if any.
    pub fn direction_for(&self, key: &KeyEvent) -> Option<Direction> {
        [
            Action::DirectionUp,
            Action::DirectionDown,
            Action::DirectionLeft,
            Action::DirectionRight,
        ]
        .into_iter()
        .find(|action| self.matches(*action, key))
        .and_then(Action::direction)
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(KeyCombo::display).collect())
            .unwrap_or_default()
    }
}
