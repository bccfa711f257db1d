use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod debug_log;
pub mod terminal;
pub mod text_panel;

pub use debug_log::DebugLogComponent;
pub use terminal::TerminalComponent;
pub use text_panel::TextPanelComponent;

pub use crate::component_context::ComponentContext;

/// Something drawn inside a window body.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Keys reach a component only while its window is active; pointer
    /// events only when they land on its body. Return `true` if consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
