use crate::components::TerminalComponent;
use crate::components::terminal::TYPEWRITER_STEP;
use crate::content::ContentMount;
use crate::error::ContentError;

/// Prompt in the body; Up and Down walk the command history. The window
/// timer drives the typewriter, so closing the window stops it mid-text.
pub(super) fn init(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    let terminal = TerminalComponent::new(mount.window_id(), mount.requests());
    mount.set_timer(TYPEWRITER_STEP, terminal.typewriter());
    mount.set_direction_handler(terminal.history_handler());
    mount.mount(Box::new(terminal));
    Ok(())
}
