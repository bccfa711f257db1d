//! Static information panels. The real portfolio content (uploads, the
//! feedback board, the recycle bin's soft-deleted files) lives elsewhere;
//! these windows only describe it.

use indoc::indoc;

use crate::components::TextPanelComponent;
use crate::content::ContentMount;
use crate::error::ContentError;

const ABOUT: &str = indoc! {"
    About Me

    Hi! This desktop runs entirely inside your terminal.
    Open windows from the Start menu (F2) or by typing
    a command in the Terminal.

    F4 closes, F9 minimizes and F10 maximizes the active
    window. F6 cycles between windows. Drag a window by
    its title bar; double-click the title to maximize.
"};

const PROJECTS: &str = indoc! {"
    Projects

    desk-wm       A desktop shell for the terminal
    snake         A moving-marker demo steered with the arrows

    Uploaded project files are not available in this build.
"};

const CONTACT: &str = indoc! {"
    Contact

    Say hello through the Feedback window, or leave a note
    in the terminal with `echo`.
"};

const FEEDBACK: &str = indoc! {"
    Feedback

    The feedback board is read-only here. Suggestions are
    not stored.
"};

const RECYCLE_BIN: &str = indoc! {"
    Recycle Bin

    The Recycle Bin is empty.
"};

fn mount_text(mount: &mut ContentMount<'_>, text: &str) -> Result<(), ContentError> {
    mount.mount(Box::new(TextPanelComponent::new(text)));
    Ok(())
}

pub(super) fn init_about(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    mount_text(mount, ABOUT)
}

pub(super) fn init_projects(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    mount_text(mount, PROJECTS)
}

pub(super) fn init_contact(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    mount_text(mount, CONTACT)
}

pub(super) fn init_feedback(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    mount_text(mount, FEEDBACK)
}

pub(super) fn init_recycle_bin(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    mount_text(mount, RECYCLE_BIN)
}
