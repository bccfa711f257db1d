//! Built-in window templates: what the start menu offers and what
//! `--open` accepts.

mod game2048;
mod info;
mod snake;
mod terminal;

use crate::components::DebugLogComponent;
use crate::components::debug_log::global_debug_log;
use crate::content::{ContentMount, Template, TemplateCatalog};
use crate::error::ContentError;

pub use game2048::Game2048Component;
pub use snake::{SNAKE_STEP, SnakeComponent};

pub const TERMINAL: &str = "terminal";
pub const SNAKE: &str = "snake";
pub const GAME_2048: &str = "2048";
pub const ABOUT: &str = "about";
pub const PROJECTS: &str = "projects";
pub const CONTACT: &str = "contact";
pub const FEEDBACK: &str = "feedback";
pub const RECYCLE_BIN: &str = "recycle-bin";
pub const DEBUG_LOG: &str = "debug-log";

/// Every built-in template, in start-menu order.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(TERMINAL, "Terminal", ">_", terminal::init),
        Template::new(SNAKE, "Snake", "~", snake::init),
        Template::new(GAME_2048, "2048", "▦", game2048::init),
        Template::new(ABOUT, "About Me", "i", info::init_about),
        Template::new(PROJECTS, "Projects", "#", info::init_projects),
        Template::new(CONTACT, "Contact", "@", info::init_contact),
        Template::new(FEEDBACK, "Feedback", "?", info::init_feedback),
        Template::new(RECYCLE_BIN, "Recycle Bin", "*", info::init_recycle_bin),
        Template::new(DEBUG_LOG, "Debug Log", "!", init_debug_log),
    ]
}

pub fn default_catalog() -> TemplateCatalog {
    let mut catalog = TemplateCatalog::new();
    for template in builtin_templates() {
        if let Err(err) = catalog.register(template) {
            tracing::error!(error = %err, "skipping built-in template");
        }
    }
    catalog
}

fn init_debug_log(mount: &mut ContentMount<'_>) -> Result<(), ContentError> {
    let handle = global_debug_log().ok_or_else(|| ContentError::failed("logging is not initialised"))?;
    mount.mount(Box::new(DebugLogComponent::new(handle)));
    Ok(())
}
