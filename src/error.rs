use std::io;

use thiserror::Error;

/// Errors surfaced by the shell itself.
///
/// Stale window ids are deliberately absent: operating on a window that is
/// no longer registered is a silent no-op, never an error.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown window template `{0}`")]
    UnknownTemplate(String),
    #[error("window template `{0}` is already registered")]
    DuplicateTemplate(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures reported by hosted content (initializers and cleanup callbacks).
///
/// These are logged by the window manager and never abort a core transition.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ContentError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
