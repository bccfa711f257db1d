//! Tracing setup. The terminal belongs to the UI, so log output goes to the
//! in-memory debug log (shown by the Debug Log window) and optionally to a
//! file as well. Never to stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::components::debug_log::{
    DEFAULT_MAX_LINES, DebugLogHandle, DebugLogWriter, global_debug_log, set_global_debug_log,
};

pub struct DelegatingWriter {
    buffer: Option<DebugLogWriter>,
    file: Option<Arc<File>>,
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.write_all(buf)?;
        }
        if let Some(file) = self.file.as_deref() {
            let mut file: &File = file;
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.flush()?;
        }
        if let Some(file) = self.file.as_deref() {
            let mut file: &File = file;
            file.flush()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    buffer: Option<DebugLogHandle>,
    file: Option<Arc<File>>,
}

impl SubscriberMakeWriter {
    pub fn new(buffer: Option<DebugLogHandle>, file: Option<File>) -> Self {
        Self {
            buffer,
            file: file.map(Arc::new),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter {
            buffer: self.buffer.as_ref().map(DebugLogHandle::writer),
            file: self.file.clone(),
        }
    }
}

pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns the debug log buffer the Debug Log
/// window reads from. Safe to call more than once; later calls reuse the
/// existing buffer and leave the first subscriber in place.
pub fn init(log_file: Option<&Path>) -> io::Result<DebugLogHandle> {
    let handle = match global_debug_log() {
        Some(handle) => handle,
        None => {
            let handle = DebugLogHandle::new(DEFAULT_MAX_LINES);
            set_global_debug_log(handle.clone());
            global_debug_log().unwrap_or(handle)
        }
    };
    let file = log_file.map(open_log_file).transpose()?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter::new(Some(handle.clone()), file))
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .compact()
        .try_init();
    Ok(handle)
}
