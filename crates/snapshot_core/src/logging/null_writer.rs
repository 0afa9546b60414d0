use std::rc::Rc;

use log::Record;

use super::{active_writer, push_writer, remove_writer, LogWriter, WriterId};

struct Discard;

impl LogWriter for Discard {
    fn write(&self, _record: &Record) {}
}

/// Silences logging on the current thread while it is alive.
///
/// Every record, whatever its level, is discarded.  Dropping the guard
/// restores whichever writer was active before it.
pub struct NullLogWriter {
    id: WriterId,
}

impl NullLogWriter {
    pub fn new() -> Self {
        Self {
            id: push_writer(Rc::new(Discard)),
        }
    }

    /// True while this guard is the thread's active writer.
    pub fn is_installed(&self) -> bool {
        active_writer() == Some(self.id)
    }
}

impl Default for NullLogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NullLogWriter {
    fn drop(&mut self) {
        remove_writer(self.id);
    }
}
