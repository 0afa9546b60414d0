use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, Record};

use super::{push_writer, remove_writer, LogWriter, WriterId};

/// One record seen by a [`LogChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

#[derive(Default)]
struct Capture {
    records: RefCell<Vec<CapturedRecord>>,
}

impl LogWriter for Capture {
    fn write(&self, record: &Record) {
        self.records.borrow_mut().push(CapturedRecord {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }
}

/// Captures this thread's log records so tests can assert on them.
///
/// ```rust,ignore
/// let checker = LogChecker::new();
/// log::error!("Could not read the font data");
/// assert!(checker.has_message(log::Level::Error, "font data"));
/// assert!(!checker.has_any_messages());
/// ```
pub struct LogChecker {
    id: WriterId,
    capture: Rc<Capture>,
}

impl LogChecker {
    pub fn new() -> Self {
        let capture = Rc::new(Capture::default());
        let id = push_writer(capture.clone());
        Self { id, capture }
    }

    /// Whether any captured record has `level` and contains `substring`.
    ///
    /// Clears everything captured so far, matched or not.
    pub fn has_message(&self, level: Level, substring: &str) -> bool {
        self.take_records()
            .iter()
            .any(|r| r.level == level && r.message.contains(substring))
    }

    pub fn has_any_messages(&self) -> bool {
        !self.capture.records.borrow().is_empty()
    }

    /// Drains and returns everything captured so far.
    pub fn take_records(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.capture.records.borrow_mut())
    }
}

impl Default for LogChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogChecker {
    fn drop(&mut self) {
        remove_writer(self.id);
    }
}
