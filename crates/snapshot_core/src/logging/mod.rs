//! Log routing for the viewer and its tests.
//!
//! A single [`LogRouter`] is registered with the `log` facade.  Each record
//! goes to the writer on top of the calling thread's writer stack, or to
//! the process-wide default writer (built with `fern`) when the stack is
//! empty.  [`NullLogWriter`] and [`LogChecker`] are RAII guards that push a
//! writer on creation and pop it on drop.
//!
//! ```rust,ignore
//! snapshot_core::logging::init(log::LevelFilter::Info)?;
//! {
//!     let _quiet = NullLogWriter::new();
//!     log::error!("swallowed");
//! }
//! log::error!("printed");
//! ```

mod checker;
mod null_writer;

pub use checker::{CapturedRecord, LogChecker};
pub use null_writer::NullLogWriter;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, Once};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Destination for routed log records.
pub trait LogWriter {
    fn write(&self, record: &Record);
}

/// Identifies one entry on a thread's writer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriterId(u64);

static NEXT_WRITER_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static WRITERS: RefCell<Vec<(WriterId, Rc<dyn LogWriter>)>> = const { RefCell::new(Vec::new()) };
}

static ROUTER: LogRouter = LogRouter {
    fallback: Mutex::new(None),
};
static INSTALL: Once = Once::new();
static ROUTER_ACTIVE: AtomicBool = AtomicBool::new(false);

/// The logger registered with the `log` facade.
pub struct LogRouter {
    fallback: Mutex<Option<Box<dyn Log>>>,
}

impl Log for LogRouter {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        // the stack is gone while thread-locals are torn down; use the default
        let top = WRITERS
            .try_with(|stack| stack.borrow().last().map(|(_, w)| Rc::clone(w)))
            .ok()
            .flatten();
        if let Some(writer) = top {
            writer.write(record);
            return;
        }
        if let Ok(fallback) = self.fallback.lock() {
            if let Some(logger) = fallback.as_ref() {
                logger.log(record);
            }
        }
    }

    fn flush(&self) {
        if let Ok(fallback) = self.fallback.lock() {
            if let Some(logger) = fallback.as_ref() {
                logger.flush();
            }
        }
    }
}

/// Registers the router with `log` if nobody has yet.
///
/// Safe to call repeatedly; the guards call it so tests need no setup.
pub fn install_router() {
    INSTALL.call_once(|| {
        if log::set_logger(&ROUTER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
            ROUTER_ACTIVE.store(true, Ordering::Release);
        }
    });
}

/// Installs the router with a stderr default writer filtered at `level`.
///
/// Fails when a different logger was registered with `log` first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let (_, stderr) = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:<5}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .into_log();
    set_fallback(stderr);

    install_router();
    if ROUTER_ACTIVE.load(Ordering::Acquire) {
        Ok(())
    } else {
        // another logger was registered first; this call reports it
        log::set_logger(&ROUTER)
    }
}

fn set_fallback(logger: Box<dyn Log>) {
    if let Ok(mut slot) = ROUTER.fallback.lock() {
        *slot = Some(logger);
    }
}

/// Writer currently on top of this thread's stack, `None` for the default.
pub fn active_writer() -> Option<WriterId> {
    WRITERS
        .try_with(|stack| stack.borrow().last().map(|(id, _)| *id))
        .ok()
        .flatten()
}

fn push_writer(writer: Rc<dyn LogWriter>) -> WriterId {
    install_router();
    let id = WriterId(NEXT_WRITER_ID.fetch_add(1, Ordering::Relaxed));
    WRITERS.with(|stack| stack.borrow_mut().push((id, writer)));
    id
}

fn remove_writer(id: WriterId) {
    let _ = WRITERS.try_with(|stack| stack.borrow_mut().retain(|(entry, _)| *entry != id));
}
