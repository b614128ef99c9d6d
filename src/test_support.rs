//! Helpers shared by the test modules across the crate.

use crate::command::CommandIo;
use crate::env::Environment;
use crate::io_adapters::MemWriter;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Serialize tests that change the process working directory.
///
/// `cd` mutates real process state, so every test that calls it (or asserts
/// against the cwd) must hold this guard for its whole body.
pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A temp-dir path unique to this process and call site; not created.
pub(crate) fn unique_temp_dir(tag: &str) -> io::Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    Ok(std::env::temp_dir().join(format!("oxsh_{}_{}_{}", tag, std::process::id(), nanos)))
}

/// An environment detached from the process: no vars, empty search path.
pub(crate) fn bare_env() -> Environment {
    Environment {
        vars: HashMap::new(),
        current_dir: std::env::current_dir().unwrap(),
        search_path: Vec::new(),
        pending_exit: None,
    }
}

/// A capturing IO pair plus handles to read back what was written.
pub(crate) type CaptureHandle = Rc<RefCell<Vec<u8>>>;

pub(crate) fn capture_io() -> (CommandIo, CaptureHandle, CaptureHandle) {
    let (out, out_handle) = MemWriter::with_handle();
    let (err, err_handle) = MemWriter::with_handle();
    (
        CommandIo::new(Box::new(out), Box::new(err)),
        out_handle,
        err_handle,
    )
}

pub(crate) fn as_text(handle: &CaptureHandle) -> String {
    String::from_utf8(handle.borrow().clone()).unwrap()
}
