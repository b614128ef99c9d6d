use crate::command::OutputSink;
use std::cell::RefCell;
use std::fs::File;
use std::io::{Result as IoResult, Write};
use std::process::Stdio;
use std::rc::Rc;

/// Sink backed by an open redirect-target file.
///
/// Owned by the executor for the duration of one command; dropping it closes
/// the file, which is what releases the redirection.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl Write for FileSink {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.file.write(data)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.file.flush()
    }
}

impl OutputSink for FileSink {
    /// Children get a duplicated descriptor, so the parent keeps its handle
    /// (and the append/truncate mode travels with the duplicate).
    fn child_stdio(&self) -> IoResult<Stdio> {
        Ok(Stdio::from(self.file.try_clone()?))
    }
}

/// Memory-backed writer for capturing command output.
///
/// Used by tests and embedders that want to observe what a command wrote
/// without touching the real process streams.
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self {
            buf: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Create a writer and return it together with a handle that can read
    /// the collected bytes after the command has run.
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl OutputSink for MemWriter {
    /// A memory buffer cannot be handed to another process; a child wired to
    /// this sink writes to the null device.
    fn child_stdio(&self) -> IoResult<Stdio> {
        Ok(Stdio::null())
    }
}
