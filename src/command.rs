use std::io::{self, Write};
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Exit status reported when a command name cannot be resolved at all.
pub const NOT_FOUND_STATUS: ExitCode = 127;

/// Exit status reported when a resolved command fails to launch.
pub const LAUNCH_FAILED_STATUS: ExitCode = 126;

/// Exit status reported for malformed input (bad quoting, dangling redirect).
pub const SYNTAX_ERROR_STATUS: ExitCode = 2;

/// Abstraction over a writable destination that can also hand a [`Stdio`]
/// handle to a child process.
///
/// Builtins write through the `Write` half; external commands receive the
/// `child_stdio` half. Handing out the child handle borrows rather than
/// consumes the sink, so the caller keeps ownership across a spawn attempt
/// and can still report a launch failure to the same destination.
pub trait OutputSink: Write {
    /// Produce a [`Stdio`] wired to the same destination as this sink.
    fn child_stdio(&self) -> io::Result<Stdio>;
}

/// The pair of output destinations active for one command's execution.
///
/// The executor acquires a `CommandIo` before dispatch — process streams by
/// default, file sinks where a redirect directive says so — and drops it when
/// the command finishes. Restoration of the original streams is therefore
/// structural: nothing global is ever swapped.
pub struct CommandIo {
    out: Box<dyn OutputSink>,
    err: Box<dyn OutputSink>,
}

impl CommandIo {
    pub fn new(out: Box<dyn OutputSink>, err: Box<dyn OutputSink>) -> Self {
        Self { out, err }
    }

    /// The active stdout destination.
    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// The active stderr destination.
    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }

    /// Replace the stdout destination for the remainder of this command.
    pub fn set_out(&mut self, sink: Box<dyn OutputSink>) {
        self.out = sink;
    }

    /// Replace the stderr destination for the remainder of this command.
    pub fn set_err(&mut self, sink: Box<dyn OutputSink>) {
        self.err = sink;
    }

    /// Child-process handles for both destinations, stdout first.
    pub fn child_stdio(&self) -> io::Result<(Stdio, Stdio)> {
        Ok((self.out.child_stdio()?, self.err.child_stdio()?))
    }
}
