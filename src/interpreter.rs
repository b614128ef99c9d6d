use crate::builtin::Builtin;
use crate::command::{
    CommandIo, ExitCode, LAUNCH_FAILED_STATUS, NOT_FOUND_STATUS, OutputSink, SYNTAX_ERROR_STATUS,
};
use crate::env::Environment;
use crate::external::{ExternalCommand, find_command_path};
use crate::io_adapters::FileSink;
use crate::lexer;
use crate::redirect::{self, Redirections};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};
use std::process::Stdio;

/// The interactive command interpreter.
///
/// One `Interpreter` owns the [`Environment`] for a session and executes one
/// line at a time: tokenize, cut out redirections, dispatch to a builtin or
/// an external program, report the outcome. Nothing a command does can crash
/// the interpreter; only the `exit` builtin (or end of input) ends a session.
///
/// Example
/// ```
/// use oxsh::Interpreter;
/// let mut sh = Interpreter::new();
/// let code = sh.execute_line("echo hello world");
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    /// An interpreter over the current process environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// An interpreter over a caller-assembled environment.
    pub fn with_env(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Execute one input line against the process's own streams.
    pub fn execute_line(&mut self, line: &str) -> ExitCode {
        let io = CommandIo::new(
            Box::new(InheritedStdout(io::stdout())),
            Box::new(InheritedStderr(io::stderr())),
        );
        self.execute_line_with_io(line, io)
    }

    /// Execute one input line with caller-provided default sinks.
    ///
    /// The sinks passed in are this command's streams unless a redirect
    /// directive replaces one of them with a file sink. Either way the sinks
    /// live exactly as long as this call — dropping them is what restores
    /// the previous state, on every exit path.
    pub fn execute_line_with_io(&mut self, line: &str, mut io: CommandIo) -> ExitCode {
        let words = match lexer::split_line(line) {
            Ok(words) => words,
            Err(e) => {
                let _ = writeln!(io.err(), "{}", e);
                return SYNTAX_ERROR_STATUS;
            }
        };
        if words.is_empty() {
            // Blank line: no dispatch, reprompt.
            return 0;
        }

        let (argv, redirections) = match redirect::extract(words) {
            Ok(parts) => parts,
            Err(e) => {
                let _ = writeln!(io.err(), "{}", e);
                return SYNTAX_ERROR_STATUS;
            }
        };

        if let Err(status) = apply_redirections(&mut io, &redirections) {
            return status;
        }

        let Some(name) = argv.first() else {
            // The line was redirections only; targets exist now, nothing runs.
            return 0;
        };
        let args = &argv[1..];

        if let Some(builtin) = Builtin::from_name(name) {
            match builtin.run(args, &mut io, &mut self.env) {
                Ok(code) => code,
                Err(e) => {
                    let _ = writeln!(io.err(), "{}: {}", name, e);
                    1
                }
            }
        } else {
            match find_command_path(&self.env.search_path, name) {
                Some(program) => {
                    let command = ExternalCommand::new(program, args.to_vec());
                    match command.execute(&io, &self.env) {
                        Ok(code) => code,
                        Err(e) => {
                            let _ = writeln!(io.err(), "{}: {}", name, e);
                            LAUNCH_FAILED_STATUS
                        }
                    }
                }
                None => {
                    let _ = writeln!(io.err(), "{}: command not found", name);
                    NOT_FOUND_STATUS
                }
            }
        }
    }

    /// The interactive Read-Eval-Print Loop.
    ///
    /// Prompts with `"$ "`, executes each line, and returns the status the
    /// session ended with: the `exit` builtin's argument, or 0 on end of
    /// input. Ctrl-C abandons the current line and prompts again.
    pub fn repl(&mut self) -> rustyline::Result<ExitCode> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("$ ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    self.execute_line(&line);
                    if let Some(status) = self.env.pending_exit {
                        return Ok(status);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(0),
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap in file sinks for every stream a directive names.
///
/// An unopenable target aborts the command: the failure is reported to the
/// (still previous) stderr sink and the caller gets the status to return.
fn apply_redirections(io: &mut CommandIo, redirections: &Redirections) -> Result<(), ExitCode> {
    if redirections.is_empty() {
        return Ok(());
    }
    if let Some(spec) = &redirections.stdout {
        match spec.open() {
            Ok(file) => io.set_out(Box::new(FileSink::new(file))),
            Err(e) => {
                let _ = writeln!(io.err(), "{}: {}", spec.path, e);
                return Err(1);
            }
        }
    }
    if let Some(spec) = &redirections.stderr {
        match spec.open() {
            Ok(file) => io.set_err(Box::new(FileSink::new(file))),
            Err(e) => {
                let _ = writeln!(io.err(), "{}: {}", spec.path, e);
                return Err(1);
            }
        }
    }
    Ok(())
}

struct InheritedStdout(io::Stdout);

impl Write for InheritedStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl OutputSink for InheritedStdout {
    fn child_stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

struct InheritedStderr(io::Stderr);

impl Write for InheritedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl OutputSink for InheritedStderr {
    fn child_stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}
