//! Commands implemented inside the interpreter itself.
//!
//! The set is fixed at compile time and dispatched through one `match`; the
//! same enum answers `type`'s "is a shell builtin" question. Handlers write
//! their own user-facing diagnostics to the active stderr sink and report
//! failure through a non-zero status; an `Err` escaping a handler means an
//! unexpected I/O failure, not a user error.

use crate::command::{CommandIo, ExitCode};
use crate::env::Environment;
use crate::external::find_command_path;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Echo,
    Exit,
    Pwd,
    Type,
}

impl Builtin {
    /// Look up a command word in the builtin table.
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "cd" => Some(Builtin::Cd),
            "echo" => Some(Builtin::Echo),
            "exit" => Some(Builtin::Exit),
            "pwd" => Some(Builtin::Pwd),
            "type" => Some(Builtin::Type),
            _ => None,
        }
    }

    /// Canonical name of the command, e.g. "echo" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Echo => "echo",
            Builtin::Exit => "exit",
            Builtin::Pwd => "pwd",
            Builtin::Type => "type",
        }
    }

    /// Execute the builtin with its argument words (command name stripped).
    pub fn run(
        self,
        args: &[String],
        io: &mut CommandIo,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match self {
            Builtin::Cd => cd(args, io, env),
            Builtin::Echo => echo(args, io),
            Builtin::Exit => exit(args, io, env),
            Builtin::Pwd => pwd(io, env),
            Builtin::Type => type_of(args, io, env),
        }
    }
}

/// Expand a leading `~` or `~/` to the home directory, if one is known.
fn expand_home(path: &str, env: &Environment) -> PathBuf {
    if let Some(home) = env.home() {
        if path == "~" {
            return PathBuf::from(home);
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Change the working directory; with no argument, go home.
///
/// Arguments beyond the first are ignored. On success both the process
/// working directory and `env.current_dir` move — this is the only place in
/// the interpreter that mutates either.
fn cd(args: &[String], io: &mut CommandIo, env: &mut Environment) -> Result<ExitCode> {
    let requested = match args.first() {
        Some(arg) => arg.clone(),
        None => match env.home() {
            Some(home) => home,
            None => {
                writeln!(io.err(), "cd: HOME not set")?;
                return Ok(1);
            }
        },
    };

    let target = expand_home(&requested, env);
    let resolved = if target.is_absolute() {
        target
    } else {
        env.current_dir.join(target)
    };

    let canonical = match fs::canonicalize(&resolved) {
        Ok(dir) => dir,
        Err(_) => {
            writeln!(io.err(), "cd: {}: No such file or directory", requested)?;
            return Ok(1);
        }
    };

    if let Err(e) = std::env::set_current_dir(&canonical) {
        writeln!(io.err(), "cd: {}: {}", requested, e)?;
        return Ok(1);
    }
    env.current_dir = canonical;
    Ok(0)
}

/// Write the arguments to the stdout sink, space-joined, newline-terminated.
fn echo(args: &[String], io: &mut CommandIo) -> Result<ExitCode> {
    writeln!(io.out(), "{}", args.join(" "))?;
    Ok(0)
}

/// Request interpreter termination with the given status (default 0).
///
/// The status is parked in `env.pending_exit` for the read loop to honor;
/// the handler itself never tears the process down, which keeps it callable
/// from tests. A non-numeric argument is reported and exits with status 2.
fn exit(args: &[String], io: &mut CommandIo, env: &mut Environment) -> Result<ExitCode> {
    let status = match args.first() {
        None => 0,
        Some(arg) => match arg.parse::<ExitCode>() {
            Ok(code) => code,
            Err(_) => {
                writeln!(io.err(), "exit: {}: numeric argument required", arg)?;
                2
            }
        },
    };
    env.pending_exit = Some(status);
    Ok(status)
}

/// Write the absolute current working directory.
fn pwd(io: &mut CommandIo, env: &mut Environment) -> Result<ExitCode> {
    writeln!(io.out(), "{}", env.current_dir.display())?;
    Ok(0)
}

/// Classify each name: builtin, resolvable external, or not found.
fn type_of(args: &[String], io: &mut CommandIo, env: &mut Environment) -> Result<ExitCode> {
    let mut status = 0;
    for name in args {
        if let Some(builtin) = Builtin::from_name(name) {
            writeln!(io.out(), "{} is a shell builtin", builtin.name())?;
        } else if let Some(path) = find_command_path(&env.search_path, name) {
            writeln!(io.out(), "{} is {}", name, path.display())?;
        } else {
            writeln!(io.err(), "{}: not found", name)?;
            status = 1;
        }
    }
    Ok(status)
}
