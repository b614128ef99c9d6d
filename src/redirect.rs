//! Recognizing and extracting redirection operators from a word list.
//!
//! The scan is strictly left to right: an operator and the word after it are
//! cut out of the command line and recorded for the affected stream. Writing
//! the same stream twice keeps the later target (last-wins), which matches
//! the scan-and-cut policy rather than being an error.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;

/// Errors produced while extracting redirections from a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    /// A redirection operator was the last word on the line.
    MissingTarget,
}

impl fmt::Display for RedirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectError::MissingTarget => {
                write!(f, "syntax error near unexpected token `newline'")
            }
        }
    }
}

impl std::error::Error for RedirectError {}

/// Target of one redirected stream: where to write and whether to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSpec {
    pub path: String,
    pub append: bool,
}

impl RedirectSpec {
    /// Open the target file with the recorded mode.
    ///
    /// Truncate mode clobbers an existing file; append mode extends it. The
    /// file is created either way, but parent directories are not.
    pub fn open(&self) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if self.append {
            options.append(true);
        } else {
            options.truncate(true);
        }
        options.open(&self.path)
    }
}

/// Per-stream redirection directives for a single command.
///
/// At most one directive per stream survives extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirections {
    pub stdout: Option<RedirectSpec>,
    pub stderr: Option<RedirectSpec>,
}

impl Redirections {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_none() && self.stderr.is_none()
    }
}

/// Which stream an operator addresses, plus its open mode.
fn classify_operator(word: &str) -> Option<(Stream, bool)> {
    match word {
        ">" | "1>" => Some((Stream::Out, false)),
        ">>" | "1>>" => Some((Stream::Out, true)),
        "2>" => Some((Stream::Err, false)),
        "2>>" => Some((Stream::Err, true)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Out,
    Err,
}

/// Split `words` into the command proper and its redirection directives.
///
/// Operators are matched as whole words only; `>file` written without a
/// separating space is an ordinary argument, exactly as the tokenizer left
/// it. An operator with no following word is a syntax error and the command
/// must not run.
pub fn extract(words: Vec<String>) -> Result<(Vec<String>, Redirections), RedirectError> {
    let mut clean = Vec::with_capacity(words.len());
    let mut redirections = Redirections::default();

    let mut iter = words.into_iter();
    while let Some(word) = iter.next() {
        match classify_operator(&word) {
            Some((stream, append)) => {
                let path = iter.next().ok_or(RedirectError::MissingTarget)?;
                let spec = RedirectSpec { path, append };
                match stream {
                    Stream::Out => redirections.stdout = Some(spec),
                    Stream::Err => redirections.stderr = Some(spec),
                }
            }
            None => clean.push(word),
        }
    }

    Ok((clean, redirections))
}
