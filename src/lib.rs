//! A tiny interactive command interpreter.
//!
//! This crate provides the building blocks of a line-oriented shell: a
//! quote-aware tokenizer, redirection extraction, a fixed set of built-in
//! commands executed in-process, and discovery and launching of external
//! programs from a search path. One line in, one command out, no pipelines.
//!
//! The main entry point is [`Interpreter`], which executes input lines
//! against an explicit [`env::Environment`] and a pair of output sinks, so
//! embedders and tests can observe command output without touching the real
//! process streams. The binary target wraps it in a read loop.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod io_adapters;
mod lexer;
mod redirect;
#[cfg(test)]
mod test_support;

pub use command::{CommandIo, ExitCode};
pub use interpreter::Interpreter;
pub use io_adapters::MemWriter;
