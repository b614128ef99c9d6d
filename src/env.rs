use crate::command::ExitCode;
use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// The interpreter's view of the process environment.
///
/// Captured once at startup and then threaded explicitly through the
/// resolver, the builtins, and external launches, so the core never reads
/// ambient global state. Fields are public so callers and tests can assemble
/// an environment directly instead of mocking the process.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Variables visible to executed commands (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// Working directory for command execution; mutated only by `cd`.
    pub current_dir: PathBuf,
    /// Directories probed when resolving external commands, split from
    /// `PATH` exactly once at construction time.
    pub search_path: Vec<PathBuf>,
    /// Set by the `exit` builtin; the interactive loop checks it to know
    /// when (and with which status) to terminate.
    pub pending_exit: Option<ExitCode>,
}

impl Environment {
    /// Snapshot the current process state.
    ///
    /// The search path is fixed for the lifetime of the value; later `PATH`
    /// edits do not affect resolution.
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        for (k, v) in stdenv::vars() {
            vars.insert(k, v);
        }
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let search_path = split_search_path(vars.get("PATH").map(String::as_str));
        Self {
            vars,
            current_dir,
            search_path,
            pending_exit: None,
        }
    }

    /// Variable lookup: `self.vars` first, the live process env as fallback.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// The home directory, read on demand for argument-less `cd` and `~`.
    pub fn home(&self) -> Option<String> {
        self.get_var("HOME")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a `PATH`-style value into an ordered directory list.
///
/// An absent or empty value yields an empty list, which makes every external
/// lookup fail rather than falling back to some implicit default.
pub fn split_search_path(path_var: Option<&str>) -> Vec<PathBuf> {
    match path_var {
        Some(paths) if !paths.is_empty() => stdenv::split_paths(paths).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_env() -> Environment {
        Environment {
            vars: HashMap::new(),
            current_dir: stdenv::current_dir().unwrap(),
            search_path: Vec::new(),
            pending_exit: None,
        }
    }

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = empty_env();

        // initially absent
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");

        assert_eq!(env.get_var("KEY"), Some("VALUE".to_string()));
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
        assert!(!env.search_path.is_empty());
    }

    #[test]
    fn test_home_reads_home_var() {
        let mut env = empty_env();
        env.set_var("HOME", "/home/somebody");
        assert_eq!(env.home(), Some("/home/somebody".to_string()));
    }

    #[test]
    fn test_split_search_path_absent_or_empty() {
        assert!(split_search_path(None).is_empty());
        assert!(split_search_path(Some("")).is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_split_search_path_preserves_order() {
        let dirs = split_search_path(Some("/usr/local/bin:/usr/bin:/bin"));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ]
        );
    }
}
