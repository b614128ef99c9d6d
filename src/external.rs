use crate::command::{CommandIo, ExitCode};
use crate::env::Environment;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A resolved command that runs as a child process.
///
/// The program path comes out of [`find_command_path`]; the argument vector
/// is passed to the child verbatim, with no re-tokenization in between.
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// Spawn the child wired to the currently active sinks and wait for it.
    ///
    /// The interpreter blocks until the child exits; stdin is inherited from
    /// the terminal. The child sees the interpreter's variable map and
    /// working directory.
    pub fn execute(&self, io: &CommandIo, env: &Environment) -> Result<ExitCode> {
        let (child_out, child_err) = io.child_stdio()?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdout(child_out)
            .stderr(child_err)
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .spawn()?;
        let exit_status = child.wait()?;
        match exit_status.code() {
            Some(code) => Ok(code),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Locate an external command by name.
///
/// A name containing a path separator is taken as a path and returned as-is
/// when it exists. A bare name is probed against each search-path directory
/// in order; the first existing candidate wins. The probe checks existence
/// only — a match that turns out not to be executable surfaces later as a
/// launch failure, not here.
pub fn find_command_path(search_path: &[PathBuf], name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = Path::new(name);
        return path.exists().then(|| path.to_path_buf());
    }

    search_path
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unique_temp_dir;
    use std::fs::{self, File};

    fn dirs(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    #[cfg(unix)]
    fn absolute_existing_is_returned_as_is() {
        let found = find_command_path(&dirs(&["/bin"]), "/bin/sh");
        assert_eq!(found, Some(PathBuf::from("/bin/sh")));
    }

    #[test]
    #[cfg(unix)]
    fn absolute_nonexisting_is_none() {
        assert_eq!(find_command_path(&dirs(&["/bin"]), "/bin/nonexisting"), None);
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_found_via_search_path() {
        let found = find_command_path(&dirs(&["/bin"]), "sh").expect("sh should be in /bin");
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn bare_name_not_found_in_search_path() {
        assert_eq!(
            find_command_path(&dirs(&["/bin"]), "definitely_not_a_command_xyz"),
            None
        );
    }

    #[test]
    #[cfg(unix)]
    fn search_path_order_decides_the_winner() {
        let base = unique_temp_dir("resolver_order").unwrap();
        let first = base.join("first");
        let second = base.join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        File::create(first.join("tool")).unwrap();
        File::create(second.join("tool")).unwrap();

        let found = find_command_path(&[first.clone(), second], "tool").unwrap();
        assert_eq!(found, first.join("tool"));

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn empty_search_path_never_resolves() {
        assert_eq!(find_command_path(&[], "sh"), None);
    }

    #[test]
    fn empty_name_is_none() {
        assert_eq!(find_command_path(&dirs(&["/bin"]), ""), None);
    }

    #[test]
    #[cfg(unix)]
    fn existence_only_probe_matches_non_executables() {
        let base = unique_temp_dir("resolver_plain").unwrap();
        fs::create_dir_all(&base).unwrap();
        File::create(base.join("plain_data")).unwrap();

        // deliberately loose: a plain file is still a resolution hit
        let found = find_command_path(&[base.clone()], "plain_data");
        assert_eq!(found, Some(base.join("plain_data")));

        let _ = fs::remove_dir_all(base);
    }
}
