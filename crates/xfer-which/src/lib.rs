// SPDX-License-Identifier: MIT OR Apache-2.0
//! Microcrate for portable executable discovery.
//!
//! [`find_command`] searches an explicit list of directories and reports a
//! typed [`NotFound`] error. [`path_dirs`] supplies the current `PATH` entries
//! for callers that want shell-like lookup. Nothing is cached: every call
//! checks the filesystem again.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions tried after the bare name on Windows.
const WINDOWS_EXTENSIONS: [&str; 4] = [".exe", ".cmd", ".bat", ".com"];

/// An executable could not be located in any searched directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("executable '{name}' not found (searched: {})", display_dirs(.searched))]
pub struct NotFound {
    /// Name that was looked up.
    pub name: String,
    /// Directories that were searched, in search order.
    pub searched: Vec<PathBuf>,
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "no directories".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locate `name` in the given directories only, first match wins.
///
/// `PATH` is not consulted. A candidate must be a regular file, and on Unix
/// it must carry at least one executable permission bit.
pub fn find_command<I, P>(name: &str, dirs: I) -> Result<PathBuf, NotFound>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut searched = Vec::new();
    for dir in dirs {
        let dir = dir.as_ref();
        if let Some(found) = resolve_in_dir(dir, name) {
            return Ok(found);
        }
        searched.push(dir.to_path_buf());
    }
    Err(NotFound {
        name: name.to_string(),
        searched,
    })
}

/// Entries of the current `PATH`, read fresh on every call.
pub fn path_dirs() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

fn resolve_in_dir(dir: &Path, command: &str) -> Option<PathBuf> {
    candidate_names(command, cfg!(windows))
        .into_iter()
        .map(|file| dir.join(file))
        .find(|candidate| is_executable(candidate))
}

/// File names tried for `command` inside one directory, bare name first.
fn candidate_names(command: &str, windows: bool) -> Vec<String> {
    let mut names = vec![command.to_string()];
    if windows {
        names.extend(WINDOWS_EXTENSIONS.map(|ext| format!("{command}{ext}")));
    }
    names
}

fn is_executable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_tries_only_the_bare_name() {
        assert_eq!(candidate_names("ssh", false), ["ssh"]);
    }

    #[test]
    fn windows_tries_each_name_once() {
        let names = candidate_names("ssh", true);
        assert_eq!(names, ["ssh", "ssh.exe", "ssh.cmd", "ssh.bat", "ssh.com"]);

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn find_command_with_no_dirs_reports_empty_search() {
        let err = find_command("ssh", Vec::<PathBuf>::new()).unwrap_err();
        assert_eq!(err.name, "ssh");
        assert!(err.searched.is_empty());
        assert!(err.to_string().contains("no directories"));
    }

    #[test]
    fn not_found_message_lists_searched_dirs() {
        let err = NotFound {
            name: "scp".into(),
            searched: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        let msg = err.to_string();
        assert!(msg.contains("'scp'"), "{msg}");
        assert!(msg.contains("/a, /b"), "{msg}");
    }
}
