// SPDX-License-Identifier: MIT OR Apache-2.0
//! Platform discovery strategies used when no override is set.

use std::path::PathBuf;

use xfer_which::{NotFound, find_command, path_dirs};

/// Locates a named executable among standard installation locations.
pub trait Discovery: Send + Sync {
    /// Find `name`, returning the path to invoke.
    fn find(&self, name: &str) -> Result<PathBuf, NotFound>;
}

impl<F> Discovery for F
where
    F: Fn(&str) -> Result<PathBuf, NotFound> + Send + Sync,
{
    fn find(&self, name: &str) -> Result<PathBuf, NotFound> {
        self(name)
    }
}

/// Searches `PATH` (optionally) followed by a fixed list of directories.
#[derive(Debug, Clone)]
pub struct StandardDiscovery {
    search_path_env: bool,
    locations: Vec<PathBuf>,
}

/// Discovery strategy for the compile target.
pub type PlatformDiscovery = StandardDiscovery;

impl StandardDiscovery {
    /// Search `PATH`, then `locations` in order.
    pub fn new(locations: Vec<PathBuf>) -> Self {
        Self {
            search_path_env: true,
            locations,
        }
    }

    /// Skip `PATH` and search only the configured locations.
    #[must_use]
    pub fn without_path_env(mut self) -> Self {
        self.search_path_env = false;
        self
    }

    /// Fallback directories searched after `PATH`.
    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }
}

impl Default for StandardDiscovery {
    fn default() -> Self {
        Self::new(default_locations())
    }
}

impl Discovery for StandardDiscovery {
    fn find(&self, name: &str) -> Result<PathBuf, NotFound> {
        let mut dirs = if self.search_path_env {
            path_dirs()
        } else {
            Vec::new()
        };
        dirs.extend(self.locations.iter().cloned());
        find_command(name, dirs)
    }
}

/// Well-known client install directories for the compile target.
pub fn default_locations() -> Vec<PathBuf> {
    #[cfg(windows)]
    {
        windows_locations()
    }
    #[cfg(not(windows))]
    {
        unix_locations()
    }
}

#[cfg(not(windows))]
fn unix_locations() -> Vec<PathBuf> {
    [
        "/usr/bin",
        "/bin",
        "/usr/local/bin",
        // Homebrew on Apple silicon, then MacPorts.
        "/opt/homebrew/bin",
        "/opt/local/bin",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(windows)]
fn windows_locations() -> Vec<PathBuf> {
    let env_dir = |key: &str, fallback: &str| {
        std::env::var_os(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(fallback))
    };

    let system_root = env_dir("SystemRoot", r"C:\Windows");
    let program_files = env_dir("ProgramFiles", r"C:\Program Files");
    let program_files_x86 = env_dir("ProgramFiles(x86)", r"C:\Program Files (x86)");

    vec![
        // Built-in OpenSSH client.
        system_root.join("System32").join("OpenSSH"),
        // Git for Windows bundles its own ssh/scp.
        program_files.join("Git").join("usr").join("bin"),
        program_files_x86.join("Git").join("usr").join("bin"),
    ]
}
