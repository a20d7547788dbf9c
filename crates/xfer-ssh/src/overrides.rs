// SPDX-License-Identifier: MIT OR Apache-2.0
//! Search-path override sources.

use std::path::PathBuf;

/// Environment variable restricting `ssh` and `scp` lookup to one directory.
///
/// A single variable governs both tools.
pub const SSH_PATH_ENV: &str = "MUTAGEN_SSH_PATH";

/// Supplies the optional search-path override consulted before discovery.
///
/// Implementations are queried on every resolution; they must not cache.
pub trait OverrideSource: Send + Sync {
    /// The override directory, or `None` when unset or empty.
    fn search_path(&self) -> Option<PathBuf>;
}

impl<T: OverrideSource + ?Sized> OverrideSource for Box<T> {
    fn search_path(&self) -> Option<PathBuf> {
        (**self).search_path()
    }
}

/// Reads [`SSH_PATH_ENV`] from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverride;

impl OverrideSource for EnvOverride {
    fn search_path(&self) -> Option<PathBuf> {
        std::env::var_os(SSH_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}

/// A fixed override, independent of the environment.
#[derive(Debug, Clone, Default)]
pub struct FixedOverride(Option<PathBuf>);

impl FixedOverride {
    /// Restrict lookup to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(Some(dir.into()))
    }

    /// No override; resolution always falls through to discovery.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl OverrideSource for FixedOverride {
    fn search_path(&self) -> Option<PathBuf> {
        self.0
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .cloned()
    }
}
