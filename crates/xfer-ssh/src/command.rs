// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unstarted process descriptors for `ssh` and `scp`.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::error::CommandError;
use crate::resolve::Resolver;
use crate::tool::Tool;

/// Program, arguments and optional cancellation binding for a process that
/// has not been started.
///
/// Immutable once built. Start it with [`spawn`](Self::spawn) or turn it into
/// a [`tokio::process::Command`] with [`command`](Self::command).
#[derive(Debug, Clone)]
pub struct ProcessDescriptor {
    pub(crate) program: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl ProcessDescriptor {
    /// Bundle an already-resolved program with its arguments.
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<String>,
        cancellation: Option<CancellationToken>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            cancellation,
        }
    }

    /// Resolved executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in the order they will be passed.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Cancellation binding, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Consume the descriptor and return its parts.
    pub fn into_parts(self) -> (PathBuf, Vec<String>, Option<CancellationToken>) {
        (self.program, self.args, self.cancellation)
    }
}

/// Prepare an `ssh` invocation using the default [`Resolver`].
pub fn ssh_command<I, S>(
    cancel: Option<CancellationToken>,
    args: I,
) -> Result<ProcessDescriptor, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Resolver::new().command(Tool::Ssh, cancel, args)
}

/// Prepare an `scp` invocation using the default [`Resolver`].
pub fn scp_command<I, S>(
    cancel: Option<CancellationToken>,
    args: I,
) -> Result<ProcessDescriptor, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Resolver::new().command(Tool::Scp, cancel, args)
}
